use super::{DocumentId, Neighbor, VectorIndex};
use crate::error::{Result, RetrievalError};
use std::cmp::Ordering;

/// Squared Euclidean distance, `Σ (aᵢ - bᵢ)²`.
///
/// Both slices must have the same length; extra trailing entries of the longer
/// one are ignored.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

/// Closest first; equal distances fall back to insertion order.
fn rank(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.id.cmp(&b.id))
}

/// Brute-force exact nearest-neighbour index.
///
/// Vectors are stored row-major in one contiguous buffer. A search computes the
/// distance to every row, partially selects the `k` best and sorts only those.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    data: Vec<f32>,
    dimension: usize,
    len: usize,
}

impl FlatIndex {
    fn row(&self, id: DocumentId) -> &[f32] {
        let start = id * self.dimension;
        &self.data[start..start + self.dimension]
    }

    /// The stored vector for `id`, if any.
    pub fn vector(&self, id: DocumentId) -> Option<&[f32]> {
        (id < self.len).then(|| self.row(id))
    }
}

impl VectorIndex for FlatIndex {
    fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dimension = vectors
            .first()
            .map(Vec::len)
            .ok_or(RetrievalError::EmptyIndex)?;

        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(RetrievalError::DimensionMismatch {
                expected: dimension,
                actual: bad.len(),
            });
        }

        let len = vectors.len();
        let mut data = Vec::with_capacity(len * dimension);
        for vector in vectors {
            data.extend(vector);
        }

        tracing::debug!("Built flat index: {} vectors of dimension {}", len, dimension);
        Ok(Self {
            data,
            dimension,
            len,
        })
    }

    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if k == 0 {
            return Err(RetrievalError::InvalidK { k });
        }
        if query.len() != self.dimension {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let k = k.min(self.len);
        let mut scored: Vec<Neighbor> = (0..self.len)
            .map(|id| Neighbor {
                id,
                distance: squared_euclidean(query, self.row(id)),
            })
            .collect();

        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, rank);
            scored.truncate(k);
        }
        scored.sort_unstable_by(rank);

        Ok(scored)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(vectors: &[&[f32]]) -> FlatIndex {
        FlatIndex::build(vectors.iter().map(|v| v.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_build_rejects_empty() {
        assert!(matches!(
            FlatIndex::build(vec![]),
            Err(RetrievalError::EmptyIndex)
        ));
    }

    #[test]
    fn test_build_rejects_mixed_dimensions() {
        let vectors = vec![vec![0.0; 3], vec![1.0; 3], vec![2.0; 4]];
        assert!(matches!(
            FlatIndex::build(vectors),
            Err(RetrievalError::DimensionMismatch {
                expected: 3,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_search_orders_by_distance() {
        let idx = index(&[&[10.0, 0.0], &[1.0, 0.0], &[5.0, 0.0], &[0.0, 2.0]]);
        let hits = idx.search(&[0.0, 0.0], 4).unwrap();

        let ids: Vec<_> = hits.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 0]);
        let distances: Vec<_> = hits.iter().map(|n| n.distance).collect();
        assert_eq!(distances, vec![1.0, 4.0, 25.0, 100.0]);
    }

    #[test]
    fn test_partial_selection_keeps_the_nearest() {
        let vectors: Vec<Vec<f32>> = (0..50).rev().map(|i| vec![i as f32]).collect();
        let idx = FlatIndex::build(vectors).unwrap();

        let hits = idx.search(&[0.0], 3).unwrap();
        let ids: Vec<_> = hits.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![49, 48, 47]);
    }

    #[test]
    fn test_ties_break_by_insertion_order() {
        // Four points at distance 1 from the origin, one farther away
        let idx = index(&[&[0.0, 3.0], &[0.0, 1.0], &[1.0, 0.0], &[-1.0, 0.0], &[0.0, -1.0]]);

        let hits = idx.search(&[0.0, 0.0], 3).unwrap();
        let ids: Vec<_> = hits.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let all = idx.search(&[0.0, 0.0], 5).unwrap();
        let ids: Vec<_> = all.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_oversized_k_is_clamped() {
        let idx = index(&[&[0.0], &[1.0]]);
        assert_eq!(idx.search(&[0.0], 1000).unwrap().len(), 2);
    }

    #[test]
    fn test_zero_k_rejected() {
        let idx = index(&[&[0.0]]);
        assert!(matches!(
            idx.search(&[0.0], 0),
            Err(RetrievalError::InvalidK { k: 0 })
        ));
    }

    #[test]
    fn test_query_dimension_checked() {
        let idx = index(&[&[0.0, 0.0, 0.0]]);
        assert!(matches!(
            idx.search(&[0.0, 0.0], 1),
            Err(RetrievalError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_stored_vectors_and_metadata() {
        let idx = index(&[&[1.0, 2.0], &[3.0, 4.0]]);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.dimension(), 2);
        assert!(!idx.is_empty());
        assert_eq!(idx.vector(1), Some(&[3.0, 4.0][..]));
        assert_eq!(idx.vector(2), None);
    }

    #[test]
    fn test_squared_euclidean() {
        assert_eq!(squared_euclidean(&[1.0, 2.0, 3.0], &[4.0, 6.0, 3.0]), 25.0);
        assert_eq!(squared_euclidean(&[], &[]), 0.0);
    }
}
