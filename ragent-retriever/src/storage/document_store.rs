use super::{Document, DocumentId};
use crate::error::{Result, RetrievalError};

/// Ordered, immutable corpus. Ids are positions in the construction input.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
}

impl DocumentStore {
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let documents = texts
            .into_iter()
            .enumerate()
            .map(|(id, text)| Document {
                id,
                text: text.into(),
            })
            .collect();
        Self { documents }
    }

    /// Look up a document, failing with `NotFound` outside `[0, len)`.
    pub fn get(&self, id: DocumentId) -> Result<&Document> {
        self.documents
            .get(id)
            .ok_or(RetrievalError::NotFound { id })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Document texts in id order
    pub fn texts(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.text.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_insertion_order() {
        let store = DocumentStore::new(["first", "second", "third"]);

        assert_eq!(store.len(), 3);
        for (expected, doc) in store.iter().enumerate() {
            assert_eq!(doc.id, expected);
        }
        assert_eq!(store.get(1).unwrap().text, "second");
        assert_eq!(store.texts(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_out_of_range_is_not_found() {
        let store = DocumentStore::new(vec!["only".to_string()]);

        assert!(store.get(0).is_ok());
        assert!(matches!(
            store.get(1),
            Err(RetrievalError::NotFound { id: 1 })
        ));
        assert!(matches!(
            store.get(usize::MAX),
            Err(RetrievalError::NotFound { .. })
        ));
    }

    #[test]
    fn test_empty_store() {
        let store = DocumentStore::new(Vec::<String>::new());
        assert!(store.is_empty());
        assert!(store.get(0).is_err());
    }
}
