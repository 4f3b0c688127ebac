//! Query orchestration over the storage layer
pub mod engine;

pub use engine::{EngineConfig, EngineStats, RetrievalEngine, ScoredDocument};
