//! Vector database clients.

pub mod astra;
pub mod vectorstore;

pub use astra::AstraVectorStore;
pub use vectorstore::{InMemoryVectorStore, VectorStore};
