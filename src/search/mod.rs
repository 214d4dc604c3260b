pub mod indexer;
pub mod retriever;
pub mod store;
pub mod vector;
