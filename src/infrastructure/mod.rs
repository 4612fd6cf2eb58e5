pub mod catalog;
pub mod embeddings;
pub mod market_data;
