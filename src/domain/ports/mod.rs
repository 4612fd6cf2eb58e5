pub mod embedding_port;
pub mod market_data;
