pub mod client;
pub mod config;

pub use client::QdrantRepository;
pub use config::QdrantConfig;
