pub mod cli;
pub mod daemon;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod server;
pub mod storage;
