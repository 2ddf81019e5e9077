pub mod config;
pub mod job;

pub use config::ServiceConfig;
pub use job::{JobRecord, ProcessRequest};
