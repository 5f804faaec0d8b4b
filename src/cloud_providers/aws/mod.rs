pub mod config;
pub mod datapipeline;
