//! Application-level concerns
//!
//! Configuration management for embedding the engine in a worker process.

pub mod config;

pub use config::SegmenterConfig;
