//! Core orchestration: configuration, document sniffing, and the extraction pipeline.

pub mod config;
pub mod mime;
pub mod pipeline;
