pub mod config;
pub mod error;
pub mod permits;
pub mod source;
pub mod telemetry;
