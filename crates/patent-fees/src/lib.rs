pub mod config;
pub mod error;
pub mod estimates;
pub mod telemetry;
