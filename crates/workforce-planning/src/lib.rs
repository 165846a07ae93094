pub mod config;
pub mod error;
pub mod projection;
pub mod telemetry;
