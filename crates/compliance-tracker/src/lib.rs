pub mod checks;
pub mod config;
pub mod error;
pub mod telemetry;
