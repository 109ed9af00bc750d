pub mod config;
pub mod ticketing;
pub mod tracing;
pub mod ui;
