//! Library entrypoint for stock-alert.
//!
//! The binary only wires these pieces together; integration tests under
//! `tests/` drive the monitor with fake price sources and mail transports.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use services::monitor::{Monitor, Outcome};
