//! University catalog browsing and application intake.
//!
//! The HTTP surface lives in [`catalog::router`]; the binary in `services/api`
//! wires it to a MySQL pool and the operational middleware.

pub mod catalog;
pub mod config;
pub mod error;
pub mod telemetry;
