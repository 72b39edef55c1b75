//! # Navgate Shared
//!
//! Shared configuration, constants, and telemetry for the navgate subsystem.

pub mod config;
pub mod constants;
pub mod error;
pub mod telemetry;
pub mod types;

pub use error::AppError;
pub use types::*;
