//! # Navgate Core
//!
//! Domain entities and pure algorithms for the role-based navigation
//! subsystem: forest construction, notification overlay, and route
//! authorization.

pub mod authorizer;
pub mod builder;
pub mod domain;
pub mod error;

// Re-export domain entities
pub use authorizer::{AccessDecision, RouteAuthorizer};
pub use domain::*;
pub use error::DomainError;
