//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod identity;
pub mod repository;

pub use identity::IdentityProvider;
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
