//! In-memory adapters for tests and offline use.

mod identity;
mod task;

pub use identity::SessionIdentity;
pub use task::InMemoryTaskRepository;
