//! Task management for Flexido.
//!
//! Users keep a collection of task records in a hosted store; every screen
//! shows a grouped view of that collection (overdue, upcoming, today,
//! completed). This module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Pure grouping and read models in [`categorizer`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod categorizer;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
