//! Flexido: task board core for the Flexido to-do application.
//!
//! This crate holds the logic shared by every screen of the application:
//! typed task records, user-scoped task storage, live task snapshots, and the
//! categorizer that groups a snapshot into overdue, upcoming, today and
//! completed buckets.
//!
//! # Architecture
//!
//! Flexido follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, session)
//!
//! # Modules
//!
//! - [`task`]: Task records, categorization, storage and board services

pub mod task;
