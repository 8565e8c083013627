//! Outbound adapters implementing the domain's driven ports.
//!
//! - **hashing**: Argon2id credential hasher.
//! - **memory**: in-memory user directory for development and tests.
//! - **persistence**: PostgreSQL user directory using Diesel.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod hashing;
pub mod memory;
pub mod persistence;
