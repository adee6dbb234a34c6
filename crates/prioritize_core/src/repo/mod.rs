//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable task store contract.
//! - Isolate SQLite query details from registry/business orchestration.
//!
//! # Invariants
//! - Writes are synchronous and durable before the call returns.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod task_repo;
