//! Core use-case services.
//!
//! # Responsibility
//! - Hold the session's authoritative task set and mirror every mutation to
//!   the store.
//! - Map user actions onto registry operations.

pub mod commands;
pub mod task_registry;
