//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, registry and scheduler.
//! - Enforce creation-time invariants through validated constructors.
//!
//! # Invariants
//! - Every persisted task is identified by a store-assigned `TaskId`.
//! - `completed` and `reminded` only ever move from `false` to `true`.

pub mod task;
