//! Domain model for to-do items and their attachments.
//!
//! # Responsibility
//! - Define the task record cached by clients and persisted by the store.
//! - Define file references owned by object storage.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` assigned on create.
//! - File references are shared by value; no referential integrity is kept
//!   between tasks and stored objects.

pub mod file;
pub mod task;
