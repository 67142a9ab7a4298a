//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate task store and object storage calls into to-do operations.
//! - Keep client state and command-line layers decoupled from storage details.

pub mod todo_service;
