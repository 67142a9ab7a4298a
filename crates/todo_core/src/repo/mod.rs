//! Repository layer over the task store.
//!
//! # Invariants
//! - Repository writes validate the resulting task before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod task_repo;
