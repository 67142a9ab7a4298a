//! Client-side view state.
//!
//! # Responsibility
//! - Keep the cached task list and its counters in sync with snapshots.
//! - Derive per-card display state.
//! - Drive the create/edit form: validation, date rules, attachment staging
//!   and submission.
//!
//! # Invariants
//! - The cached list is overwritten by every snapshot (last snapshot wins).
//! - Failures reach the user as generic notifications, never as panics.

pub mod board;
pub mod card;
pub mod form;
pub mod notify;

use crate::storage::{FsObjectStore, ObjectStore};

/// Reports whether the backend can be reached before a submission.
pub trait Connectivity {
    fn is_online(&self) -> bool;
}

/// Fixed connectivity answer, for callers that already know the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticConnectivity(pub bool);

impl Connectivity for StaticConnectivity {
    fn is_online(&self) -> bool {
        self.0
    }
}

impl Connectivity for FsObjectStore {
    fn is_online(&self) -> bool {
        self.is_reachable()
    }
}
