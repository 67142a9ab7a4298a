//! Live task snapshots.
//!
//! # Responsibility
//! - Carry point-in-time copies of the ordered task list to subscribers.
//! - Derive list counters from a snapshot.
//!
//! # Invariants
//! - Subscribers receive snapshots in publish order.
//! - A newer snapshot fully replaces an older one; nothing is merged.

mod snapshot;
mod task_feed;

pub use snapshot::{Snapshot, TaskCounts};
pub use task_feed::TaskFeed;

/// Receiving end of one feed subscription.
pub type SnapshotReceiver = crossbeam_channel::Receiver<Snapshot>;
