//! Task list state fed by snapshots.

use super::card::CardView;
use super::form::SubmitOutcome;
use crate::feed::{Snapshot, SnapshotReceiver, TaskCounts};
use crate::model::task::{Task, TaskId};
use chrono::NaiveDate;
use log::debug;

/// Cached task list plus the state of the header and form toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoBoard {
    tasks: Vec<Task>,
    counts: TaskCounts,
    is_loading: bool,
    form_active: bool,
    editing: Option<TaskId>,
}

impl Default for TodoBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoBoard {
    /// Creates a board waiting for its first snapshot.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            counts: TaskCounts::default(),
            is_loading: true,
            form_active: false,
            editing: None,
        }
    }

    /// Replaces the cached list and re-derives the counters.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.counts = snapshot.counts();
        self.tasks = snapshot.tasks;
        self.is_loading = false;
        debug!(
            "event=board_refresh module=client status=ok total={} done={}",
            self.counts.total, self.counts.done
        );
    }

    /// Applies every snapshot already waiting on `receiver`.
    ///
    /// Returns how many snapshots were applied; only the last one is visible
    /// afterwards.
    pub fn drain(&mut self, receiver: &SnapshotReceiver) -> usize {
        let mut applied = 0;
        while let Ok(snapshot) = receiver.try_recv() {
            self.apply_snapshot(snapshot);
            applied += 1;
        }
        applied
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn counts(&self) -> TaskCounts {
        self.counts
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn cards(&self, today: NaiveDate) -> Vec<CardView> {
        self.tasks
            .iter()
            .map(|task| CardView::from_task(task, today))
            .collect()
    }

    /// Opens or closes the form and records which task it edits.
    ///
    /// `None` opens the form in "add" mode.
    pub fn toggle_form(&mut self, editing: Option<TaskId>) {
        self.form_active = !self.form_active;
        self.editing = editing;
    }

    /// Closes the form after a successful save. Rejected or failed submits
    /// keep it open so the user can retry.
    pub fn handle_submit(&mut self, outcome: &SubmitOutcome) {
        if let SubmitOutcome::Saved(id) = outcome {
            debug!("event=form_close module=client status=ok task_id={id}");
            self.form_active = false;
            self.editing = None;
        }
    }

    pub fn is_form_active(&self) -> bool {
        self.form_active
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }
}
