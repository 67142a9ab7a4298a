use super::Snapshot;
use crossbeam_channel::{Receiver, Sender};
use dashmap::DashMap;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fan-out registry for task snapshots.
///
/// Each subscriber owns an unbounded channel. Subscribers whose receiver was
/// dropped are pruned on the next publish.
#[derive(Debug, Default)]
pub struct TaskFeed {
    subscriber_ids_counter: AtomicU64,
    subscribers: DashMap<u64, Sender<Snapshot>>,
}

impl TaskFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber. The returned receiver yields every snapshot
    /// published after this call.
    pub fn subscribe(&self) -> Receiver<Snapshot> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        self.subscribers.insert(self.generate_subscriber_id(), sender);
        receiver
    }

    /// Registers a subscriber and hands it `initial` before any later snapshot.
    pub fn subscribe_with(&self, initial: Snapshot) -> Receiver<Snapshot> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        // The receiver is still in scope, so this send cannot fail.
        let _ = sender.send(initial);
        self.subscribers.insert(self.generate_subscriber_id(), sender);
        receiver
    }

    /// Sends `snapshot` to every live subscriber.
    pub fn publish(&self, snapshot: &Snapshot) {
        self.subscribers.retain(|subscriber_id, sender| {
            let delivered = sender.send(snapshot.clone()).is_ok();
            if !delivered {
                debug!("event=feed_prune module=feed status=ok subscriber_id={subscriber_id}");
            }
            delivered
        });
        debug!(
            "event=feed_publish module=feed status=ok tasks={} subscribers={}",
            snapshot.tasks.len(),
            self.subscribers.len()
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn generate_subscriber_id(&self) -> u64 {
        self.subscriber_ids_counter.fetch_add(1, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::TaskFeed;
    use crate::feed::Snapshot;

    #[test]
    fn publish_prunes_dropped_subscribers() {
        let feed = TaskFeed::new();
        let kept = feed.subscribe();
        let dropped = feed.subscribe();
        drop(dropped);

        feed.publish(&Snapshot::default());

        assert_eq!(feed.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap(), Snapshot::default());
    }

    #[test]
    fn subscribe_with_delivers_initial_snapshot_first() {
        let feed = TaskFeed::new();
        let receiver = feed.subscribe_with(Snapshot::default());
        assert!(receiver.try_recv().unwrap().is_empty());
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn every_subscriber_sees_snapshots_in_publish_order() {
        let feed = TaskFeed::new();
        let first = feed.subscribe();
        let second = feed.subscribe();

        feed.publish(&Snapshot::default());
        feed.publish(&Snapshot::new(Vec::new()));

        for receiver in [first, second] {
            assert_eq!(receiver.len(), 2);
            assert!(receiver.try_iter().all(|snapshot| snapshot.is_empty()));
        }
    }
}
