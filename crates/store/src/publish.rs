//! Snapshot fan-out to subscribers.

use std::sync::{Mutex, mpsc};

use crate::snapshot::CollectionSnapshot;
use crate::subscription::Subscription;

/// Broadcast fan-out of collection snapshots.
///
/// - No IO / no async
/// - Best-effort: dead subscribers are dropped during publish
/// - Every live subscriber receives every snapshot, in publish order
#[derive(Debug, Default)]
pub struct SnapshotPublisher {
    subscribers: Mutex<Vec<mpsc::Sender<CollectionSnapshot>>>,
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fan a snapshot out to every live subscriber.
    ///
    /// Returns the number of subscribers still alive after pruning.
    pub fn publish(&self, snapshot: CollectionSnapshot) -> usize {
        let mut subs = match self.subscribers.lock() {
            Ok(subs) => subs,
            // Poisoned registry: nothing sane to deliver to.
            Err(_) => return 0,
        };

        // Drop any dead subscribers while publishing.
        subs.retain(|tx| tx.send(snapshot.clone()).is_ok());

        tracing::debug!(
            snapshot_id = %snapshot.snapshot_id(),
            subscribers = subs.len(),
            "published collection snapshot"
        );

        subs.len()
    }

    /// Register a new subscriber, delivering `initial` as its first message.
    pub fn register(&self, initial: CollectionSnapshot) -> Subscription<CollectionSnapshot> {
        let (tx, rx) = mpsc::channel();

        // The receiver is still in hand, so this send cannot fail.
        let _ = tx.send(initial);

        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }

    /// Number of currently registered subscribers (dead ones included
    /// until the next publish prunes them).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|subs| subs.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_delivers_initial_snapshot() {
        let publisher = SnapshotPublisher::new();
        let sub = publisher.register(CollectionSnapshot::empty());

        let first = sub.try_recv().unwrap();
        assert!(first.is_empty());
        assert!(sub.try_recv().is_err());
    }

    #[test]
    fn publish_reaches_every_subscriber() {
        let publisher = SnapshotPublisher::new();
        let a = publisher.register(CollectionSnapshot::empty());
        let b = publisher.register(CollectionSnapshot::empty());
        let _ = a.try_recv();
        let _ = b.try_recv();

        let snapshot = CollectionSnapshot::empty();
        assert_eq!(publisher.publish(snapshot.clone()), 2);

        assert_eq!(a.try_recv().unwrap(), snapshot);
        assert_eq!(b.try_recv().unwrap(), snapshot);
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_publish() {
        let publisher = SnapshotPublisher::new();
        let keep = publisher.register(CollectionSnapshot::empty());
        let dropped = publisher.register(CollectionSnapshot::empty());
        drop(dropped);

        assert_eq!(publisher.subscriber_count(), 2);
        assert_eq!(publisher.publish(CollectionSnapshot::empty()), 1);
        assert_eq!(publisher.subscriber_count(), 1);

        drop(keep);
    }
}
