//! Snapshot feed for hosts that advance the world on their own schedule.
//!
//! The host side holds a [`FeedPublisher`] and publishes one snapshot per tick;
//! scripts hold a cloneable [`WorldFeed`], which implements both
//! [`SnapshotSource`] and [`TickClock`]. Only the latest snapshot is retained.
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use world_core::{Tick, WorldSnapshot};

use crate::api::{ClockError, SnapshotSource, TickClock};

/// Creates a connected publisher/feed pair starting from `initial`.
pub fn channel(initial: WorldSnapshot) -> (FeedPublisher, WorldFeed) {
    let (tx, rx) = watch::channel(Arc::new(initial));
    (FeedPublisher { tx }, WorldFeed { rx })
}

/// Host-side handle that publishes per-tick snapshots.
pub struct FeedPublisher {
    tx: watch::Sender<Arc<WorldSnapshot>>,
}

impl FeedPublisher {
    /// Replaces the current snapshot and wakes every waiting script.
    ///
    /// Snapshots whose tick does not move forward are ignored.
    pub fn publish(&self, snapshot: WorldSnapshot) {
        let snapshot = Arc::new(snapshot);
        self.tx.send_if_modified(|current| {
            if snapshot.tick > current.tick {
                *current = snapshot;
                true
            } else {
                tracing::trace!(tick = %snapshot.tick, "ignoring stale snapshot");
                false
            }
        });
    }

    pub fn current(&self) -> Tick {
        self.tx.borrow().tick
    }

    pub fn subscribers(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Script-side view of a host feed.
#[derive(Clone)]
pub struct WorldFeed {
    rx: watch::Receiver<Arc<WorldSnapshot>>,
}

impl SnapshotSource for WorldFeed {
    fn snapshot(&self) -> Arc<WorldSnapshot> {
        Arc::clone(&self.rx.borrow())
    }
}

#[async_trait]
impl TickClock for WorldFeed {
    fn current(&self) -> Tick {
        self.rx.borrow().tick
    }

    async fn advanced(&self, since: Tick) -> Result<Tick, ClockError> {
        let mut rx = self.rx.clone();
        loop {
            let tick = rx.borrow_and_update().tick;
            if tick > since {
                return Ok(tick);
            }
            rx.changed().await.map_err(|_| ClockError::Closed)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(tick: u64) -> WorldSnapshot {
        WorldSnapshot {
            tick: Tick(tick),
            ..WorldSnapshot::default()
        }
    }

    #[tokio::test]
    async fn advanced_resolves_on_the_next_published_tick() {
        let (publisher, feed) = channel(at(0));
        let waiter = tokio::spawn({
            let feed = feed.clone();
            async move { feed.advanced(Tick(0)).await }
        });

        publisher.publish(at(1));
        assert_eq!(waiter.await.unwrap(), Ok(Tick(1)));
        assert_eq!(feed.snapshot().tick, Tick(1));
    }

    #[tokio::test]
    async fn stale_snapshots_are_dropped() {
        let (publisher, feed) = channel(at(5));
        publisher.publish(at(3));
        assert_eq!(feed.current(), Tick(5));
        assert_eq!(publisher.current(), Tick(5));
    }

    #[tokio::test]
    async fn advanced_returns_immediately_when_already_past() {
        let (_publisher, feed) = channel(at(7));
        assert_eq!(feed.advanced(Tick(2)).await, Ok(Tick(7)));
    }

    #[tokio::test]
    async fn dropping_the_publisher_closes_the_clock() {
        let (publisher, feed) = channel(at(1));
        drop(publisher);
        assert_eq!(feed.advanced(Tick(1)).await, Err(ClockError::Closed));
    }
}
