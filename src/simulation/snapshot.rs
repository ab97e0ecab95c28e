//! Read-only state handed to renderers after each tick
//!
//! The orchestrator owns and mutates the bodies; a renderer only ever sees
//! an owned `Snapshot` copy pushed through a [`SnapshotSink`]. Sinks must
//! return promptly: `ChannelSink` drops a snapshot rather than block the
//! physics thread when the consumer falls behind

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

use bevy::log::debug;
use bevy::prelude::Resource;

use super::boundary::WorldBoundary;
use super::states::{Body, BodyId, Shape};
use super::vector::Vector2;

#[derive(Debug, Clone, PartialEq)]
pub struct BodyRecord {
    pub id: BodyId,
    pub position: Vector2,
    pub shape: Shape,
    pub radius: f64, // circle radius, or half the box diagonal
}

impl From<&Body> for BodyRecord {
    fn from(b: &Body) -> Self {
        Self {
            id: b.id,
            position: b.position,
            shape: b.shape,
            radius: b.shape.bounding_radius(),
        }
    }
}

/// Point-in-time copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tick: u64,
    pub time: f64,
    pub boundary: WorldBoundary,
    pub bodies: Vec<BodyRecord>, // same order as the orchestrator's bodies
}

/// Receiver of the per-tick snapshot, also the "redraw now" notification
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: Snapshot);
}

/// Discard sink for runs without a renderer
impl SnapshotSink for () {
    fn publish(&mut self, _snapshot: Snapshot) {}
}

/// Keeps only the latest snapshot; shared with bevy systems as a resource
#[derive(Resource, Debug, Default)]
pub struct LatestSnapshot {
    pub snapshot: Option<Snapshot>,
    pub published: u64,
}

impl SnapshotSink for LatestSnapshot {
    fn publish(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
        self.published += 1;
    }
}

/// Hands snapshots to another thread over a bounded channel
/// A full channel drops the new snapshot; a closed one is ignored
pub struct ChannelSink {
    tx: SyncSender<Snapshot>,
    dropped: u64,
}

impl ChannelSink {
    /// Create a sink and its receiving end with room for `capacity` snapshots
    pub fn bounded(capacity: usize) -> (Self, Receiver<Snapshot>) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        (Self { tx, dropped: 0 }, rx)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl SnapshotSink for ChannelSink {
    fn publish(&mut self, snapshot: Snapshot) {
        match self.tx.try_send(snapshot) {
            Ok(()) => {}
            Err(TrySendError::Full(s)) => {
                self.dropped += 1;
                debug!("renderer busy, dropped snapshot of tick {}", s.tick);
            }
            Err(TrySendError::Disconnected(_)) => {
                self.dropped += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(tick: u64) -> Snapshot {
        Snapshot {
            tick,
            time: tick as f64 * 0.01,
            boundary: WorldBoundary::default(),
            bodies: Vec::new(),
        }
    }

    #[test]
    fn record_from_body() {
        let b = Body::circle(BodyId(3), Vector2::new(1.0, 2.0), Vector2::new(9.0, 9.0), 4.0).unwrap();
        let r = BodyRecord::from(&b);
        assert_eq!(r.id, BodyId(3));
        assert_eq!(r.position, Vector2::new(1.0, 2.0));
        assert_eq!(r.radius, 4.0);
    }

    #[test]
    fn latest_keeps_newest() {
        let mut sink = LatestSnapshot::default();
        sink.publish(snap(1));
        sink.publish(snap(2));
        assert_eq!(sink.published, 2);
        assert_eq!(sink.snapshot.as_ref().map(|s| s.tick), Some(2));
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let (mut sink, rx) = ChannelSink::bounded(1);
        sink.publish(snap(1));
        sink.publish(snap(2));
        assert_eq!(sink.dropped(), 1);
        assert_eq!(rx.try_recv().map(|s| s.tick), Ok(1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_channel_is_ignored() {
        let (mut sink, rx) = ChannelSink::bounded(4);
        drop(rx);
        sink.publish(snap(1));
        assert_eq!(sink.dropped(), 1);
    }
}
