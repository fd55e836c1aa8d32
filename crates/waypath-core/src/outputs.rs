//! Per-tick outputs: discrete semantic events of the playback machine.
//!
//! Poses go straight to the host through [`crate::pose::PoseTarget`]; events
//! are collected here and drained by [`crate::engine::Engine::tick`] so hosts
//! can observe lifecycle transitions without registering hooks.

use serde::{Deserialize, Serialize};

/// Discrete semantic signals emitted while driving playback.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum PlaybackEvent {
    /// A playback run began on the named track.
    Started { track: String },
    /// A segment finished and the pose snapped exactly onto this node.
    NodeReached { track: String, node: usize },
    /// The final node was reached and the run completed.
    Ended { track: String },
    /// An in-flight run was replaced by a new `animate` call; its `Ended`
    /// never fires.
    Cancelled { track: String },
}

/// Events accumulated since the previous drain.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<PlaybackEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: PlaybackEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
