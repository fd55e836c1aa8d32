//! Segment-by-segment playback over one track.
//!
//! A [`Playback`] is the transient session state of one run: the track being
//! traversed (a deep copy taken at start, so library edits between ticks
//! never alias an in-flight run), the segment index, the per-segment timer
//! and the "last node" the segment blends away from. The whole session is
//! serializable so hosts can pause/resume or inspect it.
//!
//! Per step, segment `i` blends node `i-1 -> i`. The easing curve is treated
//! as spanning the whole track: the segment sees only its slice
//! `[(i-1)/count, i/count]`, and the raw curve output is re-normalized
//! against the curve values at the slice bounds so the blend weight reaches
//! exactly 0 and 1 at the segment edges regardless of the curve's range.
//! Non-monotonic curves produce non-monotonic blend weights; that is
//! documented, not prevented.

use serde::{Deserialize, Serialize};

use crate::data::{Node, Track};
use crate::interp::{cubic_bezier_vec3, inverse_lerp, lerp_f32, lerp_vec3, slerp};
use crate::pose::Pose;

/// What a single step produced.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    /// Mid-segment sample to write to the host.
    Pose(Pose),
    /// The segment finished: the pose is the exact node pose (no
    /// floating-point residue) and traversal moved to the next segment.
    NodeReached { node: usize, pose: Pose },
    /// The final node was reached; the run is complete.
    Finished { node: usize, pose: Pose },
}

/// Transient state of one playback run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Playback {
    track: Track,
    segment: usize,
    timer: f32,
    last: Node,
}

impl Playback {
    /// Begin a session over `track`, starting at segment 1.
    ///
    /// `live` is the host's current pose, used as the implicit pose before
    /// the first node when the track does not snap to its start. Returns
    /// `None` for single-node tracks: there is no segment to traverse, and
    /// the caller completes the run immediately.
    pub(crate) fn start(track: Track, live: Pose) -> Option<Self> {
        if track.node_count() < 2 {
            return None;
        }
        let last = if track.snap_to_start {
            track.nodes()[0].clone()
        } else {
            Node::at(live)
        };
        Some(Self {
            track,
            segment: 1,
            timer: 0.0,
            last,
        })
    }

    /// The track snapshot this session plays.
    #[inline]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Index of the node currently being approached (1..count-1).
    #[inline]
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Per-segment timer, normalized by speed into [0,1).
    #[inline]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// The pose the current segment blends away from.
    #[inline]
    pub fn last_node(&self) -> &Node {
        &self.last
    }

    /// Advance by `dt` and produce one step. A `dt` of zero stalls the timer
    /// and re-emits the current sample.
    pub(crate) fn step(&mut self, dt: f32) -> StepResult {
        let count = self.track.node_count();
        let current = &self.track.nodes()[self.segment];

        let (speed, curve) = if current.animate_override {
            (current.speed_override, &current.curve_override)
        } else {
            (self.track.speed(), &self.track.curve)
        };
        self.timer += dt * speed;

        if self.timer >= 1.0 {
            // Snap exactly onto the node so drift never accumulates.
            let pose = current.pose();
            let node = self.segment;
            self.last = current.clone();
            self.segment += 1;
            self.timer = 0.0;
            return if self.segment >= count {
                StepResult::Finished { node, pose }
            } else {
                StepResult::NodeReached { node, pose }
            };
        }

        let low = (self.segment - 1) as f32 / count as f32;
        let high = self.segment as f32 / count as f32;
        let curve_time = if current.animate_override {
            self.timer
        } else {
            lerp_f32(low, high, self.timer)
        };
        let blend = inverse_lerp(
            curve.evaluate(low),
            curve.evaluate(high),
            curve.evaluate(curve_time),
        );

        // Scale deliberately follows the raw timer rather than the
        // reparameterized blend weight.
        let pose = Pose {
            position: cubic_bezier_vec3(
                self.last.position,
                self.last.forward_tangent,
                current.back_tangent,
                current.position,
                blend,
            ),
            rotation: slerp(self.last.rotation, current.rotation, blend),
            scale: lerp_vec3(self.last.scale, current.scale, self.timer),
        };
        StepResult::Pose(pose)
    }
}
