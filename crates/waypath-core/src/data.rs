//! Node and track data model.
//!
//! A [`Node`] is one keyframe pose with Bezier tangent handles flanking it; a
//! [`Track`] is a named ordered sequence of nodes plus playback configuration.
//! Tracks always hold at least one node, and `Clone` deep-copies everything
//! (nodes, tangents, override curves) so copies never alias.

use serde::{Deserialize, Serialize};

use crate::curve::EasingCurve;
use crate::pose::Pose;

/// One keyframe: a pose plus the control handles shaping the Bezier approach
/// to (`back_tangent`) and departure from (`forward_tangent`) the node.
///
/// New nodes take both tangents equal to their own position, which keeps the
/// segment on the straight chord until the handles are edited.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    pub back_tangent: [f32; 3],
    pub forward_tangent: [f32; 3],
    /// When set, this segment uses `speed_override`/`curve_override` instead
    /// of the track-level speed and curve.
    pub animate_override: bool,
    pub speed_override: f32,
    pub curve_override: EasingCurve,
}

impl Node {
    /// Identity-pose node with degenerate handles at the origin.
    pub fn new() -> Self {
        Self::at(Pose::identity())
    }

    /// Snapshot a pose as a node, tangents collapsed onto the position.
    pub fn at(pose: Pose) -> Self {
        Self {
            position: pose.position,
            rotation: pose.rotation,
            scale: pose.scale,
            back_tangent: pose.position,
            forward_tangent: pose.position,
            animate_override: false,
            speed_override: 1.0,
            curve_override: EasingCurve::linear(),
        }
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

/// Named animation definition: ordered nodes plus playback configuration.
///
/// Invariants enforced at the mutation boundary: at least one node at all
/// times, `current_node` clamped into `[0, count-1]`, `speed` strictly
/// positive. Name uniqueness is the owning library's concern, not the
/// track's.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub name: String,
    nodes: Vec<Node>,
    current_node: usize,
    speed: f32,
    pub curve: EasingCurve,
    pub snap_to_start: bool,
}

impl Track {
    /// New track holding a single default node.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_nodes(name, vec![Node::new()])
    }

    /// Build a track from existing nodes; an empty list falls back to a
    /// single default node so the at-least-one invariant holds from birth.
    pub fn from_nodes(name: impl Into<String>, mut nodes: Vec<Node>) -> Self {
        if nodes.is_empty() {
            nodes.push(Node::new());
        }
        Self {
            name: name.into(),
            nodes,
            current_node: 0,
            speed: 1.0,
            curve: EasingCurve::linear(),
            snap_to_start: false,
        }
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    #[inline]
    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Replace the node at `index`. Reports failure for invalid indices and
    /// leaves the track unchanged.
    pub fn set_node(&mut self, index: usize, node: Node) -> bool {
        match self.nodes.get_mut(index) {
            Some(slot) => {
                *slot = node;
                true
            }
            None => false,
        }
    }

    /// Append a node at the end of the track.
    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Insert a node before `index`. Fails for indices past the current
    /// range.
    pub fn insert_node(&mut self, index: usize, node: Node) -> bool {
        if index >= self.nodes.len() {
            return false;
        }
        self.nodes.insert(index, node);
        true
    }

    /// Remove the node at `index`. Fails for invalid indices, and always
    /// fails when only one node remains.
    pub fn remove_node(&mut self, index: usize) -> bool {
        if index >= self.nodes.len() || self.nodes.len() <= 1 {
            return false;
        }
        self.nodes.remove(index);
        self.clamp_current_node();
        true
    }

    #[inline]
    pub fn current_node(&self) -> usize {
        self.current_node
    }

    pub fn set_current_node(&mut self, index: usize) {
        self.current_node = index;
        self.clamp_current_node();
    }

    fn clamp_current_node(&mut self) {
        if self.current_node >= self.nodes.len() {
            self.current_node = self.nodes.len() - 1;
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the track speed. Non-positive (or non-finite) values coerce to 1.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed > 0.0 && speed.is_finite() {
            speed
        } else {
            1.0
        };
    }
}
