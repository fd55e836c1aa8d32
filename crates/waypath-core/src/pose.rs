//! Pose value and the host binding seam.

use serde::{Deserialize, Serialize};

/// A full transform sample: position, rotation (unit quaternion as
/// [x,y,z,w]) and component-wise scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Pose {
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Pose {
    #[inline]
    pub fn identity() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0, 1.0, 1.0],
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Live pose reader/writer for the animated object.
///
/// The engine never touches a scene graph; the host implements this seam and
/// receives one `set_pose` per tick while playing (plus the exact snap at
/// segment boundaries). `pose` is read once at playback start when the track
/// does not snap to its first node.
pub trait PoseTarget {
    fn pose(&self) -> Pose;
    fn set_pose(&mut self, pose: Pose);
}
