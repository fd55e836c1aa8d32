//! Waypath core (engine-agnostic).
//!
//! A keyframe path-animation engine: tracks of pose nodes with Bezier tangent
//! handles, curve-eased segment playback driven by an external tick, and a
//! named animation library. The host supplies delta time and a live-pose
//! seam ([`PoseTarget`]); the engine produces blended poses and lifecycle
//! events. Applying poses to a scene graph, editing UI and persistence are
//! host concerns.

pub mod curve;
pub mod data;
pub mod engine;
pub mod error;
pub mod interp;
pub mod library;
pub mod outputs;
pub mod playback;
pub mod pose;

// Re-exports for consumers (adapters)
pub use curve::{ControlPoint, CurveKey, EasingCurve, Timing};
pub use data::{Node, Track};
pub use engine::{Engine, Hook};
pub use error::LibraryError;
pub use library::Library;
pub use outputs::{Outputs, PlaybackEvent};
pub use playback::{Playback, StepResult};
pub use pose::{Pose, PoseTarget};
