//! Engine facade: library ownership, playback driving, lifecycle hooks.

use hashbrown::HashMap;

use crate::library::Library;
use crate::outputs::{Outputs, PlaybackEvent};
use crate::playback::{Playback, StepResult};
use crate::pose::PoseTarget;

/// Lifecycle hook, invoked with the name of the track being played.
pub type Hook = Box<dyn FnMut(&str)>;

#[derive(Default)]
struct HookRegistry {
    on_start: Vec<Hook>,
    on_end: Vec<Hook>,
    track_on_start: HashMap<String, Vec<Hook>>,
    track_on_end: HashMap<String, Vec<Hook>>,
}

impl HookRegistry {
    /// Global hooks first, then the track's own.
    fn fire_start(&mut self, name: &str) {
        for hook in &mut self.on_start {
            hook(name);
        }
        if let Some(hooks) = self.track_on_start.get_mut(name) {
            for hook in hooks {
                hook(name);
            }
        }
    }

    /// The track's own hooks first, then the globals.
    fn fire_end(&mut self, name: &str) {
        if let Some(hooks) = self.track_on_end.get_mut(name) {
            for hook in hooks {
                hook(name);
            }
        }
        for hook in &mut self.on_end {
            hook(name);
        }
    }
}

/// Single-threaded, step-driven animation engine for one animated object.
///
/// The engine owns a [`Library`] of tracks and at most one active playback
/// session. It never advances on its own: the host calls [`Engine::tick`]
/// once per frame with a delta time, and the engine writes the blended pose
/// through the host's [`PoseTarget`]. Starting a new playback while one is
/// active cancels the old run (its end hooks never fire); there is no other
/// cancellation path, and a playback with an effectively-zero speed runs
/// until the host stops ticking it.
pub struct Engine {
    library: Library,
    playback: Option<Playback>,
    hooks: HookRegistry,
    outputs: Outputs,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            library: Library::new(),
            playback: None,
            hooks: HookRegistry::default(),
            outputs: Outputs::default(),
        }
    }

    #[inline]
    pub fn library(&self) -> &Library {
        &self.library
    }

    #[inline]
    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    /// The in-flight session, if any; exposed for host-side inspection or
    /// persistence.
    #[inline]
    pub fn playback(&self) -> Option<&Playback> {
        self.playback.as_ref()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playback.is_some()
    }

    /// Restore a previously captured session (host-side pause/resume).
    /// Replaces any run currently in flight.
    pub fn resume(&mut self, session: Playback) {
        self.playback = Some(session);
    }

    /// Register a hook fired at the start of every playback.
    pub fn on_start(&mut self, hook: impl FnMut(&str) + 'static) {
        self.hooks.on_start.push(Box::new(hook));
    }

    /// Register a hook fired at the end of every completed playback.
    pub fn on_end(&mut self, hook: impl FnMut(&str) + 'static) {
        self.hooks.on_end.push(Box::new(hook));
    }

    /// Register a hook fired only when the named track starts playing.
    pub fn on_track_start(&mut self, name: impl Into<String>, hook: impl FnMut(&str) + 'static) {
        self.hooks
            .track_on_start
            .entry(name.into())
            .or_default()
            .push(Box::new(hook));
    }

    /// Register a hook fired only when the named track finishes playing.
    pub fn on_track_end(&mut self, name: impl Into<String>, hook: impl FnMut(&str) + 'static) {
        self.hooks
            .track_on_end
            .entry(name.into())
            .or_default()
            .push(Box::new(hook));
    }

    /// Start playback of the named animation, cancelling any run already in
    /// flight. Returns false (and logs a warning) when the name is unknown.
    ///
    /// Start hooks fire before any pose is read or written. A single-node
    /// track has no segment to traverse: it fires its start and end hooks in
    /// immediate sequence, emits no pose, and leaves the engine idle.
    pub fn animate(&mut self, name: &str, target: &dyn PoseTarget) -> bool {
        let Some(track) = self.library.get(name).cloned() else {
            log::warn!("animation named \"{name}\" does not exist");
            return false;
        };

        if let Some(old) = self.playback.take() {
            self.outputs.push_event(PlaybackEvent::Cancelled {
                track: old.track().name.clone(),
            });
        }

        let track_name = track.name.clone();
        self.hooks.fire_start(&track_name);
        self.outputs.push_event(PlaybackEvent::Started {
            track: track_name.clone(),
        });

        match Playback::start(track, target.pose()) {
            Some(session) => {
                self.playback = Some(session);
            }
            None => {
                self.hooks.fire_end(&track_name);
                self.outputs.push_event(PlaybackEvent::Ended { track: track_name });
            }
        }
        true
    }

    /// Advance the active playback by `dt`, writing the blended pose to the
    /// host. Idle ticks are no-ops. Returns the events accumulated since the
    /// previous tick (including any produced by `animate` calls in between).
    pub fn tick(&mut self, dt: f32, target: &mut dyn PoseTarget) -> Outputs {
        let step = self
            .playback
            .as_mut()
            .map(|session| (session.track().name.clone(), session.step(dt)));

        if let Some((name, result)) = step {
            match result {
                StepResult::Pose(pose) => target.set_pose(pose),
                StepResult::NodeReached { node, pose } => {
                    target.set_pose(pose);
                    self.outputs
                        .push_event(PlaybackEvent::NodeReached { track: name, node });
                }
                StepResult::Finished { node, pose } => {
                    target.set_pose(pose);
                    self.playback = None;
                    self.outputs.push_event(PlaybackEvent::NodeReached {
                        track: name.clone(),
                        node,
                    });
                    self.hooks.fire_end(&name);
                    self.outputs.push_event(PlaybackEvent::Ended { track: name });
                }
            }
        }

        std::mem::take(&mut self.outputs)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
