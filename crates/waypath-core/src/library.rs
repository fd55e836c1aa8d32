//! Named collection of tracks with current-selection tracking.
//!
//! Tracks are kept in insertion order (first insertion drives the default
//! selection); lookup is by unique name. The `current` pointer is
//! deliberately permissive: it may name a track that no longer exists, and
//! `current()` simply reports `None` for that state.

use serde::{Deserialize, Serialize};

use crate::data::Track;
use crate::error::LibraryError;

const AUTO_NAME_PREFIX: &str = "New Animation";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Library {
    tracks: Vec<Track>,
    current: String,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track. An empty name is replaced with the smallest unused
    /// `"New Animation {n}"`; a duplicate name is rejected. The first track
    /// added to an empty library becomes current. Returns the name the track
    /// was stored under.
    pub fn add(&mut self, mut track: Track) -> Result<String, LibraryError> {
        if track.name.is_empty() {
            track.name = self.generate_name()?;
        } else if self.contains(&track.name) {
            return Err(LibraryError::NameCollision(track.name.clone()));
        }
        let was_empty = self.tracks.is_empty();
        let name = track.name.clone();
        self.tracks.push(track);
        if was_empty {
            self.current = name.clone();
        }
        Ok(name)
    }

    fn generate_name(&self) -> Result<String, LibraryError> {
        for n in 1..=self.tracks.len() + 1 {
            let candidate = format!("{AUTO_NAME_PREFIX} {n}");
            if !self.contains(&candidate) {
                return Ok(candidate);
            }
        }
        Err(LibraryError::NameGeneration)
    }

    /// Remove the track stored under `name`; reports whether anything was
    /// removed. A dangling `current` pointer is left as-is.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.tracks.iter().position(|t| t.name == name) {
            Some(index) => {
                self.tracks.remove(index);
                true
            }
            None => false,
        }
    }

    /// Rename `from` to `to`, preserving the track's content and position.
    /// Updates `current` when it pointed at `from`.
    pub fn rename(&mut self, from: &str, to: &str) -> Result<(), LibraryError> {
        if from.is_empty() || to.is_empty() {
            return Err(LibraryError::EmptyName);
        }
        if self.contains(to) {
            return Err(LibraryError::NameCollision(to.to_string()));
        }
        let track = self
            .tracks
            .iter_mut()
            .find(|t| t.name == from)
            .ok_or_else(|| LibraryError::NotFound(from.to_string()))?;
        track.name = to.to_string();
        if self.current == from {
            self.current = to.to_string();
        }
        Ok(())
    }

    /// Replace the stored track of the same name wholesale, keeping its
    /// position.
    pub fn save(&mut self, track: Track) -> Result<(), LibraryError> {
        if track.name.is_empty() {
            return Err(LibraryError::EmptyName);
        }
        let slot = self
            .tracks
            .iter_mut()
            .find(|t| t.name == track.name)
            .ok_or_else(|| LibraryError::NotFound(track.name.clone()))?;
        *slot = track;
        Ok(())
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name == name)
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.name == name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.tracks.iter().any(|t| t.name == name)
    }

    /// The currently selected track, if the pointer resolves.
    #[inline]
    pub fn current(&self) -> Option<&Track> {
        self.get(&self.current)
    }

    #[inline]
    pub fn current_name(&self) -> &str {
        &self.current
    }

    /// Point the selection at `name`, unconditionally: existence is not
    /// checked, and an unresolvable pointer is a valid state.
    pub fn set_current(&mut self, name: impl Into<String>) {
        self.current = name.into();
    }

    #[inline]
    pub fn names(&self) -> Vec<&str> {
        self.tracks.iter().map(|t| t.name.as_str()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
