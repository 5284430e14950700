// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Structures storing the loaded trajectory frames and their global identities.

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::PANIC_MESSAGE;

/// Global identity of a single trajectory frame.
///
/// The identity is independent of which worker physically stores the frame.
/// Frame identities are totally ordered: first by trajectory, then by frame.
/// This ordering drives every tie-break of the clustering algorithm and must
/// therefore never depend on the worker count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, CopyGetters, Serialize, Deserialize,
)]
pub struct FrameId {
    /// Index of the trajectory file (trajectories are ordered by filename).
    #[getset(get_copy = "pub")]
    trajectory: u32,
    /// Index of the frame inside its trajectory file.
    #[getset(get_copy = "pub")]
    frame: u32,
}

impl FrameId {
    /// Create a new frame identity.
    pub fn new(trajectory: u32, frame: u32) -> Self {
        Self { trajectory, frame }
    }
}

impl Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "trajectory {}, frame {}", self.trajectory, self.frame)
    }
}

/// A single loaded frame: its global identity and the flattened coordinates
/// of the landmark atoms (`[x, y, z]` per atom, ascending atom-index order).
/// Immutable once loaded.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub(crate) struct Frame {
    #[getset(get_copy = "pub(crate)")]
    id: FrameId,
    #[getset(get = "pub(crate)")]
    coords: Vec<f32>,
}

impl Frame {
    pub(crate) fn new(id: FrameId, coords: Vec<f32>) -> Self {
        Self { id, coords }
    }
}

/// Totally ordered catalogue of all loaded frames.
///
/// The catalogue stores frames in their global order: trajectories ordered by
/// filename, frames by their position within each trajectory. Every worker
/// observes the exact same ordering regardless of which frames it owns.
#[derive(Debug, Clone, Default, Getters)]
pub struct FrameCatalog {
    /// All frames in global order.
    frames: Vec<Frame>,
    /// Names of the loaded trajectory files (in catalogue order).
    #[getset(get = "pub(crate)")]
    trajectories: Vec<String>,
}

impl FrameCatalog {
    /// Create a catalogue from frames already in global order.
    pub(crate) fn from_frames(frames: Vec<Frame>, trajectories: Vec<String>) -> Self {
        let n_coords = frames.first().map(|x| x.coords().len()).unwrap_or(0);

        // all frames must have the same dimensionality
        for frame in &frames {
            assert_eq!(
                frame.coords().len(),
                n_coords,
                "FATAL CLUSTERLP ERROR | FrameCatalog::from_frames | Inconsistent frame dimensionality. {}",
                PANIC_MESSAGE
            );
        }

        Self {
            frames,
            trajectories,
        }
    }

    /// Get the total number of frames in the catalogue.
    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    /// Get the frame at the given position of the global ordering.
    ///
    /// ## Panics
    /// Panics if the position does not exist in the catalogue.
    pub(crate) fn frame(&self, position: usize) -> &Frame {
        self.frames.get(position).unwrap_or_else(|| {
            panic!(
                "FATAL CLUSTERLP ERROR | FrameCatalog::frame | Frame position '{}' out of range ('{}' frames loaded). {}",
                position,
                self.frames.len(),
                PANIC_MESSAGE
            )
        })
    }

    /// Iterate over the frames in global order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}
