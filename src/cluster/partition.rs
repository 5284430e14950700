// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Deterministic partitioning of the frame catalogue across workers.

use std::ops::Range;

use crate::PANIC_MESSAGE;

/// Block partition of the global frame ordering.
///
/// Each worker owns one contiguous slice of the catalogue; slice sizes differ
/// by at most one frame. The mapping is a pure function of the number of
/// frames and the number of workers, never randomized. The clustering result
/// must be invariant to this mapping: the partition only distributes work,
/// it carries no semantic meaning.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Partition {
    n_frames: usize,
    n_workers: usize,
}

impl Partition {
    /// Create a partitioning of `n_frames` frames across `n_workers` workers.
    ///
    /// ## Panics
    /// Panics if `n_workers` is zero.
    pub(crate) fn new(n_frames: usize, n_workers: usize) -> Self {
        assert!(
            n_workers > 0,
            "FATAL CLUSTERLP ERROR | Partition::new | Number of workers must be positive. {}",
            PANIC_MESSAGE
        );

        Self { n_frames, n_workers }
    }

    /// Get the range of global frame positions owned by the given worker.
    ///
    /// The first `n_frames % n_workers` workers own one frame more than the rest.
    pub(crate) fn range(&self, rank: usize) -> Range<usize> {
        assert!(
            rank < self.n_workers,
            "FATAL CLUSTERLP ERROR | Partition::range | Rank '{}' out of range ('{}' workers). {}",
            rank,
            self.n_workers,
            PANIC_MESSAGE
        );

        let base = self.n_frames / self.n_workers;
        let remainder = self.n_frames % self.n_workers;

        let start = rank * base + rank.min(remainder);
        let len = base + usize::from(rank < remainder);

        start..(start + len)
    }

    /// Get the rank of the worker owning the frame at the given global position.
    #[allow(dead_code)]
    pub(crate) fn owner(&self, position: usize) -> usize {
        assert!(
            position < self.n_frames,
            "FATAL CLUSTERLP ERROR | Partition::owner | Frame position '{}' out of range ('{}' frames). {}",
            position,
            self.n_frames,
            PANIC_MESSAGE
        );

        let base = self.n_frames / self.n_workers;
        let remainder = self.n_frames % self.n_workers;
        let boundary = remainder * (base + 1);

        if position < boundary {
            position / (base + 1)
        } else {
            remainder + (position - boundary) / base
        }
    }
}
