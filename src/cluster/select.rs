// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Distributed greedy selection of the cluster centers.
//!
//! The farthest-first heuristic is run in lock-step rounds. One center is
//! finalized per round, globally agreed between all workers:
//!
//! 1. The root broadcasts the newest center to every worker.
//! 2. Each worker updates the distance of its owned frames to the nearest
//!    selected center.
//! 3. Each worker proposes its farthest owned frame and the root reduces the
//!    proposals to the global winner.
//!
//! Both the reduction and the local proposal use the same total order
//! (larger distance first, ties broken by smaller frame identity), so the
//! selected sequence of centers is invariant to the number of workers and to
//! the partitioning of the frames.

use std::ops::Range;

use getset::{CopyGetters, Getters};

use crate::errors::CommError;
use crate::PANIC_MESSAGE;

use super::comm::Comm;
use super::frames::{FrameCatalog, FrameId};
use super::metric::distance;

/// A finalized cluster center: the identity of the selected frame and its
/// landmark coordinates, resolved so that any worker can measure distances
/// to it without owning the underlying frame.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub(crate) struct Center {
    #[getset(get_copy = "pub(crate)")]
    id: FrameId,
    #[getset(get = "pub(crate)")]
    coords: Vec<f32>,
}

impl Center {
    pub(crate) fn new(id: FrameId, coords: Vec<f32>) -> Self {
        Self { id, coords }
    }
}

/// A worker's proposal for the next cluster center.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub(super) struct Candidate {
    #[getset(get_copy = "pub(super)")]
    id: FrameId,
    /// Distance of the proposed frame to its nearest selected center.
    #[getset(get_copy = "pub(super)")]
    dist: f64,
    /// Landmark coordinates of the proposed frame.
    coords: Vec<f32>,
}

impl Candidate {
    pub(super) fn new(id: FrameId, dist: f64, coords: Vec<f32>) -> Self {
        Self { id, dist, coords }
    }

    /// Does this candidate win over the other candidate?
    ///
    /// Total order: larger distance wins; exact ties are broken by the
    /// smaller frame identity. The tie-break is mandatory for determinism:
    /// distances can tie exactly (e.g. duplicated frames), and without a
    /// worker-count-independent resolution the selected center would depend
    /// on the partitioning.
    pub(super) fn wins_over(&self, other: &Candidate) -> bool {
        self.dist > other.dist || (self.dist == other.dist && self.id < other.id)
    }

    /// Turn the winning candidate into a cluster center.
    fn into_center(self) -> Center {
        Center::new(self.id, self.coords)
    }
}

/// Select `k` cluster centers using the distributed farthest-first heuristic.
///
/// Every worker calls this function with its own communication endpoint and
/// its owned range of the global frame ordering. All workers return the same
/// sequence of centers, in selection order.
///
/// The caller must ensure that the catalogue holds at least `k` frames.
pub(super) fn select_centers(
    comm: &Comm,
    catalog: &FrameCatalog,
    owned: Range<usize>,
    k: usize,
) -> Result<Vec<Center>, CommError> {
    assert!(
        k > 0 && k <= catalog.n_frames(),
        "FATAL CLUSTERLP ERROR | select::select_centers | Invalid number of clusters '{}' for '{}' frames. {}",
        k,
        catalog.n_frames(),
        PANIC_MESSAGE
    );

    let mut centers: Vec<Center> = Vec::with_capacity(k);
    // distance of each owned frame to its nearest selected center
    let mut min_dist = vec![f64::INFINITY; owned.len()];
    // frames already finalized as centers must never be proposed again;
    // an exactly duplicated frame ties a selected center at distance zero
    let mut selected = vec![false; owned.len()];

    // the first center is the globally smallest frame identity: all initial
    // proposals carry an infinite distance, so the identity tie-break alone
    // decides and the choice cannot depend on the partitioning
    let initial = owned.clone().next().map(|position| {
        let frame = catalog.frame(position);
        Candidate::new(frame.id(), f64::INFINITY, frame.coords().clone())
    });
    let mut winner = comm.reduce_candidate(initial)?;

    loop {
        // finalize the round's winner as the newest center on every worker
        let newest = if comm.is_root() {
            let candidate = winner.take().unwrap_or_else(|| {
                panic!(
                    "FATAL CLUSTERLP ERROR | select::select_centers | No candidate was proposed by any worker. {}",
                    PANIC_MESSAGE
                )
            });
            comm.broadcast_center(Some(candidate.into_center()))?
        } else {
            comm.broadcast_center(None)?
        };

        // update the nearest-center distances of the owned frames
        for (slot, position) in owned.clone().enumerate() {
            let frame = catalog.frame(position);
            if frame.id() == newest.id() {
                selected[slot] = true;
            }

            let dist = distance(frame.coords(), newest.coords());
            if dist < min_dist[slot] {
                min_dist[slot] = dist;
            }
        }

        centers.push(newest);
        if centers.len() == k {
            return Ok(centers);
        }

        // propose the farthest owned frame for the next round
        let mut local: Option<Candidate> = None;
        for (slot, position) in owned.clone().enumerate() {
            if selected[slot] {
                continue;
            }

            let frame = catalog.frame(position);
            let wins = match &local {
                None => true,
                Some(x) => {
                    min_dist[slot] > x.dist()
                        || (min_dist[slot] == x.dist() && frame.id() < x.id())
                }
            };

            if wins {
                local = Some(Candidate::new(
                    frame.id(),
                    min_dist[slot],
                    frame.coords().clone(),
                ));
            }
        }

        winner = comm.reduce_candidate(local)?;
    }
}
