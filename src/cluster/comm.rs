// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Collective communication primitives between the workers.
//!
//! All collectives are rooted at worker 0. Each worker is connected to the
//! root by a pair of channels; workers never talk to each other directly.
//! Every collective is a synchronization point: a worker blocks until the
//! root has served it and vice versa. A closed channel means a crashed
//! participant and surfaces as a fatal [`CommError`]; the run is never
//! retried.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::errors::CommError;
use crate::presentation::AssignmentRecord;
use crate::PANIC_MESSAGE;

use super::select::{Candidate, Center};

/// A message exchanged between the root and a worker.
#[derive(Debug, Clone)]
pub(super) enum Packet {
    /// A newly selected cluster center (root to workers).
    Center(Center),
    /// A local farthest-frame candidate (workers to root).
    Candidate(Option<Candidate>),
    /// Locally computed assignment records (workers to root).
    Records(Vec<AssignmentRecord>),
}

/// One participant's endpoint of the collective communication group.
#[derive(Debug)]
pub(super) enum Comm {
    /// Worker 0: connected to every other worker.
    Root {
        /// Senders to workers 1.. (index 0 corresponds to rank 1).
        to_workers: Vec<Sender<Packet>>,
        /// Receivers from workers 1.. (index 0 corresponds to rank 1).
        from_workers: Vec<Receiver<Packet>>,
    },
    /// Any other worker: connected to the root only.
    Worker {
        rank: usize,
        to_root: Sender<Packet>,
        from_root: Receiver<Packet>,
    },
}

impl Comm {
    /// Create a fully connected communication group for `n_workers` workers.
    ///
    /// Returns one endpoint per worker, ordered by rank (the root first).
    ///
    /// ## Panics
    /// Panics if `n_workers` is zero.
    pub(super) fn connect(n_workers: usize) -> Vec<Comm> {
        assert!(
            n_workers > 0,
            "FATAL CLUSTERLP ERROR | Comm::connect | Number of workers must be positive. {}",
            PANIC_MESSAGE
        );

        let mut to_workers = Vec::with_capacity(n_workers - 1);
        let mut from_workers = Vec::with_capacity(n_workers - 1);
        let mut endpoints = Vec::with_capacity(n_workers);

        for rank in 1..n_workers {
            let (root_tx, worker_rx) = channel();
            let (worker_tx, root_rx) = channel();

            to_workers.push(root_tx);
            from_workers.push(root_rx);
            endpoints.push(Comm::Worker {
                rank,
                to_root: worker_tx,
                from_root: worker_rx,
            });
        }

        endpoints.insert(
            0,
            Comm::Root {
                to_workers,
                from_workers,
            },
        );

        endpoints
    }

    /// Get the rank of this worker.
    pub(super) fn rank(&self) -> usize {
        match self {
            Comm::Root { .. } => 0,
            Comm::Worker { rank, .. } => *rank,
        }
    }

    /// Is this worker the root of the collectives?
    pub(super) fn is_root(&self) -> bool {
        matches!(self, Comm::Root { .. })
    }

    /// Broadcast a newly selected cluster center from the root to all workers.
    ///
    /// The root must provide the center; all other workers must pass `None`.
    /// Every worker (including the root) returns the broadcast center.
    pub(super) fn broadcast_center(&self, center: Option<Center>) -> Result<Center, CommError> {
        match self {
            Comm::Root { to_workers, .. } => {
                let center = center.unwrap_or_else(|| {
                    panic!(
                        "FATAL CLUSTERLP ERROR | Comm::broadcast_center | Root must provide the center to broadcast. {}",
                        PANIC_MESSAGE
                    )
                });

                for (i, tx) in to_workers.iter().enumerate() {
                    tx.send(Packet::Center(center.clone()))
                        .map_err(|_| CommError::WorkerLost(i + 1))?;
                }

                Ok(center)
            }
            Comm::Worker { rank, from_root, .. } => {
                match from_root.recv().map_err(|_| CommError::RootLost)? {
                    Packet::Center(center) => Ok(center),
                    _ => Err(CommError::UnexpectedMessage {
                        rank: *rank,
                        collective: "broadcast_center",
                    }),
                }
            }
        }
    }

    /// Reduce the local farthest-frame candidates to the root.
    ///
    /// Workers owning no frames pass `None`. The root returns the winning
    /// candidate (larger distance wins, ties broken by smaller frame
    /// identity); all other workers return `Ok(None)`.
    ///
    /// The comparison is a total order, so the result does not depend on the
    /// order in which the candidates are received.
    pub(super) fn reduce_candidate(
        &self,
        local: Option<Candidate>,
    ) -> Result<Option<Candidate>, CommError> {
        match self {
            Comm::Root { from_workers, .. } => {
                let mut best = local;

                for (i, rx) in from_workers.iter().enumerate() {
                    let candidate = match rx.recv().map_err(|_| CommError::WorkerLost(i + 1))? {
                        Packet::Candidate(candidate) => candidate,
                        _ => {
                            return Err(CommError::UnexpectedMessage {
                                rank: 0,
                                collective: "reduce_candidate",
                            })
                        }
                    };

                    best = match (best, candidate) {
                        (None, x) => x,
                        (x, None) => x,
                        (Some(a), Some(b)) => {
                            if b.wins_over(&a) {
                                Some(b)
                            } else {
                                Some(a)
                            }
                        }
                    };
                }

                Ok(best)
            }
            Comm::Worker { to_root, .. } => {
                to_root
                    .send(Packet::Candidate(local))
                    .map_err(|_| CommError::RootLost)?;

                Ok(None)
            }
        }
    }

    /// Gather the locally computed assignment records to the root.
    ///
    /// The root returns the records of all workers concatenated in rank
    /// order; all other workers return `Ok(None)`.
    pub(super) fn gather_records(
        &self,
        local: Vec<AssignmentRecord>,
    ) -> Result<Option<Vec<AssignmentRecord>>, CommError> {
        match self {
            Comm::Root { from_workers, .. } => {
                let mut records = local;

                for (i, rx) in from_workers.iter().enumerate() {
                    match rx.recv().map_err(|_| CommError::WorkerLost(i + 1))? {
                        Packet::Records(worker_records) => records.extend(worker_records),
                        _ => {
                            return Err(CommError::UnexpectedMessage {
                                rank: 0,
                                collective: "gather_records",
                            })
                        }
                    }
                }

                Ok(Some(records))
            }
            Comm::Worker { to_root, .. } => {
                to_root
                    .send(Packet::Records(local))
                    .map_err(|_| CommError::RootLost)?;

                Ok(None)
            }
        }
    }
}
