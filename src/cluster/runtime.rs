// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Orchestration of the parallel clustering run.
//!
//! The requested number of workers is spawned as scoped threads sharing the
//! frame catalogue. The root (rank 0) runs on the calling thread; the
//! clustering protocol itself lives in [`select`](super::select),
//! [`assign`](super::assign) and [`aggregate`](super::aggregate).

use std::error::Error;

use crate::presentation::AssignmentRecord;
use crate::PANIC_MESSAGE;

use super::aggregate::validate_records;
use super::assign::assign_frames;
use super::comm::Comm;
use super::frames::{FrameCatalog, FrameId};
use super::partition::Partition;
use super::select::select_centers;

/// Run the parallel clustering with the given number of workers.
///
/// Returns the identities of the selected cluster centers (in selection
/// order) and one validated assignment record per frame (in global frame
/// order). The result is identical for any worker count.
///
/// The caller must ensure that the catalogue holds at least `k` frames.
pub(super) fn run(
    catalog: &FrameCatalog,
    k: usize,
    n_workers: usize,
) -> Result<(Vec<FrameId>, Vec<AssignmentRecord>), Box<dyn Error + Send + Sync>> {
    let partition = Partition::new(catalog.n_frames(), n_workers);
    let mut comms = Comm::connect(n_workers);
    let root = comms.remove(0);

    std::thread::scope(|s| {
        let handles: Vec<_> = comms
            .into_iter()
            .map(|comm| s.spawn(move || worker_main(&comm, catalog, partition, k)))
            .collect();

        let result = root_main(&root, catalog, partition, k);
        // closing the root's channels unblocks workers waiting in a collective
        drop(root);

        for handle in handles {
            let worker = handle.join().unwrap_or_else(|_| {
                panic!(
                    "FATAL CLUSTERLP ERROR | runtime::run | A worker thread panicked. {}",
                    PANIC_MESSAGE
                )
            });

            // a root-side error is reported in preference to the secondary
            // channel errors it causes on the workers
            if result.is_ok() {
                worker?;
            }
        }

        result
    })
}

fn root_main(
    comm: &Comm,
    catalog: &FrameCatalog,
    partition: Partition,
    k: usize,
) -> Result<(Vec<FrameId>, Vec<AssignmentRecord>), Box<dyn Error + Send + Sync>> {
    let owned = partition.range(comm.rank());

    let centers = select_centers(comm, catalog, owned.clone(), k)?;
    let local = assign_frames(catalog, owned, &centers);

    let gathered = comm.gather_records(local)?.unwrap_or_else(|| {
        panic!(
            "FATAL CLUSTERLP ERROR | runtime::root_main | Gather returned no records to the root. {}",
            PANIC_MESSAGE
        )
    });

    let records = validate_records(gathered, catalog)?;
    let centers = centers.iter().map(|center| center.id()).collect();

    Ok((centers, records))
}

fn worker_main(
    comm: &Comm,
    catalog: &FrameCatalog,
    partition: Partition,
    k: usize,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let owned = partition.range(comm.rank());

    let centers = select_centers(comm, catalog, owned.clone(), k)?;
    let local = assign_frames(catalog, owned, &centers);
    comm.gather_records(local)?;

    Ok(())
}
