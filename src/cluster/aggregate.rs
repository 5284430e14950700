// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Validation and ordering of the gathered assignment records.

use hashbrown::HashSet;

use crate::errors::AggregationError;
use crate::presentation::AssignmentRecord;

use super::frames::FrameCatalog;

/// Validate the assignment records gathered from all workers and sort them
/// into the global frame order.
///
/// Exactly one record must exist for every frame of the catalogue. A missing,
/// duplicated, or extraneous record means a partitioning or synchronization
/// bug and aborts the run.
pub(super) fn validate_records(
    mut records: Vec<AssignmentRecord>,
    catalog: &FrameCatalog,
) -> Result<Vec<AssignmentRecord>, AggregationError> {
    if records.len() != catalog.n_frames() {
        return Err(AggregationError::UnexpectedRecordCount {
            gathered: records.len(),
            expected: catalog.n_frames(),
        });
    }

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id()) {
            return Err(AggregationError::DuplicateRecord(record.id()));
        }
    }

    records.sort_by_key(|record| record.id());

    // with the counts equal and the identities unique, any mismatch with the
    // catalogue means that some frame has no record
    for (record, frame) in records.iter().zip(catalog.iter()) {
        if record.id() != frame.id() {
            return Err(AggregationError::MissingRecord(frame.id()));
        }
    }

    Ok(records)
}
