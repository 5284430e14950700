// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Assignment of the frames to their nearest cluster center.

use std::ops::Range;

use crate::presentation::AssignmentRecord;
use crate::PANIC_MESSAGE;

use super::frames::FrameCatalog;
use super::metric::distance;
use super::select::Center;

/// Assign every owned frame to its nearest cluster center.
///
/// The cluster label of a frame is the index of its nearest center in the
/// selection order. Exact distance ties are resolved in favor of the center
/// selected earlier; the strict comparison below guarantees that, and keeps
/// the assignment independent of the number of workers.
pub(super) fn assign_frames(
    catalog: &FrameCatalog,
    owned: Range<usize>,
    centers: &[Center],
) -> Vec<AssignmentRecord> {
    assert!(
        !centers.is_empty(),
        "FATAL CLUSTERLP ERROR | assign::assign_frames | No cluster centers were provided. {}",
        PANIC_MESSAGE
    );

    let mut records = Vec::with_capacity(owned.len());

    for position in owned {
        let frame = catalog.frame(position);

        let mut cluster = 0;
        let mut nearest = distance(frame.coords(), centers[0].coords());

        for (i, center) in centers.iter().enumerate().skip(1) {
            let dist = distance(frame.coords(), center.coords());
            if dist < nearest {
                nearest = dist;
                cluster = i;
            }
        }

        records.push(AssignmentRecord::new(frame.id(), cluster));
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::frames::{Frame, FrameId};

    fn line_catalog(positions: &[f32]) -> FrameCatalog {
        let frames = positions
            .iter()
            .enumerate()
            .map(|(i, &x)| Frame::new(FrameId::new(0, i as u32), vec![x, 0.0, 0.0]))
            .collect();

        FrameCatalog::from_frames(frames, vec!["traj.xtc".to_owned()])
    }

    fn center(x: f32) -> Center {
        Center::new(FrameId::new(9, 9), vec![x, 0.0, 0.0])
    }

    #[test]
    fn test_nearest_center() {
        let catalog = line_catalog(&[0.0, 1.0, 9.0, 6.0]);
        let centers = vec![center(0.0), center(10.0)];

        let records = assign_frames(&catalog, 0..4, &centers);

        let clusters: Vec<usize> = records.iter().map(|r| r.cluster()).collect();
        assert_eq!(clusters, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_tie_prefers_earlier_center() {
        // the frame at x=5 is equidistant from both centers
        let catalog = line_catalog(&[5.0]);
        let centers = vec![center(0.0), center(10.0)];

        let records = assign_frames(&catalog, 0..1, &centers);

        assert_eq!(records[0].cluster(), 0);
    }

    #[test]
    fn test_partial_range() {
        let catalog = line_catalog(&[0.0, 1.0, 9.0, 6.0]);
        let centers = vec![center(0.0), center(10.0)];

        let records = assign_frames(&catalog, 2..4, &centers);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), FrameId::new(0, 2));
        assert_eq!(records[1].id(), FrameId::new(0, 3));
    }

    #[test]
    fn test_empty_range() {
        let catalog = line_catalog(&[0.0, 1.0]);
        let centers = vec![center(0.0)];

        assert!(assign_frames(&catalog, 1..1, &centers).is_empty());
    }

    #[test]
    #[should_panic]
    fn test_no_centers() {
        let catalog = line_catalog(&[0.0]);
        assign_frames(&catalog, 0..1, &[]);
    }
}
