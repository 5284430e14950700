// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Loading of the trajectory frames into the frame catalogue.

use std::path::{Path, PathBuf};

use groan_rs::errors::ReadTrajError;
use groan_rs::prelude::*;

use crate::errors::LoadError;
use crate::PANIC_MESSAGE;

use super::frames::{Frame, FrameCatalog, FrameId};
use super::index::LandmarkSelection;

/// Trajectory file formats that can be catalogued.
const SUPPORTED_EXTENSIONS: [&str; 3] = ["xtc", "trr", "gro"];

/// Read the topology (structure) file shared by all trajectories.
pub(super) fn read_topology(topology: impl AsRef<Path>) -> Result<System, LoadError> {
    System::from_file(topology.as_ref())
        .map_err(|e| LoadError::CouldNotReadTopology(Box::from(topology.as_ref()), e))
}

/// Collect the trajectory files with the requested extension, ordered by
/// filename. The filename order defines the trajectory part of every frame
/// identity and must be stable across runs and machines.
fn list_trajectories(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, LoadError> {
    let entries =
        std::fs::read_dir(dir).map_err(|_| LoadError::CouldNotReadDirectory(Box::from(dir)))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().and_then(|x| x.to_str()) == Some(extension)
        })
        .collect();

    if files.is_empty() {
        return Err(LoadError::NoTrajectoryFiles(
            Box::from(dir),
            extension.to_owned(),
        ));
    }

    files.sort_by_key(|path| path.file_name().map(|name| name.to_owned()));
    Ok(files)
}

/// Extract the landmark coordinates of the current frame, flattened in
/// ascending atom-index order.
fn extract_coords(
    system: &System,
    selection: &LandmarkSelection,
    file: &Path,
) -> Result<Vec<f32>, LoadError> {
    let mut coords = Vec::with_capacity(3 * selection.n_atoms());
    let mut wanted = selection.indices().iter().copied().peekable();

    for (index, atom) in system.atoms_iter().enumerate() {
        match wanted.peek() {
            Some(&w) if w == index => {
                let position = atom
                    .get_position()
                    .ok_or_else(|| LoadError::UndefinedPosition(Box::from(file), index))?;

                coords.extend([position.x, position.y, position.z]);
                wanted.next();
            }
            _ => (),
        }
    }

    Ok(coords)
}

/// Read all frames of a single trajectory file.
fn read_trajectory<'a>(
    reader: impl Iterator<Item = Result<&'a mut System, ReadTrajError>>,
    trajectory: u32,
    file: &Path,
    selection: &LandmarkSelection,
) -> Result<Vec<Frame>, LoadError> {
    let mut frames = Vec::new();

    for (index, frame) in reader.enumerate() {
        let frame =
            frame.map_err(|e| LoadError::CouldNotReadTrajectory(Box::from(file), e))?;
        let coords = extract_coords(frame, selection, file)?;

        frames.push(Frame::new(FrameId::new(trajectory, index as u32), coords));
    }

    if frames.is_empty() {
        return Err(LoadError::EmptyTrajectory(Box::from(file)));
    }

    Ok(frames)
}

/// Load all trajectory files of the given directory into a frame catalogue.
///
/// Trajectories are catalogued in filename order and every frame keeps only
/// the coordinates of the landmark atoms. The atom indices of the selection
/// must already be validated against the topology.
pub(super) fn load_catalog(
    mut system: System,
    trajectory_dir: impl AsRef<Path>,
    extension: &str,
    selection: &LandmarkSelection,
) -> Result<FrameCatalog, LoadError> {
    if !SUPPORTED_EXTENSIONS.contains(&extension) {
        return Err(LoadError::UnsupportedTrajectoryFormat(extension.to_owned()));
    }

    let files = list_trajectories(trajectory_dir.as_ref(), extension)?;

    let mut frames = Vec::new();
    let mut trajectories = Vec::with_capacity(files.len());

    for (t, file) in files.iter().enumerate() {
        let trajectory = t as u32;
        let open_err =
            |e: ReadTrajError| LoadError::CouldNotReadTrajectory(Box::from(file.as_path()), e);

        let read = match extension {
            "xtc" => read_trajectory(
                system.xtc_iter(file).map_err(open_err)?,
                trajectory,
                file,
                selection,
            )?,
            "trr" => read_trajectory(
                system.trr_iter(file).map_err(open_err)?,
                trajectory,
                file,
                selection,
            )?,
            "gro" => read_trajectory(
                system.gro_iter(file).map_err(open_err)?,
                trajectory,
                file,
                selection,
            )?,
            _ => panic!(
                "FATAL CLUSTERLP ERROR | loader::load_catalog | Unsupported extension '{}' escaped the format check. {}",
                extension, PANIC_MESSAGE
            ),
        };

        frames.extend(read);
        trajectories.push(
            file.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.to_string_lossy().into_owned()),
        );
    }

    Ok(FrameCatalog::from_frames(frames, trajectories))
}
