// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Structures and methods for presenting the results of the clustering.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use getset::{CopyGetters, Getters};

use crate::errors::WriteError;
use crate::input::Clustering;
use crate::prelude::FrameId;

macro_rules! write_result {
    ($dst:expr, $($arg:tt)*) => {
        write!($dst, $($arg)*).map_err(WriteError::CouldNotWriteResults)?
    };
}

/// Assignment of a single frame to a cluster.
#[derive(Debug, Clone, Copy, CopyGetters)]
pub struct AssignmentRecord {
    /// Identity of the assigned frame.
    #[getset(get_copy = "pub")]
    id: FrameId,
    /// Index of the nearest cluster center (in selection order).
    #[getset(get_copy = "pub")]
    cluster: usize,
}

impl AssignmentRecord {
    pub(crate) fn new(id: FrameId, cluster: usize) -> Self {
        Self { id, cluster }
    }
}

/// Specifies whether a file with the same name existed or not
/// and whether it has been overwritten or backed up.
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub(crate) enum FileStatus {
    New,
    Backup,
    Overwrite,
}

impl FileStatus {
    /// Log information about a file and what has been performed with it.
    fn info(self, filename: &str) {
        match self {
            Self::New => colog_info!("Written the cluster assignment into file '{}'.", filename),
            Self::Backup => colog_info!(
                "Backed up an already existing file '{}' and saved the cluster assignment.",
                filename,
            ),
            Self::Overwrite => colog_warn!(
                "Overwritten an already existing file '{}' with the cluster assignment.",
                filename,
            ),
        }
    }
}

/// Results of a finished clustering run.
#[derive(Debug, Clone, Getters)]
pub struct ClusterResults {
    /// Parameters the clustering was run with.
    #[getset(get = "pub")]
    clustering: Clustering,
    /// Identities of the selected cluster centers, in selection order.
    #[getset(get = "pub")]
    centers: Vec<FrameId>,
    /// One record per frame, sorted by frame identity.
    #[getset(get = "pub")]
    records: Vec<AssignmentRecord>,
    /// Names of the clustered trajectory files, in catalogue order.
    #[getset(get = "pub")]
    trajectories: Vec<String>,
}

impl ClusterResults {
    pub(crate) fn new(
        clustering: Clustering,
        centers: Vec<FrameId>,
        records: Vec<AssignmentRecord>,
        trajectories: Vec<String>,
    ) -> Self {
        Self {
            clustering,
            centers,
            records,
            trajectories,
        }
    }

    /// Write the frame-to-cluster assignment into the requested output file.
    ///
    /// Does nothing (apart from logging a warning) if no output file was
    /// requested. An already existing output file is backed up, unless
    /// overwriting was enabled.
    pub fn write(&self) -> Result<(), WriteError> {
        let filename = match self.clustering.output() {
            Some(x) => x,
            None => {
                colog_warn!(
                    "No output file was requested. The cluster assignment will {} be saved.",
                    "not"
                );
                return Ok(());
            }
        };

        let status = try_backup(filename, self.clustering.overwrite())?;

        let file = File::create(filename)
            .map_err(|_| WriteError::CouldNotCreateFile(Box::from(Path::new(filename))))?;
        let mut writer = BufWriter::new(file);
        self.write_results(&mut writer)?;
        writer
            .flush()
            .map_err(WriteError::CouldNotWriteResults)?;

        status.info(filename);
        Ok(())
    }

    /// Write the header and the assignment rows into an open output file.
    fn write_results(&self, writer: &mut impl Write) -> Result<(), WriteError> {
        write_result!(
            writer,
            "# Frame-to-cluster assignment calculated with 'clusterlp v{}'.\n",
            crate::CLUSTERLP_VERSION
        );
        write_result!(
            writer,
            "# Topology file '{}'; trajectory files: {}.\n",
            self.clustering.topology(),
            self.trajectories
                .iter()
                .map(|name| format!("'{}'", name))
                .collect::<Vec<String>>()
                .join(", ")
        );
        write_result!(
            writer,
            "# Assigned {} frames to {} clusters using {} workers.\n",
            self.records.len(),
            self.centers.len(),
            self.clustering.n_workers()
        );
        write_result!(writer, "# trj,index,cluster\n");

        for record in &self.records {
            write_result!(
                writer,
                "{},{},{}\n",
                record.id().trajectory(),
                record.id().frame(),
                record.cluster()
            );
        }

        Ok(())
    }
}

/// Back up an output file, if it is necessary and if it is requested.
fn try_backup(filename: impl AsRef<Path>, overwrite: bool) -> Result<FileStatus, WriteError> {
    if filename.as_ref().exists() {
        if !overwrite {
            backitup::backup(filename.as_ref())
                .map_err(|_| WriteError::CouldNotBackupFile(Box::from(filename.as_ref())))?;

            Ok(FileStatus::Backup)
        } else {
            Ok(FileStatus::Overwrite)
        }
    } else {
        Ok(FileStatus::New)
    }
}
