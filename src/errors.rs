// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! This module contains error types that can be returned by the `clusterlp` crate.

use std::error::Error;
use std::path::Path;

use colored::{ColoredString, Colorize};
use groan_rs::errors::ReadTrajError;
use thiserror::Error;

use crate::cluster::frames::FrameId;

fn path_to_yellow(path: &Path) -> ColoredString {
    path.to_str().unwrap().yellow()
}

/// Errors that can occur when constructing a `Clustering` structure from the provided configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{} could not open the configuration file '{}'", "error:".red().bold(), .0.yellow())]
    CouldNotOpenConfig(String),

    #[error("{} could not understand the contents of the configuration file '{}' ({})", "error:".red().bold(), .0.yellow(), .1
    )]
    CouldNotParseConfig(String, serde_yaml::Error),

    #[error("{} the specified value of '{}' is invalid (must be positive)", "error:".red().bold(), "n_clusters".yellow()
    )]
    InvalidClusterCount,

    #[error("{} the specified value of '{}' is invalid (must be positive)", "error:".red().bold(), "n_workers".yellow()
    )]
    InvalidWorkerCount,
}

/// Errors that can occur when reading the input files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{} could not open the index file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotOpenIndexFile(Box<Path>),

    #[error("{} could not parse '{}' in the index file '{}' as an atom index", "error:".red().bold(), .1.yellow(), path_to_yellow(.0))]
    CouldNotParseIndex(Box<Path>, String),

    #[error("{} the index file '{}' contains no atom indices", "error:".red().bold(), path_to_yellow(.0))]
    EmptyIndexFile(Box<Path>),

    #[error("{} atom index '{}' from the index file '{}' does not exist in the topology (the topology contains '{}' atoms)",
    "error:".red().bold(), .index.to_string().yellow(), path_to_yellow(.file), .n_atoms.to_string().yellow())]
    IndexOutOfRange {
        file: Box<Path>,
        index: usize,
        n_atoms: usize,
    },

    #[error("{} could not read the topology file '{}' ({})", "error:".red().bold(), path_to_yellow(.0), .1)]
    CouldNotReadTopology(Box<Path>, Box<dyn Error + Send + Sync>),

    #[error("{} could not read the trajectory directory '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotReadDirectory(Box<Path>),

    #[error("{} no trajectory files with the extension '{}' found in the directory '{}'", "error:".red().bold(), .1.yellow(), path_to_yellow(.0))]
    NoTrajectoryFiles(Box<Path>, String),

    #[error("{} trajectory files with the extension '{}' are not supported (supported extensions are '{}', '{}', and '{}')",
    "error:".red().bold(), .0.yellow(), "xtc".bright_blue(), "trr".bright_blue(), "gro".bright_blue())]
    UnsupportedTrajectoryFormat(String),

    #[error("{} could not read the trajectory file '{}' ({})", "error:".red().bold(), path_to_yellow(.0), .1)]
    CouldNotReadTrajectory(Box<Path>, ReadTrajError),

    #[error("{} atom with atom index '{}' in the trajectory file '{}' has an undefined position",
    "error:".red().bold(), .1.to_string().yellow(), path_to_yellow(.0))]
    UndefinedPosition(Box<Path>, usize),

    #[error("{} the trajectory file '{}' contains no frames", "error:".red().bold(), path_to_yellow(.0))]
    EmptyTrajectory(Box<Path>),
}

/// Errors that can occur while selecting the cluster centers.
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("{} requested '{}' cluster centers but only '{}' frames were loaded",
    "error:".red().bold(), .requested.to_string().yellow(), .available.to_string().yellow())]
    InsufficientFrames { available: usize, requested: usize },
}

/// Errors that can occur during a collective operation between workers.
///
/// These errors are fatal and the run is never retried.
#[derive(Error, Debug)]
pub enum CommError {
    #[error("{} lost connection to worker '{}' during a collective operation (did the worker crash?)",
    "error:".red().bold(), .0.to_string().yellow())]
    WorkerLost(usize),

    #[error("{} lost connection to the root worker during a collective operation (did the root crash?)", "error:".red().bold())]
    RootLost,

    #[error("{} worker '{}' received an unexpected message during the '{}' collective",
    "error:".red().bold(), .rank.to_string().yellow(), .collective.yellow())]
    UnexpectedMessage {
        rank: usize,
        collective: &'static str,
    },
}

/// Errors that can occur when gathering the assignment records.
///
/// Any of these errors indicates a partitioning or synchronization bug.
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("{} no assignment record was gathered for frame '{}' of trajectory '{}'",
    "error:".red().bold(), .0.frame().to_string().yellow(), .0.trajectory().to_string().yellow())]
    MissingRecord(FrameId),

    #[error("{} multiple assignment records were gathered for frame '{}' of trajectory '{}'",
    "error:".red().bold(), .0.frame().to_string().yellow(), .0.trajectory().to_string().yellow())]
    DuplicateRecord(FrameId),

    #[error("{} gathered '{}' assignment records but '{}' frames were loaded",
    "error:".red().bold(), .gathered.to_string().yellow(), .expected.to_string().yellow())]
    UnexpectedRecordCount { gathered: usize, expected: usize },
}

/// Errors that can occur while writing the results.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("{} could not create file '{}'", "error:".red().bold(), path_to_yellow(.0))]
    CouldNotCreateFile(Box<Path>),

    #[error("{} could not create a backup for file '{}'", "error:".red().bold(), path_to_yellow(.0)
    )]
    CouldNotBackupFile(Box<Path>),

    #[error("{} could not write results to the output file ({})", "error:".red().bold(), .0)]
    CouldNotWriteResults(std::io::Error),
}
