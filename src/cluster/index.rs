// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Reading and validation of the landmark atom index files.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use getset::Getters;

use crate::errors::LoadError;

/// An ordered set of atom indices read from a whitespace/line-delimited file.
#[derive(Debug, Clone, Getters)]
pub(crate) struct AtomIndexSet {
    /// Path of the file the indices were read from. Kept for error reporting.
    file: PathBuf,
    /// The atom indices, in file order.
    #[getset(get = "pub(crate)")]
    indices: Vec<usize>,
}

impl AtomIndexSet {
    /// Read atom indices from a file. The indices may be separated by any whitespace.
    pub(crate) fn from_file(file: impl AsRef<Path>) -> Result<Self, LoadError> {
        let content = read_to_string(file.as_ref())
            .map_err(|_| LoadError::CouldNotOpenIndexFile(Box::from(file.as_ref())))?;

        let mut indices = Vec::new();
        for token in content.split_whitespace() {
            let index = token.parse::<usize>().map_err(|_| {
                LoadError::CouldNotParseIndex(Box::from(file.as_ref()), token.to_owned())
            })?;
            indices.push(index);
        }

        if indices.is_empty() {
            return Err(LoadError::EmptyIndexFile(Box::from(file.as_ref())));
        }

        Ok(Self {
            file: file.as_ref().to_owned(),
            indices,
        })
    }

    /// Check that all indices exist in a topology with the given number of atoms.
    pub(crate) fn validate(&self, n_atoms: usize) -> Result<(), LoadError> {
        for &index in &self.indices {
            if index >= n_atoms {
                return Err(LoadError::IndexOutOfRange {
                    file: Box::from(self.file.as_path()),
                    index,
                    n_atoms,
                });
            }
        }

        Ok(())
    }
}

/// The merged landmark selection used by the distance metric.
///
/// Merging the two index sets into a single sorted, deduplicated list fixes
/// both the coordinate subset stored per frame and the accumulation order of
/// the metric. The order is part of the determinism contract: distances must
/// be bit-identical no matter which worker computes them.
#[derive(Debug, Clone, Getters)]
pub(crate) struct LandmarkSelection {
    /// Selected atom indices in ascending order, without duplicates.
    #[getset(get = "pub(crate)")]
    indices: Vec<usize>,
}

impl LandmarkSelection {
    /// Merge two index sets into a canonical selection.
    pub(crate) fn new(pi: &AtomIndexSet, li: &AtomIndexSet) -> Self {
        let mut indices: Vec<usize> = pi
            .indices()
            .iter()
            .chain(li.indices().iter())
            .copied()
            .collect();
        indices.sort_unstable();
        indices.dedup();

        Self { indices }
    }

    /// Get the number of selected atoms.
    pub(crate) fn n_atoms(&self) -> usize {
        self.indices.len()
    }
}
