// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! This module contains the implementation of the clustering itself.

use std::error::Error;

use crate::errors::ClusterError;
use crate::input::Clustering;
use crate::presentation::ClusterResults;

mod aggregate;
mod assign;
mod comm;
pub(crate) mod frames;
mod index;
mod loader;
mod metric;
mod partition;
mod runtime;
mod select;

use index::{AtomIndexSet, LandmarkSelection};

impl Clustering {
    /// Perform the clustering.
    pub fn run(self) -> Result<ClusterResults, Box<dyn Error + Send + Sync>> {
        colog_info!(
            "Running 'clusterlp v{}' with '{}' worker threads.",
            crate::CLUSTERLP_VERSION,
            self.n_workers()
        );

        let pi = AtomIndexSet::from_file(self.pi())?;
        let li = AtomIndexSet::from_file(self.li())?;

        let system = loader::read_topology(self.topology())?;
        pi.validate(system.get_n_atoms())?;
        li.validate(system.get_n_atoms())?;

        let selection = LandmarkSelection::new(&pi, &li);
        colog_info!(
            "Selected '{}' landmark atoms from the index files '{}' and '{}'.",
            selection.n_atoms(),
            self.pi(),
            self.li()
        );

        let catalog = loader::load_catalog(
            system,
            self.trajectory_dir(),
            self.extension(),
            &selection,
        )?;
        colog_info!(
            "Loaded '{}' frames from '{}' trajectory files.",
            catalog.n_frames(),
            catalog.trajectories().len()
        );

        if catalog.n_frames() < self.n_clusters() {
            return Err(Box::new(ClusterError::InsufficientFrames {
                available: catalog.n_frames(),
                requested: self.n_clusters(),
            }));
        }

        colog_info!("Selecting '{}' cluster centers.", self.n_clusters());
        let (centers, records) = runtime::run(&catalog, self.n_clusters(), self.n_workers())?;
        colog_info!("Finished the clustering.");

        let trajectories = catalog.trajectories().clone();
        Ok(ClusterResults::new(self, centers, records, trajectories))
    }
}
