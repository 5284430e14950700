// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Contains the implementation of the main `Clustering` structure and its methods.

use std::fs::read_to_string;
use std::path::Path;

use derive_builder::Builder;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Structure holding all the information necessary to perform the clustering.
#[derive(Debug, Clone, Builder, Getters, CopyGetters, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Clustering {
    /// Path to the first landmark index file (a whitespace/line-delimited list
    /// of atom indices, e.g. protein atoms).
    #[builder(setter(into))]
    #[getset(get = "pub")]
    pi: String,

    /// Path to the second landmark index file (e.g. ligand atoms).
    #[builder(setter(into))]
    #[getset(get = "pub")]
    li: String,

    /// Path to the directory containing the trajectory files to cluster.
    #[builder(setter(into))]
    #[getset(get = "pub")]
    #[serde(alias = "traj_dir")]
    trajectory_dir: String,

    /// Extension of the trajectory files inside the trajectory directory.
    /// All files with this extension will be loaded. Defaults to 'xtc'.
    #[builder(setter(into), default = "String::from(\"xtc\")")]
    #[serde(default = "default_extension", alias = "ext")]
    #[getset(get = "pub")]
    extension: String,

    /// Path to a structure file (GRO, PDB, TPR, or PQR) describing the atom
    /// layout shared by all trajectories.
    #[builder(setter(into))]
    #[getset(get = "pub")]
    #[serde(alias = "top")]
    topology: String,

    /// Number of cluster centers to select. Must be positive and must not
    /// exceed the total number of loaded frames.
    #[builder(setter(custom))]
    #[getset(get_copy = "pub")]
    #[serde(alias = "k")]
    n_clusters: usize,

    /// Optional path to the output file where the frame-to-cluster assignment
    /// will be saved.
    #[builder(setter(into, strip_option), default)]
    #[getset(get = "pub")]
    output: Option<String>,

    /// Number of parallel workers used for the clustering. Defaults to 1.
    ///
    /// The result of the clustering does not depend on this value.
    #[builder(setter(custom), default = "1")]
    #[serde(default = "default_one")]
    #[getset(get_copy = "pub")]
    n_workers: usize,

    /// If true, suppress all output to the standard output during the clustering.
    #[builder(setter(custom), default = "false")]
    #[serde(default = "default_false")]
    #[getset(get_copy = "pub")]
    silent: bool,

    /// If true, overwrite an existing output file without creating a backup.
    #[builder(setter(custom), default = "false")]
    #[serde(default = "default_false")]
    #[getset(get_copy = "pub")]
    overwrite: bool,
}

fn default_extension() -> String {
    String::from("xtc")
}

fn default_one() -> usize {
    1
}

fn default_false() -> bool {
    false
}

fn validate_n_clusters(n_clusters: usize) -> Result<(), ConfigError> {
    if n_clusters == 0 {
        Err(ConfigError::InvalidClusterCount)
    } else {
        Ok(())
    }
}

fn validate_n_workers(n_workers: usize) -> Result<(), ConfigError> {
    if n_workers == 0 {
        Err(ConfigError::InvalidWorkerCount)
    } else {
        Ok(())
    }
}

impl Clustering {
    /// Start providing the clustering parameters.
    pub fn builder() -> ClusteringBuilder {
        ClusteringBuilder::default()
    }

    /// Read parameters of the clustering from an input YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Clustering, ConfigError> {
        let string = read_to_string(&path).map_err(|_| {
            ConfigError::CouldNotOpenConfig(path.as_ref().to_str().unwrap().to_owned())
        })?;
        let clustering: Clustering = serde_yaml::from_str(&string).map_err(|e| {
            ConfigError::CouldNotParseConfig(path.as_ref().to_str().unwrap().to_owned(), e)
        })?;

        clustering.validate()?;
        Ok(clustering)
    }

    /// Check that the Clustering structure is valid. Used after deserialization from a config yaml file.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_n_clusters(self.n_clusters)?;
        validate_n_workers(self.n_workers)?;

        Ok(())
    }
}

impl ClusteringBuilder {
    /// Number of cluster centers to select.
    pub fn n_clusters(&mut self, n_clusters: usize) -> &mut Self {
        self.n_clusters = Some(n_clusters);
        self
    }

    /// Number of parallel workers used for the clustering.
    pub fn n_workers(&mut self, n_workers: usize) -> &mut Self {
        self.n_workers = Some(n_workers);
        self
    }

    /// Be silent. Print nothing to the standard output during the clustering.
    #[inline(always)]
    pub fn silent(&mut self) -> &mut Self {
        self.silent = Some(true);
        self
    }

    /// Do not make backups. Overwrite the output file.
    #[inline(always)]
    pub fn overwrite(&mut self) -> &mut Self {
        self.overwrite = Some(true);
        self
    }

    /// Validate the process of building the clustering request.
    fn validate(&self) -> Result<(), String> {
        if let Some(n_clusters) = self.n_clusters {
            validate_n_clusters(n_clusters).map_err(|e| e.to_string())?;
        }

        if let Some(n_workers) = self.n_workers {
            validate_n_workers(n_workers).map_err(|e| e.to_string())?;
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests_builder {
    use super::*;

    #[test]
    fn clustering_builder_pass() {
        let clustering = Clustering::builder()
            .pi("pi.dat")
            .li("li.dat")
            .trajectory_dir("trajs")
            .extension("gro")
            .topology("top.gro")
            .n_clusters(30)
            .output("out.csv")
            .n_workers(8)
            .silent()
            .overwrite()
            .build()
            .unwrap();

        assert_eq!(clustering.extension(), "gro");
        assert_eq!(clustering.n_clusters(), 30);
        assert_eq!(clustering.n_workers(), 8);
        assert!(clustering.silent());
        assert!(clustering.overwrite());
    }

    #[test]
    fn clustering_builder_fail_zero_clusters() {
        match Clustering::builder()
            .pi("pi.dat")
            .li("li.dat")
            .trajectory_dir("trajs")
            .topology("top.gro")
            .n_clusters(0)
            .build()
        {
            Ok(_) => panic!("Function should have failed."),
            Err(_) => (),
        }
    }

    #[test]
    fn clustering_builder_fail_zero_workers() {
        match Clustering::builder()
            .pi("pi.dat")
            .li("li.dat")
            .trajectory_dir("trajs")
            .topology("top.gro")
            .n_clusters(5)
            .n_workers(0)
            .build()
        {
            Ok(_) => panic!("Function should have failed."),
            Err(_) => (),
        }
    }

    #[test]
    fn clustering_builder_fail_missing_field() {
        match Clustering::builder().pi("pi.dat").build() {
            Ok(_) => panic!("Function should have failed."),
            Err(_) => (),
        }
    }
}
