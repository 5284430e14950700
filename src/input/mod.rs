// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! This module contains structures and methods for specifying parameters of the clustering.

pub mod clustering;

pub use clustering::{Clustering, ClusteringBuilder};
