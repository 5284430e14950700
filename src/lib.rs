// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! # clusterlp: deterministic parallel landmark clustering of MD trajectories
//!
//! A crate for clustering molecular dynamics trajectory frames using the
//! farthest-first (k-center) heuristic, evaluated in parallel across a
//! configurable number of workers.
//!
//! The defining property of `clusterlp` is that the result does **not** depend
//! on the number of workers used: running the same input with 1 worker or with
//! 9 workers produces the same frame-to-cluster assignment. Every decision
//! point of the greedy algorithm reduces over a global view with a total,
//! worker-count-independent tie-break.
//!
//! ## Usage
//!
//! ```bash
//! $ cargo add clusterlp
//! ```
//!
//! Import the prelude in your Rust code:
//!
//! ```rust
//! use clusterlp::prelude::*;
//! ```
//!
//! `clusterlp` is also available as a command-line tool:
//!
//! ```bash
//! $ cargo install clusterlp
//! ```
//!
//! ## Quick example
//!
//! ```no_run
//! use clusterlp::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     // Construct the clustering request
//!     let clustering = Clustering::builder()
//!         .pi("pi.dat")                 // First landmark index file
//!         .li("li.dat")                 // Second landmark index file
//!         .trajectory_dir("trajs")      // Directory with trajectory files
//!         .extension("xtc")             // Extension of the trajectory files
//!         .topology("top.pdb")          // Topology (structure) file
//!         .n_clusters(30)               // Number of cluster centers to select
//!         .output("clusters.csv")       // Output file
//!         .n_workers(4)                 // Number of parallel workers
//!         .build()?;                    // Build the request
//!
//!     // Activate colog for logging (requires the `colog` crate)
//!     colog::init();
//!
//!     // Run the clustering and write the output
//!     clustering.run()?.write()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! Alternatively, construct the request from a YAML file shared with the CLI:
//!
//! ```no_run
//! # use clusterlp::prelude::*;
//! #
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let clustering = Clustering::from_file("clustering.yaml")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## How it works
//!
//! 1. All trajectory files in the given directory are catalogued in a fixed
//!    global order (trajectories by filename, frames by position). Every frame
//!    keeps only the coordinates of the atoms selected by the two landmark
//!    index files.
//! 2. The catalogue is block-partitioned across the workers. The partitioning
//!    never influences the result; it only distributes the work.
//! 3. Cluster centers are selected greedily: each round, the frame farthest
//!    from all already-selected centers (ties broken by smallest frame
//!    identity) becomes the next center. Rounds are synchronized through
//!    broadcast and reduce collectives rooted at worker 0.
//! 4. Each worker assigns its frames to the nearest center and worker 0
//!    gathers, validates, and sorts the records.

/// Version of the `clusterlp` crate.
pub const CLUSTERLP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Message that should be added to every panic.
pub(crate) const PANIC_MESSAGE: &str =
    "\n\n\n            >>> THIS SHOULD NOT HAVE HAPPENED! PLEASE REPORT THIS ERROR <<<
(open an issue at 'github.com/Ladme/clusterlp/issues' or write an e-mail to 'ladmeb@gmail.com')\n\n";

/// Log colored info message.
#[macro_export]
macro_rules! colog_info {
    ($msg:expr) => {
        log::info!($msg)
    };
    ($msg:expr, $($arg:expr),+ $(,)?) => {{
        use colored::Colorize;
        log::info!($msg, $( $arg.to_string().cyan() ),+)
    }};
}

/// Log colored warning message.
#[macro_export]
macro_rules! colog_warn {
    ($msg:expr) => {
        log::warn!($msg)
    };
    ($msg:expr, $($arg:expr),+ $(,)?) => {{
        use colored::Colorize;
        log::warn!($msg, $( $arg.to_string().yellow() ),+)
    }};
}

mod cluster;
pub mod errors;
pub mod input;
pub mod presentation;

/// This module contains re-exported public structures of the `clusterlp` crate.
pub mod prelude {
    pub use super::cluster::frames::FrameId;
    pub use super::input::{Clustering, ClusteringBuilder};
    pub use super::presentation::{AssignmentRecord, ClusterResults};
}
