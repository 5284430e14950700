// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Implementation of the `clusterlp` command line application.

use clap::Parser;
use clusterlp::prelude::*;

/// Deterministic parallel landmark clustering of molecular dynamics trajectories.
#[derive(Parser, Debug)]
#[command(name = "clusterlp", author, version, about)]
struct Args {
    /// Path to the first landmark index file (e.g. protein atoms).
    #[arg(long)]
    pi: String,

    /// Path to the second landmark index file (e.g. ligand atoms).
    #[arg(long)]
    li: String,

    /// Path to the directory containing the trajectory files to cluster.
    #[arg(long = "traj-dir")]
    trajectory_dir: String,

    /// Extension of the trajectory files ('xtc', 'trr', or 'gro').
    #[arg(long = "ext", default_value = "xtc")]
    extension: String,

    /// Path to the topology (structure) file shared by all trajectories.
    #[arg(long = "top")]
    topology: String,

    /// Number of cluster centers to select.
    #[arg(short = 'k', long = "n-clusters")]
    n_clusters: usize,

    /// Path to the output file for the frame-to-cluster assignment.
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Number of parallel workers. Does not influence the result.
    #[arg(short = 'n', long = "workers", default_value_t = 1)]
    n_workers: usize,

    /// Print nothing to the standard output.
    #[arg(long)]
    silent: bool,

    /// Overwrite an existing output file without creating a backup.
    #[arg(long)]
    overwrite: bool,
}

fn clustering_from_args(args: Args) -> Result<Clustering, String> {
    let mut builder = Clustering::builder();
    builder
        .pi(args.pi)
        .li(args.li)
        .trajectory_dir(args.trajectory_dir)
        .extension(args.extension)
        .topology(args.topology)
        .n_clusters(args.n_clusters)
        .n_workers(args.n_workers);

    if let Some(output) = args.output {
        builder.output(output);
    }
    if args.silent {
        builder.silent();
    }
    if args.overwrite {
        builder.overwrite();
    }

    builder.build().map_err(|e| e.to_string())
}

/// Run the clustering application. Returns `true` if successful.
pub(crate) fn run() -> bool {
    let args = Args::parse();

    let clustering = match clustering_from_args(args) {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };

    if clustering.silent() {
        colog::default_builder()
            .filter_level(log::LevelFilter::Error)
            .init();
    } else {
        colog::init();
    }

    let results = match clustering.run() {
        Ok(x) => x,
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };

    match results.write() {
        Ok(()) => true,
        Err(e) => {
            eprintln!("{}", e);
            false
        }
    }
}
