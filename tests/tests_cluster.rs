// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! End-to-end tests of the clustering.

mod common;

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

use clusterlp::errors::ClusterError;
use clusterlp::prelude::*;

use common::{diff_files_ignore_first, read_assignment, write_gro};

/// Build a clustering request for the static fixtures under `tests/files`.
fn fixture_clustering(k: usize, n_workers: usize, output: &Path) -> Clustering {
    Clustering::builder()
        .pi("tests/files/pi.dat")
        .li("tests/files/li.dat")
        .trajectory_dir("tests/files/trajs")
        .extension("gro")
        .topology("tests/files/top.gro")
        .n_clusters(k)
        .n_workers(n_workers)
        .output(output.to_str().unwrap())
        .silent()
        .build()
        .unwrap()
}

#[test]
fn test_fixtures_two_clusters() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("clusters.csv");

    fixture_clustering(2, 1, &output)
        .run()
        .unwrap()
        .write()
        .unwrap();

    // trajectory 'a' holds frames shifted by 0.0, 0.2 and 0.5 nm, trajectory
    // 'b' by 1.0 and 1.3 nm; the farthest-first centers are (0, 0) and (1, 1)
    assert_eq!(
        read_assignment(output.to_str().unwrap()),
        vec![(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 0, 1), (1, 1, 1)]
    );
}

#[test]
fn test_fixtures_three_clusters() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("clusters.csv");

    fixture_clustering(3, 2, &output)
        .run()
        .unwrap()
        .write()
        .unwrap();

    // the third selected center is the frame shifted by 0.5 nm
    assert_eq!(
        read_assignment(output.to_str().unwrap()),
        vec![(0, 0, 0), (0, 1, 0), (0, 2, 2), (1, 0, 1), (1, 1, 1)]
    );

    // exactly 4 header lines
    let content = std::fs::read_to_string(&output).unwrap();
    let n_headers = content.lines().filter(|line| line.starts_with('#')).count();
    assert_eq!(n_headers, 4);
}

#[test]
fn test_fixtures_fail_insufficient_frames() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("clusters.csv");

    match fixture_clustering(100, 1, &output).run() {
        Err(e) => match e.downcast_ref::<ClusterError>() {
            Some(ClusterError::InsufficientFrames {
                available: 5,
                requested: 100,
            }) => (),
            _ => panic!("Unexpected error type `{}` returned.", e),
        },
        Ok(_) => panic!("Function should have failed."),
    }
}

#[test]
fn test_fixtures_from_yaml_config() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("clusters.csv");
    let config = dir.path().join("clustering.yaml");

    std::fs::write(
        &config,
        format!(
            "pi: tests/files/pi.dat
li: tests/files/li.dat
traj_dir: tests/files/trajs
ext: gro
top: tests/files/top.gro
k: 2
n_workers: 3
silent: true
output: {}
",
            output.display()
        ),
    )
    .unwrap();

    Clustering::from_file(&config)
        .unwrap()
        .run()
        .unwrap()
        .write()
        .unwrap();

    assert_eq!(
        read_assignment(output.to_str().unwrap()),
        vec![(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 0, 1), (1, 1, 1)]
    );
}

/// Paths and shape of a generated synthetic data set.
struct SyntheticData {
    pi: String,
    li: String,
    trajectory_dir: String,
    topology: String,
    /// Number of frames in each trajectory, in catalogue order.
    lengths: Vec<u32>,
}

/// Generate a synthetic data set: 10 trajectories of random lengths
/// (10 to 30 frames), each frame holding 22 atoms with seeded random
/// coordinates.
fn synthetic_dataset(dir: &Path) -> SyntheticData {
    fn random_frame(rng: &mut StdRng, n_atoms: usize) -> Vec<[f32; 3]> {
        (0..n_atoms)
            .map(|_| {
                [
                    rng.gen_range(0.5f32..9.5),
                    rng.gen_range(0.5f32..9.5),
                    rng.gen_range(0.5f32..9.5),
                ]
            })
            .collect()
    }

    let mut rng = StdRng::seed_from_u64(2024);

    let trajs = dir.join("trajs");
    std::fs::create_dir(&trajs).unwrap();

    let topology = dir.join("top.gro");
    write_gro(&topology, &[random_frame(&mut rng, 22)]);

    let mut lengths = Vec::new();
    for t in 0..10usize {
        let n_frames = rng.gen_range(10u32..=30);
        let frames: Vec<Vec<[f32; 3]>> = (0..n_frames)
            .map(|_| random_frame(&mut rng, 22))
            .collect();
        write_gro(trajs.join(format!("traj-{:02}.gro", t)), &frames);
        lengths.push(n_frames);
    }

    let pi = dir.join("pi.dat");
    let li = dir.join("li.dat");
    std::fs::write(&pi, "0 1 2 3 4 5 6 7\n").unwrap();
    std::fs::write(&li, "8 9 10 21\n").unwrap();

    SyntheticData {
        pi: pi.to_str().unwrap().to_owned(),
        li: li.to_str().unwrap().to_owned(),
        trajectory_dir: trajs.to_str().unwrap().to_owned(),
        topology: topology.to_str().unwrap().to_owned(),
        lengths,
    }
}

fn synthetic_clustering(
    data: &SyntheticData,
    k: usize,
    n_workers: usize,
    output: &Path,
) -> Clustering {
    Clustering::builder()
        .pi(&data.pi)
        .li(&data.li)
        .trajectory_dir(&data.trajectory_dir)
        .extension("gro")
        .topology(&data.topology)
        .n_clusters(k)
        .n_workers(n_workers)
        .output(output.to_str().unwrap())
        .silent()
        .build()
        .unwrap()
}

#[test]
fn test_worker_count_invariance() {
    let dir = TempDir::new().unwrap();
    let data = synthetic_dataset(dir.path());

    let reference = dir.path().join("clusters-1.csv");
    synthetic_clustering(&data, 30, 1, &reference)
        .run()
        .unwrap()
        .write()
        .unwrap();

    let rows = read_assignment(reference.to_str().unwrap());

    // rows are sorted by frame identity and cover every frame exactly once
    let expected_ids: Vec<(u32, u32)> = data
        .lengths
        .iter()
        .enumerate()
        .flat_map(|(t, &n)| (0..n).map(move |f| (t as u32, f)))
        .collect();
    let ids: Vec<(u32, u32)> = rows.iter().map(|&(t, f, _)| (t, f)).collect();
    assert_eq!(ids, expected_ids);

    // all 30 clusters are used (every center is assigned to itself)
    let mut clusters: Vec<usize> = rows.iter().map(|&(_, _, c)| c).collect();
    clusters.sort();
    clusters.dedup();
    assert_eq!(clusters.len(), 30);
    assert!(clusters.iter().all(|&c| c < 30));

    // the assignment must not depend on the number of workers
    for n_workers in 2..=9 {
        let output = dir.path().join(format!("clusters-{}.csv", n_workers));
        synthetic_clustering(&data, 30, n_workers, &output)
            .run()
            .unwrap()
            .write()
            .unwrap();

        assert!(diff_files_ignore_first(
            reference.to_str().unwrap(),
            output.to_str().unwrap(),
            4
        ));
    }
}

#[test]
fn test_repeated_runs_byte_identical() {
    let dir = TempDir::new().unwrap();
    let data = synthetic_dataset(dir.path());

    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    for output in [&first, &second] {
        synthetic_clustering(&data, 12, 4, output)
            .run()
            .unwrap()
            .write()
            .unwrap();
    }

    let content_first = std::fs::read_to_string(&first).unwrap();
    let content_second = std::fs::read_to_string(&second).unwrap();
    assert_eq!(content_first, content_second);
}
