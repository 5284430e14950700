// Released under MIT License.
// Copyright (c) 2024-2026 Ladislav Bartos

//! Functions used in various integration tests.

use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

/// Test utility. Diff the contents of two files without the first `skip` lines.
#[allow(dead_code)]
pub(super) fn diff_files_ignore_first(file1: &str, file2: &str, skip: usize) -> bool {
    let content1 = read_file_without_first_lines(file1, skip);
    let content2 = read_file_without_first_lines(file2, skip);
    content1 == content2
}

fn read_file_without_first_lines(file: &str, skip: usize) -> Vec<String> {
    let reader = BufReader::new(File::open(file).unwrap());
    reader
        .lines()
        .skip(skip)
        .map(|line| line.unwrap())
        .collect()
}

/// Test utility. Write a (multi-frame) GRO file; each frame is a list of atom positions.
#[allow(dead_code)]
pub(super) fn write_gro(path: impl AsRef<Path>, frames: &[Vec<[f32; 3]>]) {
    let mut file = File::create(path).unwrap();

    for frame in frames {
        writeln!(file, "Generated frame").unwrap();
        writeln!(file, "{:5}", frame.len()).unwrap();
        for (i, &[x, y, z]) in frame.iter().enumerate() {
            writeln!(
                file,
                "{:5}{:<5}{:>5}{:5}{:8.3}{:8.3}{:8.3}",
                1,
                "MOL",
                "C",
                i + 1,
                x,
                y,
                z
            )
            .unwrap();
        }
        writeln!(file, "  10.00000  10.00000  10.00000").unwrap();
    }
}

/// Test utility. Read the assignment rows of an output file, skipping the header.
#[allow(dead_code)]
pub(super) fn read_assignment(file: &str) -> Vec<(u32, u32, usize)> {
    let reader = BufReader::new(File::open(file).unwrap());

    reader
        .lines()
        .map(|line| line.unwrap())
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            let mut fields = line.split(',');
            (
                fields.next().unwrap().parse().unwrap(),
                fields.next().unwrap().parse().unwrap(),
                fields.next().unwrap().parse().unwrap(),
            )
        })
        .collect()
}
