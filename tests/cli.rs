// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! End-to-end tests of the `mandel` binary.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn renders_a_ppm_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.ppm");

    Command::cargo_bin("mandel")
        .unwrap()
        .args(&[
            "--output",
            out.to_str().unwrap(),
            "--size",
            "64x48",
            "--iterations",
            "50",
            "--threads",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered 64x48"));

    let bytes = fs::read(&out).unwrap();
    // Binary PPM magic plus one RGB triple per pixel.
    assert_eq!(&bytes[0..2], b"P6");
    assert!(bytes.len() > 64 * 48 * 3);
}

#[test]
fn rejects_a_zero_thread_count() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.ppm");

    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["--output", out.to_str().unwrap(), "--threads", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Thread count"));
    assert!(!out.exists());
}

#[test]
fn rejects_garbage_dimensions() {
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["--output", "out.ppm", "--size", "banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}
