/*
 * Copyright 2024 Fluence Labs Limited
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::path::Path;
use std::process::Command;

use tempfile::tempdir;

use stimuli_gen::{parse_header_file, run, StimuliConfig, StimuliError, DEFAULT_OUTPUT};

fn stimuli_gen_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_stimuli-gen"));
    cmd.current_dir(dir);
    for var in [
        "STIMULI_CONFIG",
        "STIMULI_OUTPUT",
        "STIMULI_SIZE",
        "STIMULI_RANGE",
        "STIMULI_SEED",
        "STIMULI_SECTION",
        "STIMULI_VERIFY",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn run_writes_a_header_that_reads_back() {
    let dir = tempdir().expect("Could not create temp dir");
    let config = StimuliConfig {
        output: dir.path().join(DEFAULT_OUTPUT),
        seed: Some(3),
        verify: true,
        ..Default::default()
    };

    let stimuli = run(&config).expect("generate stimuli");
    let parsed = parse_header_file(&config.output).expect("parse header");

    assert!(parsed.matches(&stimuli));
    assert_eq!(parsed.size, 24);
    parsed.verify().expect("m_exp is a x b");

    let range = 1365;
    assert!(parsed
        .a
        .as_slice()
        .iter()
        .chain(parsed.b.as_slice())
        .all(|v| (-range..range).contains(v)));
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir = tempdir().expect("Could not create temp dir");
    let first = StimuliConfig {
        output: dir.path().join("first.h"),
        size: 8,
        seed: Some(11),
        ..Default::default()
    };
    let second = StimuliConfig {
        output: dir.path().join("second.h"),
        ..first.clone()
    };

    run(&first).unwrap();
    run(&second).unwrap();

    let first = std::fs::read_to_string(&first.output).unwrap();
    let second = std::fs::read_to_string(&second.output).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("#define SIZE 8\n"));
}

#[test]
fn unseeded_runs_differ() {
    let dir = tempdir().expect("Could not create temp dir");
    let config = StimuliConfig {
        output: dir.path().join("stimuli.h"),
        ..Default::default()
    };

    let first = run(&config).unwrap();
    let second = run(&config).unwrap();
    assert_ne!(first.a, second.a);
}

#[test]
fn unwritable_output_is_an_io_error() {
    let dir = tempdir().expect("Could not create temp dir");
    let config = StimuliConfig {
        output: dir.path().join("missing").join(DEFAULT_OUTPUT),
        ..Default::default()
    };

    let err = run(&config).unwrap_err();
    assert!(matches!(err, StimuliError::Io(_)));
}

#[test]
fn binary_writes_default_header_into_cwd() {
    let dir = tempdir().expect("Could not create temp dir");

    let output = stimuli_gen_cmd(dir.path())
        .output()
        .expect("run stimuli-gen");

    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());

    let parsed = parse_header_file(dir.path().join("MatrixMul32_stimuli.h")).unwrap();
    assert_eq!(parsed.size, 24);
    parsed.verify().unwrap();
    assert_eq!(parsed.buffers.len(), 4);
}

#[test]
fn binary_honors_args() {
    let dir = tempdir().expect("Could not create temp dir");

    let output = stimuli_gen_cmd(dir.path())
        .args(["-o", "small.h", "--size", "4", "--seed", "1", "--section", ".l2", "--verify"])
        .output()
        .expect("run stimuli-gen");

    assert!(output.status.success(), "{output:?}");
    let parsed = parse_header_file(dir.path().join("small.h")).unwrap();
    assert_eq!(parsed.size, 4);
    assert!(parsed.buffers.iter().all(|(section, _)| section == ".l2"));
}

#[test]
fn binary_rejects_overflowing_range() {
    let dir = tempdir().expect("Could not create temp dir");

    let output = stimuli_gen_cmd(dir.path())
        .args(["--range", "20000"])
        .output()
        .expect("run stimuli-gen");

    assert!(!output.status.success());
    assert!(!dir.path().join(DEFAULT_OUTPUT).exists());
}

#[test]
fn binary_rejects_oversized_matrices() {
    let dir = tempdir().expect("Could not create temp dir");

    let output = stimuli_gen_cmd(dir.path())
        .args(["--size", "40000", "--range", "1"])
        .output()
        .expect("run stimuli-gen");

    assert!(!output.status.success());
    assert!(!dir.path().join(DEFAULT_OUTPUT).exists());
}
