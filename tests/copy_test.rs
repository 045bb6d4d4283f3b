//! Integration tests for the content-aware merge copy
//!
//! Idempotence and ignore-list behavior of the copy step that moves the
//! fetched tree into the build working directory.

use std::fs;
use std::time::Duration;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

use buildsmith::config::defaults::COPY_IGNORE_LIST;
use buildsmith::infra::filesystem::merge_copy;

const EPSILON: Duration = Duration::from_secs(1);

#[test]
fn test_copy_then_copy_again_is_a_no_op() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    src.child("CMakeLists.txt").write_str("project(x)").unwrap();
    src.child("src/lib.cpp").write_str("// lib").unwrap();
    src.child("src/nested/deep.h").write_str("#pragma once").unwrap();

    let first = merge_copy(src.path(), dst.path(), COPY_IGNORE_LIST, EPSILON).unwrap();
    assert_eq!(first.copied, 3);

    // Zero overwrites on the second run with unchanged sources
    let second = merge_copy(src.path(), dst.path(), COPY_IGNORE_LIST, EPSILON).unwrap();
    assert_eq!(second.copied, 0);
    assert_eq!(second.skipped, 3);
}

#[test]
fn test_fixed_ignore_list_is_never_copied() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    src.child("keep.txt").write_str("keep").unwrap();
    src.child(".git/HEAD").write_str("ref: main").unwrap();
    src.child(".travis.yml").write_str("language: cpp").unwrap();
    src.child("CMakeFiles/x.dir/flags").write_str("-O2").unwrap();

    merge_copy(src.path(), dst.path(), COPY_IGNORE_LIST, EPSILON).unwrap();

    dst.child("keep.txt").assert(predicate::path::exists());
    dst.child(".git").assert(predicate::path::missing());
    dst.child(".travis.yml").assert(predicate::path::missing());
    dst.child("CMakeFiles").assert(predicate::path::missing());
}

#[test]
fn test_existing_destination_files_survive_a_merge() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    src.child("a.txt").write_str("from upstream").unwrap();
    dst.child("local.txt").write_str("recipe file").unwrap();

    merge_copy(src.path(), dst.path(), COPY_IGNORE_LIST, EPSILON).unwrap();

    dst.child("a.txt").assert("from upstream");
    dst.child("local.txt").assert("recipe file");
}

#[test]
fn test_newer_destination_is_not_clobbered() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    src.child("a.txt").write_str("stale").unwrap();
    // Written after the source file, so strictly newer
    dst.child("a.txt").write_str("fresh").unwrap();

    let stats = merge_copy(src.path(), dst.path(), COPY_IGNORE_LIST, EPSILON).unwrap();
    assert_eq!(stats.copied, 0);
    dst.child("a.txt").assert("fresh");
}

#[test]
fn test_rerun_after_partial_destination_repairs_it() {
    // A failed prior run may have left only part of the tree; the next
    // run fills in the missing files without touching the rest.
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();
    src.child("one.txt").write_str("1").unwrap();
    src.child("two.txt").write_str("2").unwrap();

    merge_copy(src.path(), dst.path(), COPY_IGNORE_LIST, EPSILON).unwrap();
    fs::remove_file(dst.path().join("two.txt")).unwrap();

    let stats = merge_copy(src.path(), dst.path(), COPY_IGNORE_LIST, EPSILON).unwrap();
    assert_eq!(stats.copied, 1);
    assert_eq!(stats.skipped, 1);
    dst.child("two.txt").assert("2");
}
