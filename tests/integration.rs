//! Integration tests for usescan

mod harness;

use assert_cmd::Command;
use harness::{TestRepo, run_usescan};
use predicates::prelude::*;

#[test]
fn test_basic_scan() {
    let repo = TestRepo::new();
    repo.add_file("app.php", "<?php\nuse App\\Service;\nuse App\\Model as M;\n");
    repo.add_file("other.php", "<?php\nuse const E_ALL;\n");

    let (stdout, _stderr, success) = run_usescan(repo.path(), &[]);
    assert!(success, "usescan should succeed");
    assert!(stdout.contains("app.php"), "should show app.php: {}", stdout);
    assert!(stdout.contains("App\\Service"), "should show import: {}", stdout);
    assert!(stdout.contains("as M"), "should show alias: {}", stdout);
    assert!(stdout.contains("const E_ALL"), "should show const import: {}", stdout);
    assert!(stdout.contains("2 files, 3 imports"), "summary: {}", stdout);
}

#[test]
fn test_non_php_files_are_skipped() {
    let repo = TestRepo::new();
    repo.add_file("app.php", "<?php use App\\Service;\n");
    repo.add_file("notes.txt", "use Not\\Php;\n");
    repo.add_file("main.rs", "use std::path::Path;\n");

    let (stdout, _stderr, success) = run_usescan(repo.path(), &[]);
    assert!(success);
    assert!(stdout.contains("App\\Service"));
    assert!(!stdout.contains("Not\\Php"), "should skip .txt: {}", stdout);
    assert!(!stdout.contains("std"), "should skip .rs: {}", stdout);
}

#[test]
fn test_json_output() {
    let repo = TestRepo::new();
    repo.add_file("app.php", "<?php\nuse function App\\helper as h;\n");

    let (stdout, _stderr, success) = run_usescan(repo.path(), &["--json"]);
    assert!(success);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let imports = &json[0]["imports"];
    assert_eq!(imports[0]["path"][0], "App");
    assert_eq!(imports[0]["path"][1], "helper");
    assert_eq!(imports[0]["alias"], "h");
    assert_eq!(imports[0]["kind"], "function");
}

#[test]
fn test_json_includes_files_without_imports() {
    let repo = TestRepo::new();
    repo.add_file("empty.php", "<?php echo 'nothing';\n");

    let (stdout, _stderr, success) = run_usescan(repo.path(), &["--json"]);
    assert!(success);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json.as_array().map(|a| a.len()), Some(1));
    assert_eq!(json[0]["imports"].as_array().map(|a| a.len()), Some(0));
}

#[test]
fn test_gitignore_filtering() {
    let repo = TestRepo::with_git();
    repo.add_file("app.php", "<?php use App\\Service;\n");
    repo.add_file("vendor/lib.php", "<?php use Vendor\\Lib;\n");
    repo.add_file(".gitignore", "vendor/\n");

    let (stdout, _stderr, success) = run_usescan(repo.path(), &[]);
    assert!(success);
    assert!(stdout.contains("App\\Service"));
    assert!(
        !stdout.contains("Vendor\\Lib"),
        "vendor/ should be gitignored: {}",
        stdout
    );
}

#[test]
fn test_all_flag_includes_ignored_files() {
    let repo = TestRepo::with_git();
    repo.add_file("app.php", "<?php use App\\Service;\n");
    repo.add_file("vendor/lib.php", "<?php use Vendor\\Lib;\n");
    repo.add_file(".gitignore", "vendor/\n");

    let (stdout, _stderr, success) = run_usescan(repo.path(), &["-a"]);
    assert!(success);
    assert!(
        stdout.contains("Vendor\\Lib"),
        "should show ignored file with -a: {}",
        stdout
    );
}

#[test]
fn test_ignore_pattern() {
    let repo = TestRepo::new();
    repo.add_file("app.php", "<?php use App\\Service;\n");
    repo.add_file("app_test.php", "<?php use Test\\Case;\n");

    let (stdout, _stderr, success) = run_usescan(repo.path(), &["-I", "*_test.php"]);
    assert!(success);
    assert!(stdout.contains("App\\Service"));
    assert!(
        !stdout.contains("Test\\Case"),
        "should skip files matching -I: {}",
        stdout
    );
}

#[test]
fn test_malformed_unit_fails_scan() {
    let repo = TestRepo::new();
    repo.add_file("good.php", "<?php use App\\Service;\n");
    repo.add_file("bad.php", "<?php use Broken\\{A, B;\n");

    let (stdout, stderr, success) = run_usescan(repo.path(), &[]);
    assert!(!success, "malformed unit should fail the scan");
    assert!(
        stderr.contains("bad.php") && stderr.contains("syntax error"),
        "stderr should name the failing unit: {}",
        stderr
    );
    // The good unit is still reported
    assert!(stdout.contains("App\\Service"), "stdout: {}", stdout);
}

#[test]
fn test_scan_single_file_argument() {
    let repo = TestRepo::new();
    let file = repo.add_file("app.php", "<?php use App\\Service;\n");

    let (stdout, _stderr, success) =
        run_usescan(repo.path(), &[file.to_str().expect("utf-8 path")]);
    assert!(success);
    assert!(stdout.contains("App\\Service"));
}

#[test]
fn test_stats_output() {
    let repo = TestRepo::new();
    repo.add_file(
        "app.php",
        "<?php\nuse A\\B;\nuse function C\\d;\nuse const E_ALL, E_ERROR;\n",
    );

    let (stdout, _stderr, success) = run_usescan(repo.path(), &["--stats"]);
    assert!(success);
    assert!(stdout.contains("Import Statistics"), "stdout: {}", stdout);
    assert!(stdout.contains("Imports:    4"), "stdout: {}", stdout);
}

#[test]
fn test_stats_json_output() {
    let repo = TestRepo::new();
    repo.add_file("app.php", "<?php use A\\B as C;\n");

    let (stdout, _stderr, success) = run_usescan(repo.path(), &["--stats", "--json"]);
    assert!(success);

    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(json["files"], 1);
    assert_eq!(json["imports"], 1);
    assert_eq!(json["classes"], 1);
    assert_eq!(json["aliased"], 1);
}

#[test]
fn test_multiline_group_in_file() {
    let repo = TestRepo::new();
    repo.add_file(
        "app.php",
        "<?php\nuse Multi\\Line\\{\n    First,\n    function second,\n    const THIRD,\n};\n",
    );

    let (stdout, _stderr, success) = run_usescan(repo.path(), &[]);
    assert!(success);
    assert!(stdout.contains("Multi\\Line\\First"), "stdout: {}", stdout);
    assert!(stdout.contains("function Multi\\Line\\second"), "stdout: {}", stdout);
    assert!(stdout.contains("const Multi\\Line\\THIRD"), "stdout: {}", stdout);
    assert!(stdout.contains("1 files, 3 imports"), "stdout: {}", stdout);
}

#[test]
fn test_nonexistent_path() {
    let repo = TestRepo::new();
    let (_stdout, stderr, success) = run_usescan(repo.path(), &["does-not-exist"]);
    assert!(!success);
    assert!(stderr.contains("cannot access"), "stderr: {}", stderr);
}

#[test]
fn test_sequential_jobs_match_parallel() {
    let repo = TestRepo::new();
    for i in 0..8 {
        repo.add_file(
            &format!("src/mod{}.php", i),
            &format!("<?php use Mod{}\\Service;\n", i),
        );
    }

    let (parallel, _, ok_par) = run_usescan(repo.path(), &[]);
    let (sequential, _, ok_seq) = run_usescan(repo.path(), &["-j", "1"]);
    assert!(ok_par && ok_seq);
    assert_eq!(parallel, sequential, "output order should not depend on workers");
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("usescan")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("usescan"));
}

#[test]
fn test_invalid_max_file_size() {
    Command::cargo_bin("usescan")
        .unwrap()
        .args(["--max-file-size", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --max-file-size"));
}
