//! Integration tests for the decldiff CLI tool.
//!
//! These tests verify the complete end-to-end behavior of the CLI,
//! including argument parsing, file processing, and output formatting.

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a Command for the decldiff binary
fn decldiff() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("decldiff"))
}

#[test]
fn test_identical_files_exit_0() {
    decldiff()
        .arg("tests/fixtures/identical_v1.json")
        .arg("tests/fixtures/identical_v2.json")
        .assert()
        .success()
        .code(0)
        .stdout(predicate::str::contains("No changes"));
}

#[test]
fn test_different_files_exit_1() {
    decldiff()
        .arg("tests/fixtures/customer_v1.json")
        .arg("tests/fixtures/customer_v2.json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("field type changed from int to long"));
}

#[test]
fn test_file_not_found_exit_2() {
    decldiff()
        .arg("tests/fixtures/nonexistent.json")
        .arg("tests/fixtures/identical_v1.json")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_member_order_is_not_a_change() {
    // v1 and v2 list the same members in a different order.
    decldiff()
        .arg("tests/fixtures/identical_v1.json")
        .arg("tests/fixtures/identical_v2.json")
        .assert()
        .success()
        .code(0);
}

#[test]
fn test_parameter_reorder_reported() {
    decldiff()
        .arg("tests/fixtures/customer_v1.json")
        .arg("tests/fixtures/customer_v2.json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "parameter count reordered from argument 0 to 1",
        ))
        .stdout(predicate::str::contains(
            "parameter label reordered from argument 1 to 0",
        ));
}

#[test]
fn test_added_and_removed_declarations() {
    decldiff()
        .arg("tests/fixtures/customer_v1.json")
        .arg("tests/fixtures/customer_v2.json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("method added: merge(Customer)"))
        .stdout(predicate::str::contains("type declaration removed: Legacy"))
        .stdout(predicate::str::contains("Summary: 1 added, 1 removed, 3 changed"));
}

#[test]
fn test_json_output_format() {
    decldiff()
        .arg("tests/fixtures/customer_v1.json")
        .arg("tests/fixtures/customer_v2.json")
        .arg("--format=json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"events\""))
        .stdout(predicate::str::contains("\"stats\""))
        .stdout(predicate::str::contains("\"PARAMETER_REORDERED\""))
        .stdout(predicate::str::contains("\"TYPE_DECLARATION_REMOVED\""));
}

#[test]
fn test_plain_output_format() {
    decldiff()
        .arg("tests/fixtures/customer_v1.json")
        .arg("tests/fixtures/customer_v2.json")
        .arg("--format=plain")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Customer.assign(int, String)"));
}

#[test]
fn test_mixed_json_yaml() {
    decldiff()
        .arg("tests/fixtures/identical_v1.json")
        .arg("tests/fixtures/identical.yaml")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("No changes"));
}

#[test]
fn test_invalid_file_format() {
    decldiff()
        .arg("tests/fixtures/invalid.txt")
        .arg("tests/fixtures/identical_v1.json")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_validation_error_names_the_defect() {
    decldiff()
        .arg("tests/fixtures/nameless_param.json")
        .arg("tests/fixtures/identical_v1.json")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid declaration tree"))
        .stderr(predicate::str::contains("has no name"));
}

#[test]
fn test_ignore_filter() {
    // Ignoring the whole Customer scope leaves only the removed Legacy type.
    decldiff()
        .arg("tests/fixtures/customer_v1.json")
        .arg("tests/fixtures/customer_v2.json")
        .arg("--ignore=Customer")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("type declaration removed: Legacy"))
        .stdout(predicate::str::contains("field type changed").not());
}

#[test]
fn test_only_filter() {
    decldiff()
        .arg("tests/fixtures/customer_v1.json")
        .arg("tests/fixtures/customer_v2.json")
        .arg("--only=Customer.id")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("field type changed from int to long"))
        .stdout(predicate::str::contains("reordered").not());
}

#[test]
fn test_no_positions_flag() {
    decldiff()
        .arg("tests/fixtures/customer_v1.json")
        .arg("tests/fixtures/customer_v2.json")
        .arg("--format=plain")
        .arg("--no-positions")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("<2:5").not());
}

#[test]
fn test_verbose_flag() {
    decldiff()
        .arg("tests/fixtures/identical_v1.json")
        .arg("tests/fixtures/identical_v2.json")
        .arg("--verbose")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Parsing"))
        .stderr(predicate::str::contains("Computing diff"));
}

#[test]
fn test_quiet_flag() {
    decldiff()
        .arg("tests/fixtures/customer_v1.json")
        .arg("tests/fixtures/customer_v2.json")
        .arg("--quiet")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Summary").not());
}

#[test]
fn test_help_flag() {
    decldiff()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Semantic structural diff"))
        .stdout(predicate::str::contains("FROM_FILE"))
        .stdout(predicate::str::contains("TO_FILE"));
}

#[test]
fn test_version_flag() {
    decldiff()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("decldiff"));
}
