//! End-to-end submission workflow tests: submit, lock, review, resubmit

mod common;

use common::*;
use predicates::prelude::*;

#[test]
fn test_full_cycle_submit_verify_footprint() {
    let tmp = setup_client_scenario();

    submit(&tmp, &["Grid_Electricity_S2=500"]);

    login(&tmp, ADMIN_EMAIL, ADMIN_PASSWORD);
    let id = queue_submission_id(&tmp);
    assert!(!id.is_empty(), "queue should show the submission id");

    cft()
        .current_dir(tmp.path())
        .args([
            "review",
            &id,
            "--mark",
            "Grid_Electricity_S2=correct",
            "--verify",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("225.00 kg CO2e"));

    login(&tmp, "acme@example.com", CLIENT_PASSWORD);
    cft()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("verified"))
        .stdout(predicate::str::contains("225.00 kg CO2e"));
}

#[test]
fn test_submission_locks_further_entry() {
    let tmp = setup_client_scenario();

    submit(&tmp, &["Diesel_S1=10"]);

    cft()
        .current_dir(tmp.path())
        .args(["submit", "--set", "Diesel_S1=12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pending review"));

    cft()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("locked"));
}

#[test]
fn test_wrong_entry_rejects_and_comment_reaches_client() {
    let tmp = setup_client_scenario();

    submit(&tmp, &["Grid_Electricity_S2=500", "Diesel_S1=10"]);

    login(&tmp, ADMIN_EMAIL, ADMIN_PASSWORD);
    let id = queue_submission_id(&tmp);
    cft()
        .current_dir(tmp.path())
        .args([
            "review",
            &id,
            "--mark",
            "Grid_Electricity_S2=correct",
            "--mark",
            "Diesel_S1=wrong:Meter reading looks off",
            "--verify",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("rejected"));

    login(&tmp, "acme@example.com", CLIENT_PASSWORD);
    cft()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("rejected"))
        .stdout(predicate::str::contains("Meter reading looks off"));
}

#[test]
fn test_comment_all_fills_missing_comments() {
    let tmp = setup_client_scenario();

    submit(&tmp, &["Diesel_S1=10"]);

    login(&tmp, ADMIN_EMAIL, ADMIN_PASSWORD);
    let id = queue_submission_id(&tmp);
    cft()
        .current_dir(tmp.path())
        .args([
            "review",
            &id,
            "--mark",
            "Diesel_S1=wrong",
            "--comment-all",
            "Please attach meter readings",
            "--verify",
        ])
        .assert()
        .success();

    login(&tmp, "acme@example.com", CLIENT_PASSWORD);
    cft()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please attach meter readings"));
}

#[test]
fn test_resubmission_replaces_rejected() {
    let tmp = setup_client_scenario();

    submit(&tmp, &["Diesel_S1=10"]);

    login(&tmp, ADMIN_EMAIL, ADMIN_PASSWORD);
    let first_id = queue_submission_id(&tmp);
    cft()
        .current_dir(tmp.path())
        .args(["review", &first_id, "--mark", "Diesel_S1=wrong:Recheck", "--reject"])
        .assert()
        .success();

    login(&tmp, "acme@example.com", CLIENT_PASSWORD);
    cft()
        .current_dir(tmp.path())
        .args(["submit", "--set", "Diesel_S1=12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recheck"));

    login(&tmp, ADMIN_EMAIL, ADMIN_PASSWORD);
    let second_id = queue_submission_id(&tmp);
    assert_ne!(first_id, second_id, "rejected submission should be replaced");

    cft()
        .current_dir(tmp.path())
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::contains(&first_id).not());
}

#[test]
fn test_review_requires_decision_for_every_entry() {
    let tmp = setup_client_scenario();

    submit(&tmp, &["Grid_Electricity_S2=500", "Diesel_S1=10"]);

    login(&tmp, ADMIN_EMAIL, ADMIN_PASSWORD);
    let id = queue_submission_id(&tmp);
    cft()
        .current_dir(tmp.path())
        .args(["review", &id, "--mark", "Diesel_S1=correct", "--verify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No review decision"));
}

#[test]
fn test_approved_submission_cannot_be_rereviewed() {
    let tmp = setup_client_scenario();

    submit(&tmp, &["Diesel_S1=10"]);

    login(&tmp, ADMIN_EMAIL, ADMIN_PASSWORD);
    let id = queue_submission_id(&tmp);
    cft()
        .current_dir(tmp.path())
        .args(["review", &id, "--mark", "Diesel_S1=correct", "--verify"])
        .assert()
        .success();

    cft()
        .current_dir(tmp.path())
        .args(["review", &id, "--mark", "Diesel_S1=correct", "--reject"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot review"));
}

#[test]
fn test_submit_excludes_invalid_and_unknown_values() {
    let tmp = setup_client_scenario();

    cft()
        .current_dir(tmp.path())
        .args([
            "submit",
            "--set",
            "Grid_Electricity_S2=500",
            "--set",
            "Diesel_S1=-3",
            "--set",
            "Bogus_S3=7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Submitted 1 entry"))
        .stdout(predicate::str::contains("excluded"))
        .stdout(predicate::str::contains("Bogus_S3"));
}

#[test]
fn test_report_export_writes_verified_csv() {
    let tmp = setup_client_scenario();

    submit(&tmp, &["Grid_Electricity_S2=500"]);

    login(&tmp, ADMIN_EMAIL, ADMIN_PASSWORD);
    let id = queue_submission_id(&tmp);
    cft()
        .current_dir(tmp.path())
        .args(["review", &id, "--mark", "Grid_Electricity_S2=correct", "--verify"])
        .assert()
        .success();

    login(&tmp, "acme@example.com", CLIENT_PASSWORD);
    cft()
        .current_dir(tmp.path())
        .args(["report", "export", "--out", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 verified report(s)"));

    let csv = std::fs::read_to_string(tmp.path().join("out.csv")).unwrap();
    assert!(csv.starts_with("date,module,verified_at,footprint,unit"));
    assert!(csv.contains("225.00"));
    assert!(csv.contains("GHG Basic"));
}

#[test]
fn test_report_history_lists_outcomes() {
    let tmp = setup_client_scenario();

    submit(&tmp, &["Diesel_S1=10"]);

    cft()
        .current_dir(tmp.path())
        .args(["report", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending Review"));
}
