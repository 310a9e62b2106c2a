#![forbid(unsafe_code)]
use assert_cmd::Command;
use chrono::{Datelike, NaiveDate};
use predicates::prelude::*;
use tempfile::tempdir;

fn bin() -> Command {
    Command::cargo_bin("creneau-cli").unwrap()
}

fn weekday_of(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .weekday()
        .num_days_from_sunday()
        .to_string()
}

#[test]
fn slots_prints_generated_slots() {
    let dir = tempdir().unwrap();
    let agenda = dir.path().join("agenda.json");
    let agenda = agenda.to_str().unwrap();
    let date = "2099-06-01";
    let day = weekday_of(date);

    bin()
        .args([
            "--agenda", agenda, "set-hours", "--day", day.as_str(), "--open", "09:00", "--close", "12:00",
        ])
        .assert()
        .success();

    bin()
        .args(["--agenda", agenda, "slots", "--date", date])
        .assert()
        .success()
        .stdout(predicate::str::contains("slot-1 | 09:00 | libre"))
        .stdout(predicate::str::contains("11:30"));
}

#[test]
fn slots_reports_closed_day_with_warning_code() {
    let dir = tempdir().unwrap();
    let agenda = dir.path().join("agenda.json");
    let agenda = agenda.to_str().unwrap();
    let date = "2099-06-01";
    let day = weekday_of(date);

    bin()
        .args(["--agenda", agenda, "set-hours", "--day", day.as_str(), "--closed"])
        .assert()
        .success();

    bin()
        .args(["--agenda", agenda, "slots", "--date", date])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Fermé"));
}

#[test]
fn book_rejects_taken_slot() {
    let dir = tempdir().unwrap();
    let agenda = dir.path().join("agenda.json");
    let agenda = agenda.to_str().unwrap();
    let date = "2099-06-01";
    let day = weekday_of(date);

    bin()
        .args([
            "--agenda", agenda, "set-hours", "--day", day.as_str(), "--open", "09:00", "--close", "12:00",
        ])
        .assert()
        .success();

    bin()
        .args([
            "--agenda", agenda, "book", "--client", "Alice", "--date", date, "--start", "10:00",
            "--duration", "60",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("pending"));

    // 10:30 est couvert par la réservation d'Alice (demi-ouvert : 11:00 libre)
    bin()
        .args([
            "--agenda", agenda, "book", "--client", "Bob", "--date", date, "--start", "10:30",
        ])
        .assert()
        .failure();

    bin()
        .args([
            "--agenda", agenda, "book", "--client", "Bob", "--date", date, "--start", "11:00",
        ])
        .assert()
        .success();
}
