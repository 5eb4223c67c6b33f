/**
 * Functional tests that run the memtrain binary with scripted input.
 */
use std::io::Write;
use std::process::{Command, Stdio};

use regex::Regex;
use tempfile::TempDir;


#[test]
fn can_take_quiz_in_order() {
    let dir = TempDir::new().unwrap();
    let (stdout, _) = take(
        &dir,
        "tests/tables/animals.csv",
        &["--in-order", "--once"],
        "cat\nDog\n",
    );

    assert_in_order(
        &stdout,
        &[
            "(1/2) Katze",
            "Correct!",
            "(2/2) Hund",
            "Correct!",
            "This round: 2 out of 2 questions correct",
            "No incorrect answers this round.",
            "Total: 2 / 2",
        ],
    );
    assert!(!dir.path().join("mistakes.json").exists());
}


#[test]
fn mistakes_are_saved_and_listed() {
    let dir = TempDir::new().unwrap();
    let (stdout, _) = take(
        &dir,
        "tests/tables/animals.csv",
        &["--in-order", "--once"],
        "dog\ncat\n",
    );

    assert_in_order(
        &stdout,
        &[
            "(1/2) Katze",
            "Incorrect. The correct answer was cat.",
            "(2/2) Hund",
            "Incorrect. The correct answer was dog.",
            "This round: 0 out of 2 questions correct",
            "Incorrect answers:",
            "Katze = cat (you said dog)",
            "Hund = dog (you said cat)",
            "Total: 0 / 2",
        ],
    );

    let (stdout, _) = run(&dir, &["stats"], "");
    assert!(stdout.contains("1x  Hund = dog"), "stdout: {}", stdout);
    assert!(stdout.contains("1x  Katze = cat"), "stdout: {}", stdout);

    let (stdout, _) = run(&dir, &["reset", "-f"], "");
    assert!(stdout.contains("Mistake statistics deleted."));

    let (stdout, _) = run(&dir, &["stats"], "");
    assert!(stdout.contains("No mistakes have been recorded."));
}


#[test]
fn can_take_flipped_quiz() {
    let dir = TempDir::new().unwrap();
    let (stdout, _) = take(
        &dir,
        "tests/tables/umlauts.tsv",
        &["--in-order", "--once", "--flip"],
        "Der  Bär!\nstrasse\n",
    );

    assert_in_order(
        &stdout,
        &[
            "(1/2) bear",
            "Correct!",
            "(2/2) street",
            "Incorrect. The correct answer was Straße.",
            "This round: 1 out of 2 questions correct",
        ],
    );
}


#[test]
fn blank_meaning_is_answered_with_empty_line() {
    let dir = TempDir::new().unwrap();
    let (stdout, _) = take(
        &dir,
        "tests/tables/blank_meaning.csv",
        &["--in-order", "--once"],
        "\ncat\n",
    );

    assert_in_order(
        &stdout,
        &[
            "(1/2) Hund",
            "Correct!",
            "(2/2) Katze",
            "Correct!",
            "This round: 2 out of 2 questions correct",
        ],
    );
    assert!(!dir.path().join("mistakes.json").exists());
}


#[test]
fn rounds_are_recorded_in_history() {
    let dir = TempDir::new().unwrap();
    take(&dir, "tests/tables/animals.csv", &["--in-order", "--once"], "cat\ncow\n");

    let (stdout, _) = run(&dir, &["history"], "");
    let re = Regex::new(r"50\.0%\s+1 / 2").unwrap();
    assert!(re.is_match(&stdout), "stdout: {}", stdout);

    let (stdout, _) = run(&dir, &["history", "--json"], "");
    assert!(stdout.contains("\"correct\": 1"), "stdout: {}", stdout);
    assert!(stdout.contains("\"total\": 2"), "stdout: {}", stdout);
    assert!(stdout.contains("\"percentage\": 50.0"), "stdout: {}", stdout);
}


#[test]
fn previous_answer_can_be_shown() {
    let dir = TempDir::new().unwrap();
    let (stdout, _) = take(
        &dir,
        "tests/tables/animals.csv",
        &["--in-order", "--once"],
        "cat\n!prev\ndog\n",
    );

    assert_in_order(
        &stdout,
        &[
            "(2/2) Hund",
            "Previously: Katze -> you said cat (correct; the answer was cat).",
            "Correct!",
            "This round: 2 out of 2 questions correct",
        ],
    );
}


#[test]
fn end_of_input_stops_the_quiz() {
    let dir = TempDir::new().unwrap();
    let (stdout, _) = take(&dir, "tests/tables/animals.csv", &["--in-order"], "cat\n");

    assert_in_order(&stdout, &["Correct!", "Stopped. Total: 1 / 1"]);
    assert!(!stdout.contains("This round:"));
}


#[test]
fn table_without_required_columns_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = command(&dir)
        .args(&["take", "tests/tables/wrong_columns.csv"])
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'Bezeichnung' and 'Bedeutung'"), "stderr: {}", stderr);
    assert!(stderr.contains("found: Term, Definition"), "stderr: {}", stderr);
}


fn take(dir: &TempDir, table: &str, args: &[&str], input: &str) -> (String, String) {
    let mut full_args = vec!["take", table];
    full_args.extend_from_slice(args);
    run(dir, &full_args, input)
}


fn run(dir: &TempDir, args: &[&str], input: &str) -> (String, String) {
    let mut child = command(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    assert!(output.status.success(), "stdout: {}\nstderr: {}", stdout, stderr);
    (stdout, stderr)
}


fn command(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_memtrain"));
    cmd.arg("--no-color").arg("-d").arg(dir.path());
    cmd
}


/// Assert that each of `expected` occurs in `output`, in order.
fn assert_in_order(output: &str, expected: &[&str]) {
    let mut rest = output;
    for e in expected.iter() {
        match rest.find(e) {
            Some(index) => {
                rest = &rest[index + e.len()..];
            },
            None => {
                panic!("expected {:?} in output:\n{}", e, output);
            }
        }
    }
}
