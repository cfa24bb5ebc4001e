mod common;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::{RESTAURANTS, TestWorkspace, fixture_path};

fn binary() -> Command {
    Command::cargo_bin("restaurant-insights").expect("binary exists")
}

#[test]
fn analyze_without_input_prompts_for_upload() {
    binary()
        .args(["analyze", "-a", "type-counts"])
        .assert()
        .success()
        .stdout(contains("Please upload a CSV file to get started."));
}

#[test]
fn analyze_without_selection_prints_nothing() {
    let path = fixture_path(RESTAURANTS);
    binary()
        .args(["analyze", "-i", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn analyze_renders_sections_in_selection_order() {
    let path = fixture_path(RESTAURANTS);
    let output = binary()
        .args([
            "analyze",
            "-i",
            path.to_str().unwrap(),
            "-a",
            "max-votes",
            "-a",
            "Explore listed_in (type) column",
        ])
        .output()
        .expect("run analyze");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let max_votes = stdout
        .find("== Restaurant with Maximum Votes ==")
        .expect("max votes section");
    let types = stdout
        .find("== Explore by Type of Restaurant ==")
        .expect("type section");
    assert!(max_votes < types);
    assert!(stdout.contains("Onesta"));
    assert!(stdout.contains("Empire Restaurant"));
    assert!(stdout.contains("Number of Restaurants by Type"));
    assert!(stdout.contains("x: Type of restaurant  y: Count"));
}

#[test]
fn analyze_all_emits_json_reports() {
    let path = fixture_path(RESTAURANTS);
    let output = binary()
        .args(["analyze", "-i", path.to_str().unwrap(), "--all", "--format", "json"])
        .output()
        .expect("run analyze");
    assert!(output.status.success());
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let reports = reports.as_array().expect("array");
    assert_eq!(reports.len(), 7);
    assert_eq!(reports[0]["analysis"], "type-counts");
    assert_eq!(reports[0]["title"], "Number of Restaurants by Type");
    assert_eq!(reports[0]["result"]["kind"], "frequency");
    assert_eq!(reports[2]["result"]["max_votes"], 2556);
    assert_eq!(reports[6]["result"]["table"]["columns"][1], "Yes");
}

#[test]
fn missing_column_is_shown_without_failing_the_run() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "partial.csv",
        "name,rate,votes\nJalsa,4.1/5,775\nOnesta,4.6/5,2556\n",
    );
    binary()
        .args([
            "analyze",
            "-i",
            path.to_str().unwrap(),
            "-a",
            "online-order-counts",
            "-a",
            "max-votes",
        ])
        .assert()
        .success()
        .stdout(
            contains("error: Column 'online_order' not found in the uploaded file")
                .and(contains("Maximum votes: 2556")),
        );
}

#[test]
fn headers_only_file_reports_empty_results() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "empty.csv",
        "name,online_order,rate,votes,listed_in(type)\n",
    );
    let output = binary()
        .args(["analyze", "-i", path.to_str().unwrap(), "--all"])
        .output()
        .expect("run analyze");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(
        stdout
            .matches("info: No rows with a valid rating are available")
            .count(),
        7
    );
}

#[test]
fn semicolon_files_use_the_delimiter_flag() {
    let workspace = TestWorkspace::new();
    let path = workspace.write(
        "semi.csv",
        "name;online_order;rate;votes;listed_in(type)\nJalsa;Yes;4.1/5;775;Buffet\n",
    );
    binary()
        .args([
            "analyze",
            "-i",
            path.to_str().unwrap(),
            "--delimiter",
            ";",
            "-a",
            "online-order-counts",
        ])
        .assert()
        .success()
        .stdout(contains("Yes | "));
}

#[test]
fn unknown_analysis_is_a_usage_error() {
    binary()
        .args(["analyze", "-a", "pie-chart"])
        .assert()
        .failure()
        .stderr(contains("Unknown analysis 'pie-chart'"));
}

#[test]
fn unreadable_input_fails_with_context() {
    let workspace = TestWorkspace::new();
    let missing = workspace.path().join("missing.csv");
    binary()
        .args(["analyze", "-i", missing.to_str().unwrap(), "--all"])
        .assert()
        .failure()
        .stderr(contains("error: Opening input file"));
}

#[test]
fn analyses_lists_the_catalog() {
    binary()
        .arg("analyses")
        .assert()
        .success()
        .stdout(
            contains("type-counts")
                .and(contains("Compare online and offline order ratings"))
                .and(contains("Heatmap of Restaurant Types and Online Orders")),
        );
}

#[test]
fn preview_shows_cleaned_rows_and_summary() {
    let path = fixture_path(RESTAURANTS);
    binary()
        .args(["preview", "-i", path.to_str().unwrap(), "--rows", "3"])
        .assert()
        .success()
        .stdout(
            contains("Spice Elephant")
                .and(contains("Addhuri").not())
                .and(contains("13 of 15 row(s) kept; 2 dropped")),
        );
}

#[test]
fn stdin_input_is_supported() {
    let csv = std::fs::read_to_string(fixture_path(RESTAURANTS)).expect("read fixture");
    binary()
        .args(["analyze", "-i", "-", "-a", "max-votes"])
        .write_stdin(csv)
        .assert()
        .success()
        .stdout(contains("Onesta"));
}
