//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against the sample session and verify outputs.
//! HOME points at a temp dir so config files never touch the real one.

use std::process::Command;

use tempfile::TempDir;

const TODAY: &str = "2024-12-26";

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli_in(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_goalbank-cli"))
        .env("HOME", home.path())
        .env("GOALBANK_ENV", "dev")
        .env_remove("GOALBANK_LOG")
        .args(["--today", TODAY])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli(args: &[&str]) -> (String, String, i32) {
    let home = TempDir::new().unwrap();
    run_cli_in(&home, args)
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid JSON from {args:?}: {e}\n{stdout}"))
}

#[test]
fn test_goal_list() {
    let (stdout, _, code) = run_cli(&["goal", "list"]);
    assert_eq!(code, 0, "Goal list failed");
    assert!(stdout.contains("Dream car"));
    assert!(stdout.contains("Total saved:"));
}

#[test]
fn test_goal_list_json() {
    let goals = run_json(&["goal", "list", "--json"]);
    let goals = goals.as_array().unwrap();
    assert_eq!(goals.len(), 3);

    let travel = goals.iter().find(|g| g["id"] == "travel").unwrap();
    assert_eq!(travel["progress"], 80);
    assert_eq!(travel["is_overdue"], false);
}

#[test]
fn test_goal_list_empty_session() {
    let (stdout, _, code) = run_cli(&["--empty", "goal", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No goals yet"));
}

#[test]
fn test_goal_add_json() {
    let goal = run_json(&["goal", "add", "Laptop", "2000000", "2025-09-01", "--json"]);
    assert_eq!(goal["title"], "Laptop");
    assert_eq!(goal["current_amount"], 0);
    assert_eq!(goal["progress"], 0);
}

#[test]
fn test_goal_add_rejects_zero_target() {
    let (_, stderr, code) = run_cli(&["goal", "add", "Laptop", "0", "2025-09-01"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_goal_contribute_extends_streak() {
    let out = run_json(&["goal", "contribute", "dream-car", "50000", "--memo", "bonus", "--json"]);
    let snapshot = &out["snapshot"];
    assert_eq!(snapshot["streak"]["current_streak"], 2);
    assert_eq!(snapshot["streak"]["longest_streak"], 92);
    assert_eq!(snapshot["points"]["total_points"], 425);

    let kinds: Vec<&str> = out["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["type"].as_str())
        .collect();
    assert_eq!(kinds[..3], ["ContributionRecorded", "StreakUpdated", "PointsEarned"]);

    let latest = &snapshot["recent_contributions"][0];
    assert_eq!(latest["amount"], 50000);
    assert_eq!(latest["memo"], "bonus");
}

#[test]
fn test_goal_contribute_unknown_goal() {
    let (_, stderr, code) = run_cli(&["goal", "contribute", "no-such-goal", "1000"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no-such-goal"));
}

#[test]
fn test_goal_history() {
    let records = run_json(&["goal", "history", "--limit", "2", "--json"]);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["date"], "2024-12-25");
}

#[test]
fn test_achievements_profile() {
    let profile = run_json(&["achievements", "profile", "--json"]);
    assert_eq!(profile["total_points"], 420);
    assert_eq!(profile["level"], 5);
    assert_eq!(profile["points_to_next_level"], 80);
}

#[test]
fn test_achievements_rewards_and_milestones() {
    let (stdout, _, code) = run_cli(&["achievements", "rewards"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("[x]"));

    let milestones = run_json(&["achievements", "milestones", "--json"]);
    assert_eq!(milestones.as_array().unwrap().len(), 4);
}

#[test]
fn test_product_list_sorted_by_rate() {
    let products = run_json(&["product", "list", "--json"]);
    let rates: Vec<u64> = products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["interest_rate_bp"].as_u64().unwrap())
        .collect();
    assert_eq!(rates, vec![720, 450, 380, 250]);
}

#[test]
fn test_product_list_category_filter() {
    let products = run_json(&["product", "list", "--category", "deposit", "--sort", "amount", "--asc", "--json"]);
    let ids: Vec<&str> = products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["salary-plus", "smart-term"]);
}

#[test]
fn test_product_favorite_unknown() {
    let (_, _, code) = run_cli(&["product", "favorite", "missing"]);
    assert_ne!(code, 0);
}

#[test]
fn test_budget_show_json() {
    let budget = run_json(&["budget", "show", "--json"]);
    assert_eq!(budget["total"], 1_200_000);
    assert_eq!(budget["remaining"], 850_000);
    // 350,000 over 26 of 31 days
    assert_eq!(budget["forecast"], 417_308);
}

#[test]
fn test_budget_ranking_json() {
    let ranking = run_json(&["budget", "ranking", "--json"]);
    let rows: Vec<(&str, u64)> = ranking
        .as_array()
        .unwrap()
        .iter()
        .map(|r| (r["category"].as_str().unwrap(), r["amount"].as_u64().unwrap()))
        .collect();
    assert_eq!(rows, vec![("Food", 200_000), ("Transport", 90_000), ("Shopping", 60_000)]);
    assert_eq!(ranking[0]["share_percent"], 57);
}

#[test]
fn test_budget_transactions_signed() {
    let (stdout, _, code) = run_cli(&["budget", "transactions", "--limit", "3"]);
    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("Salary") && lines[0].contains("+₩2,800,000"));
    assert!(lines[1].contains("Starbucks") && lines[1].contains("-₩5,500"));
}

#[test]
fn test_budget_spend_with_category() {
    let (stdout, stderr, code) = run_cli(&["budget", "spend", "100000", "--label", "Bus card", "--category", "Transport"]);
    assert_eq!(code, 0, "spend failed: {stderr}");
    assert!(stdout.contains("₩750,000 left"));
}

#[test]
fn test_goal_friends_json() {
    let friends = run_json(&["goal", "friends", "--json"]);
    let progress: Vec<u64> = friends
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["progress"].as_u64().unwrap())
        .collect();
    assert_eq!(progress, vec![60, 40, 25]);
    assert_eq!(friends[0]["friend"], "Friend 1");
}

#[test]
fn test_achievements_profile_shows_streak_rule() {
    let (stdout, _, code) = run_cli(&["achievements", "profile"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Same-day contributions restart the streak"));
}

#[test]
fn test_budget_overspend_fails() {
    let (_, _, code) = run_cli(&["budget", "spend", "900000"]);
    assert_ne!(code, 0);
}

#[test]
fn test_replay() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("inputs.json");
    std::fs::write(
        &file,
        r#"[
            {"type": "record_contribution", "goal_id": "travel", "amount": 600000, "date": "2024-12-26"},
            {"type": "toggle_favorite", "id": "youth-hope"},
            {"type": "spend", "amount": 50000}
        ]"#,
    )
    .unwrap();

    let (stdout, stderr, code) = run_cli_in(&home, &["replay", file.to_str().unwrap()]);
    assert_eq!(code, 0, "replay failed: {stderr}");
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let travel = snapshot["goals"]
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["id"] == "travel")
        .unwrap();
    assert_eq!(travel["progress"], 100);
    assert_eq!(snapshot["favorites"][0]["id"], "youth-hope");
    assert_eq!(snapshot["budget"]["remaining"], 800_000);
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli_in(&home, &["config", "set", "points.won_per_point", "5000"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = run_cli_in(&home, &["config", "get", "points.won_per_point"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "5000");
}

#[test]
fn test_config_unknown_key() {
    let (_, stderr, code) = run_cli(&["config", "get", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}
