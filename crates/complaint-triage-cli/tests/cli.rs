use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with an isolated HOME and no rule file from the environment
fn triage(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("complaint-triage").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("COMPLAINT_TRIAGE_RULES")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_text_classifies_with_builtin_rules() {
    let home = TempDir::new().unwrap();
    triage(&home)
        .args(["text", "--output", "json", "My payment failed with an error"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"["Billing Inquiry","Technical Issue"]"#,
        ));
}

#[test]
fn test_text_without_match() {
    let home = TempDir::new().unwrap();
    triage(&home)
        .args(["text", "What", "is", "the", "procedure?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no category)"));
}

#[test]
fn test_classify_jsonl_from_stdin() {
    let home = TempDir::new().unwrap();
    let output = triage(&home)
        .args(["classify", "--output", "json"])
        .write_stdin(
            "{\"id\": 1, \"text\": \"It is so slow\"}\n{\"id\": 2, \"text\": null}\n",
        )
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[0]["categories"][0], "Service Quality");
    assert_eq!(records[1]["text"], serde_json::Value::Null);
    assert_eq!(records[1]["categories"].as_array().unwrap().len(), 0);
}

#[test]
fn test_classify_lines_with_category_filter() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("complaints.txt");
    fs::write(&input, "found a bug\nwrong invoice\nanother glitch\n").unwrap();

    let output = triage(&home)
        .arg("classify")
        .arg(&input)
        .args(["--format", "lines", "--output", "json", "--category", "Technical Issue"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let ids: Vec<i64> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_classify_invalid_jsonl_exit_code() {
    let home = TempDir::new().unwrap();
    triage(&home)
        .arg("classify")
        .write_stdin("not json\n")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_custom_rules_file() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("rules.toml");
    fs::write(
        &rules,
        "[[categories]]\nname = \"Shipping\"\nkeywords = [\"parcel\", \"delivery\"]\n",
    )
    .unwrap();

    triage(&home)
        .arg("--rules")
        .arg(&rules)
        .args(["text", "--output", "json", "Where is my parcel? Also a bug."])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"["Shipping"]"#));
}

#[test]
fn test_invalid_rules_file_fails_fast() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("rules.toml");
    fs::write(&rules, "[[categories]]\nname = \"Empty\"\nkeywords = []\n").unwrap();

    triage(&home)
        .arg("--rules")
        .arg(&rules)
        .args(["text", "anything"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("has no keywords"));
}

#[test]
fn test_rules_init_and_check() {
    let home = TempDir::new().unwrap();
    let expected = home.path().join(".complaint-triage").join("rules.toml");

    triage(&home)
        .args(["rules", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:"));
    assert!(expected.exists());

    triage(&home)
        .args(["rules", "init"])
        .assert()
        .code(4);

    triage(&home)
        .args(["rules", "init", "--force"])
        .assert()
        .success();

    triage(&home)
        .args(["rules", "check"])
        .arg(&expected)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 categories"));

    // Home rule file is picked up automatically
    triage(&home)
        .args(["rules", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rules.toml"));
}

#[test]
fn test_rules_list_builtin() {
    let home = TempDir::new().unwrap();
    triage(&home)
        .args(["rules", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Feature Request"))
        .stdout(predicate::str::contains("new functionality"));
}

#[test]
fn test_demo_json_report() {
    let home = TempDir::new().unwrap();
    let output = triage(&home)
        .args(["demo", "--output", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["records"].as_array().unwrap().len(), 10);

    let technical: Vec<i64> = report["filtered"]["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(technical, vec![3, 5]);

    let billing: Vec<i64> = report["query"]["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(billing, vec![2, 8]);

    assert_eq!(report["counts"][0]["category"], "Technical Issue");
    assert_eq!(report["counts"][0]["count"], 2);
}

fn write_rules(dir: &TempDir, file: &str, name: &str, keyword: &str) -> std::path::PathBuf {
    let path = dir.path().join(file);
    fs::write(
        &path,
        format!("[[categories]]\nname = \"{name}\"\nkeywords = [\"{keyword}\"]\n"),
    )
    .unwrap();
    path
}

#[test]
fn test_rules_from_environment_variable() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let rules = write_rules(&dir, "shipping.toml", "Shipping", "parcel");

    triage(&home)
        .env("COMPLAINT_TRIAGE_RULES", &rules)
        .args(["text", "--output", "json", "My parcel is lost and there is a bug"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"["Shipping"]"#));
}

#[test]
fn test_rules_flag_overrides_environment_variable() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let env_rules = write_rules(&dir, "shipping.toml", "Shipping", "parcel");
    let flag_rules = write_rules(&dir, "returns.toml", "Returns", "refund");

    triage(&home)
        .env("COMPLAINT_TRIAGE_RULES", &env_rules)
        .arg("--rules")
        .arg(&flag_rules)
        .args(["text", "--output", "json", "Refund my parcel please"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"["Returns"]"#));
}

#[test]
fn test_rules_init_creates_parent_directories() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("nested").join("rules.toml");

    triage(&home)
        .args(["rules", "init"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:"));

    assert!(target.exists());
    assert!(!home.path().join(".complaint-triage").exists());

    triage(&home)
        .args(["rules", "check"])
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 categories"));
}
