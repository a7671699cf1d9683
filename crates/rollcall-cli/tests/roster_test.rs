use predicates::prelude::*;
use rollcall_testing::TestWorld;
use rollcall_testing::assertions::{assert_all_status, assert_audit_contains, assert_row_count};

const DAY: &str = "2024-10-07";

#[test]
fn test_demo_then_show() {
    let world = TestWorld::new();
    world
        .command()
        .args(["demo", "--class", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enrolled 24 sample students"));

    let json = world
        .run_json(&["roster", "show", "--class", "demo", "--date", DAY])
        .unwrap();
    assert_row_count(&json, 24).unwrap();
    assert_all_status(&json, "present").unwrap();
    assert_eq!(json["content"]["summary"]["total"], 24);
    assert_eq!(json["content"]["rows"][0]["name"], "Amara Okafor");
}

#[test]
fn test_demo_twice_is_a_no_op() {
    let world = TestWorld::new().with_demo_class("demo");
    world
        .command()
        .args(["demo", "--class", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already has students"));
}

#[test]
fn test_mark_all_persists_and_is_audited() {
    let world = TestWorld::new().with_demo_class("demo");
    world
        .command()
        .args(["roster", "mark-all", "--class", "demo", "--date", DAY, "--status", "absent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("24 changed"));

    let json = world
        .run_json(&["roster", "show", "--class", "demo", "--date", DAY, "--status", "absent"])
        .unwrap();
    assert_row_count(&json, 24).unwrap();

    // Other days are untouched
    let json = world
        .run_json(&["roster", "show", "--class", "demo", "--date", "2024-10-08", "--status", "a"])
        .unwrap();
    assert_row_count(&json, 0).unwrap();

    let audit = world.run_json(&["audit", "list"]).unwrap();
    assert_audit_contains(&audit, "attendance.mark_all").unwrap();
    assert_audit_contains(&audit, "attendance.save").unwrap();
    assert_eq!(audit["content"]["entries"][0]["actor"], "tester");
}

#[test]
fn test_search_and_sort() {
    let world = TestWorld::new().with_demo_class("demo");
    let json = world
        .run_json(&[
            "roster", "show", "--class", "demo", "--date", DAY, "--search", "an", "--sort", "name",
            "--desc",
        ])
        .unwrap();
    assert_row_count(&json, 3).unwrap();
    let names: Vec<&str> = json["content"]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Yuki Tanaka", "Vera Ivanova", "Maya Fernandes"]);

    // An exact roll number also matches
    let json = world
        .run_json(&["roster", "show", "--class", "demo", "--date", DAY, "--search", "7"])
        .unwrap();
    assert_row_count(&json, 1).unwrap();
    assert_eq!(json["content"]["rows"][0]["name"], "Grace Kim");
}

#[test]
fn test_export_to_stdout() {
    let world = TestWorld::new().with_demo_class("demo");
    let result = world
        .run(&[
            "roster", "export", "--class", "demo", "--date", DAY, "--search", "an", "--stdout",
        ])
        .unwrap();
    assert!(result.success(), "{}", result.stderr());
    insta::assert_snapshot!(result.stdout(), @r"
    roll_number,name,status
    13,Maya Fernandes,present
    22,Vera Ivanova,present
    24,Yuki Tanaka,present
    ");
}

#[test]
fn test_export_writes_file() {
    let world = TestWorld::new().with_demo_class("demo");
    let out = world.temp_dir().join("out");
    world
        .command()
        .args(["roster", "export", "--class", "demo", "--date", DAY, "--as", "json", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 24 rows"));

    let path = out.join("attendance_demo_2024-10-07.json");
    let content: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(content["class_id"], "demo");
    assert_eq!(content["entries"].as_array().unwrap().len(), 24);
}

#[test]
fn test_attendance_without_terminal_prints_the_sheet() {
    let world = TestWorld::new().with_demo_class("demo");
    world
        .command()
        .args(["attendance", "--class", "demo", "--date", DAY])
        .assert()
        .success()
        .stdout(predicate::str::contains("Yuki Tanaka"));
}

#[test]
fn test_unknown_class_fails() {
    let world = TestWorld::new();
    world
        .command()
        .args(["roster", "show", "--class", "nope", "--date", DAY])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_missing_class_points_at_config() {
    let world = TestWorld::new();
    world
        .command()
        .args(["roster", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("default_class"));
}

#[test]
fn test_bad_date_is_rejected_by_the_parser() {
    let world = TestWorld::new();
    world
        .command()
        .args(["roster", "show", "--class", "demo", "--date", "07/10/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}
