use predicates::prelude::*;
use rollcall_runtime::{Config, SchoolConfig};
use rollcall_testing::TestWorld;
use rollcall_testing::assertions::assert_audit_contains;

#[test]
fn test_builtin_roles_listed() {
    let world = TestWorld::new();
    let json = world.run_json(&["roles", "list"]).unwrap();
    let ids: Vec<&str> = json["content"]["roles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["admin", "teacher"]);
    assert_eq!(json["content"]["roles"][0]["granted"], 24);
}

#[test]
fn test_role_lifecycle() {
    let world = TestWorld::new();
    world
        .command()
        .args(["roles", "create", "clerk", "--name", "Office clerk"])
        .assert()
        .success();

    let json = world.run_json(&["roles", "grant", "clerk", "students"]).unwrap();
    assert_eq!(json["content"]["permissions"].as_array().unwrap().len(), 4);

    let json = world.run_json(&["roles", "toggle", "clerk", "*:view"]).unwrap();
    assert_eq!(json["content"]["permissions"].as_array().unwrap().len(), 9);

    let json = world
        .run_json(&["roles", "revoke", "clerk", "students:delete"])
        .unwrap();
    assert_eq!(json["content"]["permissions"].as_array().unwrap().len(), 8);

    world
        .command()
        .args(["roles", "show", "clerk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Students"));

    world.command().args(["roles", "delete", "clerk"]).assert().success();
    world
        .command()
        .args(["roles", "show", "clerk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("clerk"));

    let audit = world.run_json(&["audit", "list", "--action", "role."]).unwrap();
    assert_audit_contains(&audit, "role.create").unwrap();
    assert_audit_contains(&audit, "role.delete").unwrap();
    assert_eq!(audit["content"]["total_matching"], 5);
}

#[test]
fn test_builtin_role_cannot_be_deleted() {
    let world = TestWorld::new();
    world
        .command()
        .args(["roles", "delete", "admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("built in"));
}

#[test]
fn test_bad_scope_is_rejected() {
    let world = TestWorld::new();
    world
        .command()
        .args(["roles", "grant", "teacher", "lunch:view"])
        .assert()
        .failure();
}

#[test]
fn test_student_registration() {
    let world = TestWorld::new().with_demo_class("demo");
    let base = [
        "students",
        "add",
        "--class",
        "demo",
        "--first-name",
        "Zoe",
        "--last-name",
        "Adams",
        "--guardian-name",
        "Sam Adams",
        "--guardian-phone",
        "555 0199",
    ];

    let mut taken = base.to_vec();
    taken.extend(["--roll", "3"]);
    world
        .command()
        .args(&taken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("roll_number"));

    world
        .command()
        .args(base)
        .assert()
        .success()
        .stdout(predicate::str::contains("as #25"));

    let json = world.run_json(&["students", "list", "--class", "demo"]).unwrap();
    assert_eq!(json["content"]["students"].as_array().unwrap().len(), 25);
    assert_eq!(json["content"]["students"][24]["name"], "Zoe Adams");
}

#[test]
fn test_registration_reports_every_bad_field() {
    let world = TestWorld::new().with_demo_class("demo");
    world
        .command()
        .args([
            "students",
            "add",
            "--class",
            "demo",
            "--first-name",
            "",
            "--last-name",
            "Adams",
            "--guardian-name",
            "Sam",
            "--guardian-phone",
            "555 0199",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("first_name"));
}

#[test]
fn test_config_init_and_default_class() {
    let world = TestWorld::new().with_demo_class("3b");
    world
        .command()
        .args(["config", "init", "--school", "Hill School", "--default-class", "3b"])
        .assert()
        .success();

    world
        .command()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    let json = world.run_json(&["config", "show"]).unwrap();
    assert_eq!(json["content"]["exists"], true);
    assert!(json["content"]["toml"].as_str().unwrap().contains("Hill School"));

    // Class falls back to [school] default_class
    world
        .command()
        .args(["roster", "show", "--date", "2024-10-07"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Class 3b"));
}

#[test]
fn test_operator_from_config_is_the_audit_actor() {
    let config = Config {
        school: SchoolConfig {
            operator: Some("ms.frizzle".to_string()),
            ..SchoolConfig::default()
        },
        ..Config::default()
    };
    let world = TestWorld::new().with_config(&config);
    world.command().args(["roles", "create", "aide"]).assert().success();

    let audit = world.run_json(&["audit", "list", "--actor", "MS.FRIZZLE"]).unwrap();
    assert_eq!(audit["content"]["entries"].as_array().unwrap().len(), 1);
}

#[test]
fn test_guidance_without_command() {
    let world = TestWorld::new();
    world
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("rollcall demo"));
}
