use std::sync::Arc;
use std::time::{Duration, Instant};

use rollcall_engine::{
    AttendanceScreen, ExportKind, Key, NotificationKind, RegistrationDraft, RosterFilter,
    ScreenEffect, ScreenSettings, SortDirection, SortKey,
};
use rollcall_runtime::{Config, Error, MemoryBackend, Result, Rollcall, WorkerEvent};
use rollcall_types::{AttendanceDate, AttendanceStatus, ClassId, PermissionScope};
use tempfile::TempDir;

fn date() -> AttendanceDate {
    "2024-10-07".parse().unwrap()
}

fn seeded(dir: &TempDir) -> Result<(Rollcall, ClassId)> {
    let workspace = Rollcall::open(dir.path().to_path_buf())?;
    let class = ClassId::new("demo");
    workspace.seed_demo(&class)?;
    Ok((workspace, class))
}

#[test]
fn save_through_worker_round_trips_and_audits() -> Result<()> {
    let dir = TempDir::new()?;
    let (workspace, class) = seeded(&dir)?;
    let entries = workspace.attendance().roster(&class, date())?;
    let settings = ScreenSettings::default();
    let mut screen = AttendanceScreen::new(class.clone(), date(), entries, settings);
    screen.set_viewport_width_px(1100);

    let now = Instant::now();
    screen.handle_key(Key::Right, now);
    screen.handle_key(Key::Char('a'), now);
    assert!(screen.roster().is_dirty());

    let ScreenEffect::Save(request) = screen.handle_key(Key::Ctrl('s'), now) else {
        panic!("expected a save request");
    };
    let worker = workspace.save_worker();
    worker.submit(request)?;

    let Some(WorkerEvent::Saved { revision, result }) = worker.recv_timeout(Duration::from_secs(5))
    else {
        panic!("save did not report back");
    };
    screen.on_save_finished(revision, result.map_err(|e| e.to_string()), now);
    assert!(!screen.roster().is_dirty());
    assert_eq!(
        screen.notification(now).map(|n| n.kind),
        Some(NotificationKind::Saved)
    );

    let reloaded = workspace.attendance().roster(&class, date())?;
    assert_eq!(reloaded[0].status, AttendanceStatus::Absent);

    let audit = workspace.audit().list(&Default::default())?;
    assert!(audit.iter().any(|r| r.action == "attendance.save"));
    Ok(())
}

#[test]
fn failed_save_leaves_roster_dirty() -> Result<()> {
    let backend = Arc::new(MemoryBackend::new());
    let workspace =
        Rollcall::with_backend("/tmp/unused".into(), backend.clone(), Config::default());
    let class = ClassId::new("1a");
    workspace.seed_demo(&class)?;
    backend.fail_saves(true);

    let entries = workspace.attendance().roster(&class, date())?;
    let mut screen = AttendanceScreen::new(class, date(), entries, ScreenSettings::default());
    let now = Instant::now();
    screen.handle_key(Key::Home, now);
    screen.handle_key(Key::Char('l'), now);
    let ScreenEffect::Save(request) = screen.request_save(now) else {
        panic!("expected a save request");
    };
    assert!(matches!(screen.request_save(now), ScreenEffect::None));

    let worker = workspace.save_worker();
    worker.submit(request)?;
    let Some(WorkerEvent::Saved { revision, result }) = worker.recv_timeout(Duration::from_secs(5))
    else {
        panic!("save did not report back");
    };
    assert!(matches!(result, Err(Error::Backend(_))));
    screen.on_save_finished(revision, result.map_err(|e| e.to_string()), now);

    assert!(screen.roster().is_dirty());
    assert!(!screen.is_saving());
    assert_eq!(
        screen.notification(now).map(|n| n.kind),
        Some(NotificationKind::Error)
    );
    assert_eq!(backend.save_count(), 0);
    Ok(())
}

#[test]
fn mark_all_and_export_in_display_order() -> Result<()> {
    let dir = TempDir::new()?;
    let (workspace, class) = seeded(&dir)?;
    let (changed, receipt) = workspace
        .attendance()
        .mark_all(&class, date(), AttendanceStatus::Leave)?;
    assert_eq!(changed, 24);
    assert!(receipt.success);

    let rows = workspace.attendance().view(
        &class,
        date(),
        RosterFilter::default(),
        SortKey::Name,
        SortDirection::Desc,
    )?;
    assert_eq!(rows[0].name, "Yuki Tanaka");

    let outcome = workspace.attendance().export(
        &class,
        date(),
        ExportKind::Csv,
        &rows,
        &workspace.export_dir(),
    )?;
    assert_eq!(outcome.rows, 24);
    assert!(outcome.path.ends_with("attendance_demo_2024-10-07.csv"));
    let csv = std::fs::read_to_string(&outcome.path)?;
    assert!(csv.lines().nth(1).unwrap().contains("Yuki Tanaka"));
    assert!(csv.lines().skip(1).all(|l| l.ends_with(",leave")));
    Ok(())
}

#[test]
fn register_student_validates_and_enrolls() -> Result<()> {
    let dir = TempDir::new()?;
    let (workspace, class) = seeded(&dir)?;
    let students = workspace.students();

    let mut draft = RegistrationDraft {
        first_name: "Zoe".into(),
        last_name: "Adams".into(),
        guardian_name: "Sam Adams".into(),
        guardian_phone: "555 0199".into(),
        class_id: class.to_string(),
        roll_number: Some(3),
        ..Default::default()
    };
    let err = students.register(draft.clone()).unwrap_err();
    assert!(matches!(err, Error::Validation(ref errors) if errors[0].field == "roll_number"));

    draft.roll_number = Some(students.next_roll_number(&class)?);
    let student = students.register(draft)?;
    assert_eq!(student.roll_number, 25);
    assert_eq!(students.list(&class)?.len(), 25);

    let roster = workspace.attendance().roster(&class, date())?;
    assert_eq!(roster.last().map(|e| e.name.as_str()), Some("Zoe Adams"));
    Ok(())
}

#[test]
fn roles_grant_revoke_and_guard_admin() -> Result<()> {
    let dir = TempDir::new()?;
    let workspace = Rollcall::open(dir.path().to_path_buf())?;
    let roles = workspace.roles();

    roles.create("clerk", "Office clerk", "")?;
    let role = roles.grant("clerk", "students".parse()?)?;
    assert_eq!(role.permissions.len(), 4);
    let role = roles.revoke("clerk", "students:delete".parse()?)?;
    assert_eq!(role.permissions.len(), 3);
    let role = roles.toggle("clerk", PermissionScope::All)?;
    assert_eq!(role.permissions.len(), 24);
    let role = roles.toggle("clerk", PermissionScope::All)?;
    assert!(role.permissions.is_empty());

    assert!(matches!(roles.delete("admin"), Err(Error::InvalidOperation(_))));
    roles.delete("clerk")?;
    assert!(matches!(roles.get("clerk"), Err(Error::NotFound(_))));

    let reopened = Rollcall::open(dir.path().to_path_buf())?;
    assert_eq!(reopened.roles().list()?.len(), 2);
    Ok(())
}
