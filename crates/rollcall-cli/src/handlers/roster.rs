use std::path::PathBuf;

use crate::args::{SheetArgs, ViewArgs};
use crate::handlers::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, MessageViewModel, StatusBadge,
};
use anyhow::{Result, bail};
use rollcall_engine::{AttendanceSummary, ExportKind, RosterFilter, SortDirection};
use rollcall_runtime::Rollcall;
use rollcall_types::{AttendanceDate, AttendanceStatus, ClassId, RosterEntry};

/// Class and day a sheet command works on
pub(crate) fn resolve_sheet(
    workspace: &Rollcall,
    sheet: &SheetArgs,
) -> Result<(ClassId, AttendanceDate)> {
    let class_id = workspace.resolve_class(sheet.class.as_deref())?;
    let date = sheet.date.unwrap_or_else(AttendanceDate::today);
    Ok((class_id, date))
}

fn filter_of(view: &ViewArgs) -> RosterFilter {
    RosterFilter {
        query: view.search.clone().unwrap_or_default(),
        status: view.status,
    }
}

fn direction_of(view: &ViewArgs) -> SortDirection {
    if view.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    }
}

fn rows(
    workspace: &Rollcall,
    class_id: &ClassId,
    date: AttendanceDate,
    view: &ViewArgs,
) -> Result<Vec<RosterEntry>> {
    Ok(workspace.attendance().view(
        class_id,
        date,
        filter_of(view),
        view.sort.into(),
        direction_of(view),
    )?)
}

pub fn show(
    workspace: &Rollcall,
    sheet: &SheetArgs,
    view: &ViewArgs,
    ctx: &HandlerContext,
) -> Result<()> {
    let (class_id, date) = resolve_sheet(workspace, sheet)?;
    let whole = workspace.attendance().roster(&class_id, date)?;
    let rows = rows(workspace, &class_id, date, view)?;

    let filter = filter_of(view);
    let summary = AttendanceSummary::of(&whole);
    let vm = presenters::present_roster(&class_id, date, &rows, summary, &filter);
    let mut result = CommandResultViewModel::new(vm);
    if rows.is_empty() && !whole.is_empty() {
        result = result.with_badge(StatusBadge::warning("No students match the filter"));
    }
    result = result.with_suggestion(
        Guidance::new("Mark attendance interactively")
            .with_command(format!("rollcall attendance --class {} --date {}", class_id, date)),
    );
    ctx.render(result)
}

pub fn mark_all(
    workspace: &Rollcall,
    sheet: &SheetArgs,
    status: AttendanceStatus,
    ctx: &HandlerContext,
) -> Result<()> {
    let (class_id, date) = resolve_sheet(workspace, sheet)?;
    let (changed, receipt) = workspace.attendance().mark_all(&class_id, date, status)?;
    if !receipt.success {
        bail!("{}", receipt.message);
    }

    let vm = MessageViewModel {
        message: format!(
            "Marked all students of class {} {} on {} ({} changed)",
            class_id,
            status.label(),
            date,
            changed
        ),
        path: None,
    };
    ctx.render(
        CommandResultViewModel::new(vm)
            .with_badge(StatusBadge::success(receipt.message))
            .with_suggestion(Guidance::new("Review the sheet").with_command(format!(
                "rollcall roster show --class {} --date {}",
                class_id, date
            ))),
    )
}

pub fn export(
    workspace: &Rollcall,
    sheet: &SheetArgs,
    view: &ViewArgs,
    kind: ExportKind,
    output: Option<PathBuf>,
    to_stdout: bool,
    ctx: &HandlerContext,
) -> Result<()> {
    let (class_id, date) = resolve_sheet(workspace, sheet)?;
    let rows = rows(workspace, &class_id, date, view)?;

    if to_stdout {
        print!("{}", workspace.attendance().render(&class_id, date, kind, &rows)?);
        return Ok(());
    }

    let directory = output.unwrap_or_else(|| workspace.export_dir());
    let outcome = workspace
        .attendance()
        .export(&class_id, date, kind, &rows, &directory)?;
    tracing::info!(path = %outcome.path.display(), rows = outcome.rows, "roster exported");

    let vm = MessageViewModel {
        message: format!("Exported {} rows", outcome.rows),
        path: Some(outcome.path.display().to_string()),
    };
    ctx.render(
        CommandResultViewModel::new(vm).with_badge(StatusBadge::success("Export written")),
    )
}
