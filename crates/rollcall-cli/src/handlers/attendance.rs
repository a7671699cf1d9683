use std::io;

use crate::args::{SheetArgs, ViewArgs};
use crate::handlers::{HandlerContext, roster};
use crate::presentation::renderers::TuiRenderer;
use crate::types::{SortArg, ViewArg};
use anyhow::Result;
use is_terminal::IsTerminal;
use rollcall_engine::{AttendanceScreen, ScreenSettings};
use rollcall_runtime::Rollcall;

pub fn handle(
    workspace: &Rollcall,
    sheet: &SheetArgs,
    view: Option<ViewArg>,
    ctx: &HandlerContext,
) -> Result<()> {
    // Without a terminal there is nothing to drive the screen; print the sheet instead
    if ctx.is_json() || !io::stdout().is_terminal() || !io::stdin().is_terminal() {
        let view = ViewArgs {
            status: None,
            search: None,
            sort: SortArg::Roll,
            desc: false,
        };
        return roster::show(workspace, sheet, &view, ctx);
    }

    let (class_id, date) = roster::resolve_sheet(workspace, sheet)?;
    let entries = workspace.attendance().roster(&class_id, date)?;
    let ui = &workspace.config().ui;
    let settings = ScreenSettings {
        view_mode: view.map(Into::into).unwrap_or(ui.default_view),
        notification_ttl: ui.notification_ttl(),
    };
    tracing::info!(class = %class_id, %date, students = entries.len(), "attendance screen opened");

    let screen = AttendanceScreen::new(class_id.clone(), date, entries, settings);
    let renderer = TuiRenderer::new(
        screen,
        workspace.attendance(),
        workspace.save_worker(),
        ui.cell_width_px,
    );
    let outcome = renderer.run()?;

    if outcome.unsaved_changes {
        tracing::warn!(class = %class_id, %date, "quit with unsaved changes");
        eprintln!(
            "Warning: unsaved changes to class {} on {} were discarded",
            class_id, date
        );
    }
    Ok(())
}
