use std::path::{Path, PathBuf};

use super::Context;
use crate::backend::summarize;
use crate::{Error, Result};
use rollcall_engine::{
    BatchLedger, ExportKind, Roster, RosterFilter, RosterView, SaveRequest, SortDirection,
    SortKey, export_file_name, roster_to_csv, roster_to_json,
};
use rollcall_types::{AttendanceDate, AttendanceStatus, ClassId, RosterEntry, SaveReceipt};

#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Clone)]
pub struct AttendanceOps {
    ctx: Context,
}

impl AttendanceOps {
    pub(crate) fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    pub fn classes(&self) -> Result<Vec<ClassId>> {
        self.ctx.backend.list_classes()
    }

    pub fn roster(&self, class_id: &ClassId, date: AttendanceDate) -> Result<Vec<RosterEntry>> {
        self.ctx.backend.fetch_roster(class_id, date)
    }

    /// Persist a snapshot taken by the attendance screen
    pub fn save(&self, request: &SaveRequest) -> Result<SaveReceipt> {
        let receipt =
            self.ctx
                .backend
                .save_roster(&request.class_id, request.date, &request.entries)?;
        if receipt.success {
            self.ctx.audit(
                "attendance.save",
                format!("class/{}/{}", request.class_id, request.date),
                summarize(&request.entries),
            );
            tracing::info!(class = %request.class_id, date = %request.date, "attendance saved");
        } else {
            tracing::warn!(class = %request.class_id, message = %receipt.message, "save rejected");
        }
        Ok(receipt)
    }

    /// Set every student of the day to `status` and save. Returns how many changed.
    pub fn mark_all(
        &self,
        class_id: &ClassId,
        date: AttendanceDate,
        status: AttendanceStatus,
    ) -> Result<(usize, SaveReceipt)> {
        let mut roster = Roster::new(self.roster(class_id, date)?);
        let changed = BatchLedger::new().mark_all(&mut roster, status);
        let request = SaveRequest {
            class_id: class_id.clone(),
            date,
            entries: roster.entries().to_vec(),
            revision: roster.revision(),
        };
        let receipt = self.save(&request)?;
        if receipt.success {
            self.ctx.audit(
                "attendance.mark_all",
                format!("class/{}/{}", class_id, date),
                format!("{} changed to {}", changed, status),
            );
        }
        Ok((changed, receipt))
    }

    /// Filtered and sorted rows in display order
    pub fn view(
        &self,
        class_id: &ClassId,
        date: AttendanceDate,
        filter: RosterFilter,
        sort: SortKey,
        direction: SortDirection,
    ) -> Result<Vec<RosterEntry>> {
        let roster = Roster::new(self.roster(class_id, date)?);
        let mut view = RosterView::new();
        view.filter = filter;
        view.sort = sort;
        view.direction = direction;
        view.rebuild(&roster);
        Ok(view.entries(&roster).cloned().collect())
    }

    pub fn render(
        &self,
        class_id: &ClassId,
        date: AttendanceDate,
        kind: ExportKind,
        rows: &[RosterEntry],
    ) -> Result<String> {
        match kind {
            ExportKind::Csv => roster_to_csv(rows).map_err(|e| Error::Export(e.to_string())),
            ExportKind::Json => Ok(roster_to_json(class_id, date, rows)?),
        }
    }

    /// Write `attendance_<class>_<date>.<ext>` into `directory`
    pub fn export(
        &self,
        class_id: &ClassId,
        date: AttendanceDate,
        kind: ExportKind,
        rows: &[RosterEntry],
        directory: &Path,
    ) -> Result<ExportOutcome> {
        let content = self.render(class_id, date, kind, rows)?;
        std::fs::create_dir_all(directory)?;
        let path = directory.join(export_file_name(class_id, date, kind));
        std::fs::write(&path, content)?;
        self.ctx.audit(
            "attendance.export",
            format!("class/{}/{}", class_id, date),
            format!("{} rows to {}", rows.len(), path.display()),
        );
        Ok(ExportOutcome {
            path,
            rows: rows.len(),
        })
    }
}
