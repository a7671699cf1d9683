use rollcall_types::{AttendanceDate, ClassId, RosterEntry};
use serde::Serialize;

use crate::roster::AttendanceSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Csv,
    Json,
}

impl ExportKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportKind::Csv => "csv",
            ExportKind::Json => "json",
        }
    }
}

/// `attendance_<class>_<date>.<ext>`
pub fn export_file_name(class_id: &ClassId, date: AttendanceDate, kind: ExportKind) -> String {
    format!("attendance_{}_{}.{}", class_id, date, kind.extension())
}

#[derive(Serialize)]
struct CsvRow<'a> {
    roll_number: u32,
    name: &'a str,
    status: String,
}

/// One row per entry, in the order given
pub fn roster_to_csv<'a>(
    entries: impl IntoIterator<Item = &'a RosterEntry>,
) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut wrote_any = false;
    for entry in entries {
        writer.serialize(CsvRow {
            roll_number: entry.roll_number,
            name: &entry.name,
            status: entry.status.to_string(),
        })?;
        wrote_any = true;
    }
    if !wrote_any {
        writer.write_record(["roll_number", "name", "status"])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[derive(Serialize)]
struct JsonExport<'a> {
    class_id: &'a ClassId,
    date: AttendanceDate,
    summary: AttendanceSummary,
    entries: Vec<&'a RosterEntry>,
}

pub fn roster_to_json<'a>(
    class_id: &'a ClassId,
    date: AttendanceDate,
    entries: impl IntoIterator<Item = &'a RosterEntry>,
) -> serde_json::Result<String> {
    let entries: Vec<&RosterEntry> = entries.into_iter().collect();
    let export = JsonExport {
        class_id,
        date,
        summary: AttendanceSummary::of(entries.iter().copied()),
        entries,
    };
    serde_json::to_string_pretty(&export)
}
