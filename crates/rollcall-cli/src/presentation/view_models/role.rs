use serde::Serialize;
use std::fmt;

use crate::presentation::formatters::heading;
use rollcall_engine::Selection;

#[derive(Debug, Serialize)]
pub struct RoleListViewModel {
    pub roles: Vec<RoleSummaryViewModel>,
}

#[derive(Debug, Serialize)]
pub struct RoleSummaryViewModel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub system: bool,
    pub granted: usize,
    pub possible: usize,
}

/// Module rows by action columns, each cell a checkbox marker
#[derive(Debug, Serialize)]
pub struct RoleMatrixViewModel {
    pub id: String,
    pub name: String,
    pub system: bool,
    pub actions: Vec<String>,
    pub rows: Vec<MatrixRowViewModel>,
    pub column_states: Vec<Selection>,
    pub overall: Selection,
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MatrixRowViewModel {
    pub module: String,
    pub label: String,
    pub cells: Vec<bool>,
    pub state: Selection,
}

impl fmt::Display for RoleListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<14} {:<20} {:>9}  DESCRIPTION", "ID", "NAME", "GRANTED")?;
        writeln!(f, "{}", "-".repeat(80))?;
        for role in &self.roles {
            let marker = if role.system { " (system)" } else { "" };
            writeln!(
                f,
                "{:<14} {:<20} {:>4}/{:<4}  {}{}",
                role.id, role.name, role.granted, role.possible, role.description, marker
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for RoleMatrixViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.system { " (system)" } else { "" };
        writeln!(
            f,
            "{}",
            heading(&format!("{} [{}]{}", self.name, self.id, suffix))
        )?;
        writeln!(f)?;

        write!(f, "{:<16}", "")?;
        for action in &self.actions {
            write!(f, "{:^8}", action)?;
        }
        writeln!(f, "{:^8}", "row")?;

        for row in &self.rows {
            write!(f, "{:<16}", row.label)?;
            for &cell in &row.cells {
                write!(f, "{:^8}", if cell { "[x]" } else { "[ ]" })?;
            }
            writeln!(f, "{:^8}", row.state.marker())?;
        }

        write!(f, "{:<16}", "column")?;
        for state in &self.column_states {
            write!(f, "{:^8}", state.marker())?;
        }
        writeln!(f, "{:^8}", self.overall.marker())
    }
}
