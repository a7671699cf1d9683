use serde::{Deserialize, Serialize};

/// Nominal pixel width of one terminal cell, used to feed terminal widths
/// into the breakpoint table.
pub const DEFAULT_CELL_WIDTH_PX: u32 = 8;

/// Presentation of the roster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Responsive card grid
    #[default]
    Grid,
    /// Single-column table
    Table,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::Table,
            ViewMode::Table => ViewMode::Grid,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::Table => "table",
        }
    }
}

/// Responsive breakpoints: <640 -> 1, <768 -> 2, <1024 -> 3, <1280 -> 4, else 5.
pub fn columns_for_width(width_px: u32) -> usize {
    match width_px {
        0..640 => 1,
        640..768 => 2,
        768..1024 => 3,
        1024..1280 => 4,
        _ => 5,
    }
}

/// Column count the navigation grid uses. Table view is always one column.
pub fn columns_per_row(mode: ViewMode, width_px: u32) -> usize {
    match mode {
        ViewMode::Table => 1,
        ViewMode::Grid => columns_for_width(width_px),
    }
}

/// Convert a terminal width in cells into the pixel space of the breakpoints
pub fn cells_to_px(cells: u16, cell_width_px: u32) -> u32 {
    u32::from(cells).saturating_mul(cell_width_px.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        assert_eq!(columns_for_width(0), 1);
        assert_eq!(columns_for_width(639), 1);
        assert_eq!(columns_for_width(640), 2);
        assert_eq!(columns_for_width(767), 2);
        assert_eq!(columns_for_width(768), 3);
        assert_eq!(columns_for_width(1023), 3);
        assert_eq!(columns_for_width(1024), 4);
        assert_eq!(columns_for_width(1279), 4);
        assert_eq!(columns_for_width(1280), 5);
        assert_eq!(columns_for_width(4000), 5);
    }

    #[test]
    fn test_table_ignores_width() {
        assert_eq!(columns_per_row(ViewMode::Table, 1920), 1);
        assert_eq!(columns_per_row(ViewMode::Grid, 1920), 5);
    }

    #[test]
    fn test_terminal_cells() {
        // 80-column terminal lands in the two-column band
        assert_eq!(columns_for_width(cells_to_px(80, DEFAULT_CELL_WIDTH_PX)), 2);
        assert_eq!(columns_for_width(cells_to_px(160, DEFAULT_CELL_WIDTH_PX)), 5);
        assert_eq!(cells_to_px(10, 0), 10);
    }
}
