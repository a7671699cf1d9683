//! Assertions over the JSON envelope (`{ badge, content, suggestions }`).

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that a roster result lists `expected` rows.
pub fn assert_row_count(json: &Value, expected: usize) -> Result<()> {
    let rows = json["content"]["rows"]
        .as_array()
        .context("Expected 'content.rows' array in JSON")?;

    if rows.len() != expected {
        anyhow::bail!("Expected {} rows, got {}", expected, rows.len());
    }
    Ok(())
}

/// Assert that every roster row carries `status`.
pub fn assert_all_status(json: &Value, status: &str) -> Result<()> {
    let rows = json["content"]["rows"]
        .as_array()
        .context("Expected 'content.rows' array in JSON")?;

    for (i, row) in rows.iter().enumerate() {
        let actual = row["status"]
            .as_str()
            .with_context(|| format!("Row {} missing status", i))?;
        if actual != status {
            anyhow::bail!("Row {} has status {} but expected {}", i, actual, status);
        }
    }
    Ok(())
}

/// Assert that the audit trail result contains an entry with `action`.
pub fn assert_audit_contains(json: &Value, action: &str) -> Result<()> {
    let entries = json["content"]["entries"]
        .as_array()
        .context("Expected 'content.entries' array in JSON")?;

    if !entries.iter().any(|e| e["action"] == action) {
        anyhow::bail!("No audit entry with action {}", action);
    }
    Ok(())
}
