use serde::Serialize;
use std::fmt;

/// Outcome of a command that has nothing to show but a sentence
#[derive(Debug, Serialize)]
pub struct MessageViewModel {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl fmt::Display for MessageViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        if let Some(path) = &self.path {
            writeln!(f, "  {}", path)?;
        }
        Ok(())
    }
}
