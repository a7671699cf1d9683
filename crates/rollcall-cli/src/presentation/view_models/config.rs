use serde::Serialize;
use std::fmt;

use crate::presentation::formatters::heading;

#[derive(Debug, Serialize)]
pub struct ConfigViewModel {
    pub data_dir: String,
    pub config_path: String,
    pub exists: bool,
    pub actor: String,
    /// The effective configuration as TOML
    pub toml: String,
}

impl fmt::Display for ConfigViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data dir:    {}", self.data_dir)?;
        write!(f, "Config file: {}", self.config_path)?;
        if !self.exists {
            write!(f, " (not created; showing defaults)")?;
        }
        writeln!(f)?;
        writeln!(f, "Acting as:   {}", self.actor)?;
        writeln!(f)?;
        writeln!(f, "{}", heading("Effective settings"))?;
        write!(f, "{}", self.toml)
    }
}
