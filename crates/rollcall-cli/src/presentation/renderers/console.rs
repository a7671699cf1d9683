use anyhow::Result;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use std::fmt::Display;

use super::traits::Renderer;
use crate::presentation::view_models::{CommandResultViewModel, StatusLevel};

pub struct ConsoleRenderer {
    json_mode: bool,
}

impl ConsoleRenderer {
    pub fn new(json_mode: bool) -> Self {
        Self { json_mode }
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + Display,
    {
        if self.json_mode {
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        if let Some(badge) = &result.badge {
            let label = format!("{} {}", badge.icon(), badge.label);
            let painted = match badge.level {
                StatusLevel::Success => label
                    .if_supports_color(Stream::Stdout, |t| t.green())
                    .to_string(),
                StatusLevel::Info => label
                    .if_supports_color(Stream::Stdout, |t| t.cyan())
                    .to_string(),
                StatusLevel::Warning => label
                    .if_supports_color(Stream::Stdout, |t| t.yellow())
                    .to_string(),
                StatusLevel::Error => label
                    .if_supports_color(Stream::Stdout, |t| t.red())
                    .to_string(),
            };
            println!("{}", painted);
            println!();
        }

        print!("{}", result.content);

        if !result.suggestions.is_empty() {
            println!(
                "\n{}",
                "Next:".if_supports_color(Stream::Stdout, |t| t.bold())
            );
            for tip in &result.suggestions {
                print!("  • {}", tip.description);
                if let Some(cmd) = &tip.command {
                    print!(": {}", cmd.if_supports_color(Stream::Stdout, |t| t.cyan()));
                }
                println!();
            }
        }

        Ok(())
    }
}
