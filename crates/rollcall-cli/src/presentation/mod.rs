//! # Presentation Layer
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] --> [ Output ]
//! ```
//!
//! - `view_models/`: serializable data contracts. `Display` gives the plain form,
//!   `Serialize` the `--format json` form.
//! - `presenters/`: pure conversions from domain values into view models.
//! - `renderers/`: console output and the ratatui attendance screen.
//! - `views/tui/`: ratatui widgets over the screen view model.
//! - `formatters`: small shared string helpers.

pub mod formatters;
pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;

pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{CommandResultViewModel, Guidance, StatusBadge, StatusLevel};
