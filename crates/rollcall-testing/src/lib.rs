//! Testing infrastructure for rollcall integration tests.
//!
//! - `TestWorld`: isolated data directory plus a preconfigured CLI command
//! - `assertions`: checks over the `--format json` envelope

pub mod assertions;
pub mod world;

pub use world::{CliResult, TestWorld};
