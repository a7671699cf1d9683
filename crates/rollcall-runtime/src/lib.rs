//! Runtime layer: storage collaborators, workspace facade, configuration and
//! the background save worker. Pure screen logic lives in `rollcall-engine`.

pub mod backend;
pub mod client;
pub mod config;
pub mod demo;
pub mod error;
pub mod worker;

pub use backend::{AttendanceBackend, FileBackend, MemoryBackend};
pub use client::{AttendanceOps, AuditOps, ExportOutcome, RoleOps, Rollcall, StudentOps};
pub use config::{Config, ExportConfig, SchoolConfig, UiConfig, expand_tilde, resolve_data_dir};
pub use error::{Error, Result};
pub use worker::{SaveWorker, WorkerEvent};
