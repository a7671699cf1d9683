mod attendance;
mod audit;
mod roles;
mod students;
mod workspace;

pub use attendance::{AttendanceOps, ExportOutcome};
pub use audit::AuditOps;
pub use roles::RoleOps;
pub use students::StudentOps;
pub use workspace::Rollcall;

use std::sync::Arc;

use crate::backend::AttendanceBackend;
use rollcall_types::AuditRecord;

/// Shared by every ops struct: the backend plus who is acting
#[derive(Clone)]
pub(crate) struct Context {
    pub(crate) backend: Arc<dyn AttendanceBackend>,
    pub(crate) actor: Arc<str>,
}

impl Context {
    /// Logged on failure; the primary write is already done by then.
    pub(crate) fn audit(&self, action: &str, resource: String, details: String) {
        let record = AuditRecord::new(self.actor.as_ref(), action, resource, details);
        if let Err(err) = self.backend.append_audit(&record) {
            tracing::warn!(%err, action, "failed to append audit record");
        }
    }
}
