use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of the administrative audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    /// Who performed the action (login name or "system")
    pub actor: String,
    /// Dotted action name, e.g. "attendance.save" or "role.grant"
    pub action: String,
    /// Affected resource, e.g. "class/7b/2024-09-02"
    pub resource: String,
    #[serde(default)]
    pub details: String,
}

impl AuditRecord {
    pub fn new(
        actor: impl Into<String>,
        action: impl Into<String>,
        resource: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            at: Utc::now(),
            actor: actor.into(),
            action: action.into(),
            resource: resource.into(),
            details: details.into(),
        }
    }

    pub fn at(mut self, at: DateTime<Utc>) -> Self {
        self.at = at;
        self
    }
}
