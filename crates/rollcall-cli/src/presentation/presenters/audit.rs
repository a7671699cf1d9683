use rollcall_types::AuditRecord;

use crate::presentation::formatters::local_time;
use crate::presentation::view_models::{AuditEntryViewModel, AuditListViewModel};

pub fn present_audit_list(records: &[AuditRecord], total_matching: usize) -> AuditListViewModel {
    AuditListViewModel {
        entries: records
            .iter()
            .map(|r| AuditEntryViewModel {
                id: r.id.to_string(),
                at: r.at.to_rfc3339(),
                at_local: local_time(&r.at),
                actor: r.actor.clone(),
                action: r.action.clone(),
                resource: r.resource.clone(),
                details: r.details.clone(),
            })
            .collect(),
        total_matching,
    }
}
