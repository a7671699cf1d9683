use chrono::{DateTime, Utc};
use rollcall_types::AuditRecord;

/// Client-side filter over the audit trail. Results are newest first.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// Exact actor, case-insensitive
    pub actor: Option<String>,
    /// e.g. "attendance." matches "attendance.save"
    pub action_prefix: Option<String>,
    /// Substring over action, resource and details
    pub text: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl AuditQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self, record: &AuditRecord) -> bool {
        if let Some(actor) = &self.actor
            && !record.actor.eq_ignore_ascii_case(actor)
        {
            return false;
        }
        if let Some(prefix) = &self.action_prefix
            && !record.action.starts_with(prefix.as_str())
        {
            return false;
        }
        if self.since.is_some_and(|since| record.at < since) {
            return false;
        }
        if self.until.is_some_and(|until| record.at > until) {
            return false;
        }
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let haystacks = [&record.action, &record.resource, &record.details];
            if !haystacks.iter().any(|h| h.to_lowercase().contains(&needle)) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, records: &[AuditRecord]) -> Vec<AuditRecord> {
        let mut hits: Vec<AuditRecord> = records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.at.cmp(&a.at));
        if let Some(limit) = self.limit {
            hits.truncate(limit);
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 2, hour, 0, 0).unwrap()
    }

    fn records() -> Vec<AuditRecord> {
        vec![
            AuditRecord::new("mrs.k", "attendance.save", "class/7b/2024-09-02", "28 present")
                .at(at(8)),
            AuditRecord::new("admin", "role.grant", "role/teacher", "attendance:edit").at(at(9)),
            AuditRecord::new("Mrs.K", "attendance.save", "class/7b/2024-09-03", "27 present")
                .at(at(10)),
        ]
    }

    #[test]
    fn test_newest_first_with_limit() {
        let q = AuditQuery {
            limit: Some(2),
            ..AuditQuery::new()
        };
        let hits = q.apply(&records());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].at, at(10));
        assert_eq!(hits[1].action, "role.grant");
    }

    #[test]
    fn test_actor_and_prefix() {
        let q = AuditQuery {
            actor: Some("MRS.K".into()),
            action_prefix: Some("attendance.".into()),
            ..AuditQuery::new()
        };
        assert_eq!(q.apply(&records()).len(), 2);
    }

    #[test]
    fn test_text_and_time_window() {
        let q = AuditQuery {
            text: Some("ATTENDANCE:EDIT".into()),
            ..AuditQuery::new()
        };
        assert_eq!(q.apply(&records())[0].actor, "admin");

        let q = AuditQuery {
            since: Some(at(9)),
            until: Some(at(9)),
            ..AuditQuery::new()
        };
        let hits = q.apply(&records());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].resource, "role/teacher");
    }
}
