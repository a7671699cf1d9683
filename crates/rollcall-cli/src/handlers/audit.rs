use crate::handlers::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::{CommandResultViewModel, StatusBadge};
use anyhow::Result;
use chrono::{NaiveTime, TimeZone, Utc};
use rollcall_engine::AuditQuery;
use rollcall_runtime::Rollcall;
use rollcall_types::AttendanceDate;

pub struct ListArgs {
    pub actor: Option<String>,
    pub action: Option<String>,
    pub search: Option<String>,
    pub since: Option<AttendanceDate>,
    pub until: Option<AttendanceDate>,
    pub limit: usize,
}

fn query_of(args: &ListArgs) -> AuditQuery {
    let start_of = |d: AttendanceDate| Utc.from_utc_datetime(&d.date().and_time(NaiveTime::MIN));
    let end_of = |d: AttendanceDate| {
        let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        Utc.from_utc_datetime(&d.date().and_time(last))
    };
    AuditQuery {
        actor: args.actor.clone(),
        action_prefix: args.action.clone(),
        text: args.search.clone(),
        since: args.since.map(start_of),
        until: args.until.map(end_of),
        limit: None,
    }
}

pub fn list(workspace: &Rollcall, args: ListArgs, ctx: &HandlerContext) -> Result<()> {
    let mut query = query_of(&args);
    let total_matching = workspace.audit().list(&query)?.len();
    query.limit = Some(args.limit);
    let records = workspace.audit().list(&query)?;

    let vm = presenters::present_audit_list(&records, total_matching);
    let mut result = CommandResultViewModel::new(vm);
    if records.len() < total_matching {
        result = result.with_badge(StatusBadge::info(format!(
            "Showing {} of {} entries",
            records.len(),
            total_matching
        )));
    }
    ctx.render(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds_cover_the_whole_day() {
        let day: AttendanceDate = "2024-10-07".parse().unwrap();
        let query = query_of(&ListArgs {
            actor: None,
            action: None,
            search: None,
            since: Some(day),
            until: Some(day),
            limit: 10,
        });
        assert_eq!(query.since.unwrap().to_rfc3339(), "2024-10-07T00:00:00+00:00");
        assert!(query.until.unwrap().to_rfc3339().starts_with("2024-10-07T23:59:59.999"));
        assert_eq!(query.limit, None);
    }
}
