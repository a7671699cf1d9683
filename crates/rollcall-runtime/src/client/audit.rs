use super::Context;
use crate::Result;
use rollcall_engine::AuditQuery;
use rollcall_types::AuditRecord;

pub struct AuditOps {
    ctx: Context,
}

impl AuditOps {
    pub(crate) fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    pub fn list(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>> {
        let records = self.ctx.backend.audit_log()?;
        Ok(query.apply(&records))
    }
}
