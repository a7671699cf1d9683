use super::Context;
use crate::{Error, Result};
use rollcall_engine::{PermissionMatrix, Selection};
use rollcall_types::{PermissionScope, Role};

pub struct RoleOps {
    ctx: Context,
}

impl RoleOps {
    pub(crate) fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    pub fn list(&self) -> Result<Vec<Role>> {
        self.ctx.backend.list_roles()
    }

    pub fn get(&self, role_id: &str) -> Result<Role> {
        self.list()?
            .into_iter()
            .find(|r| r.id == role_id)
            .ok_or_else(|| Error::NotFound(format!("role '{}'", role_id)))
    }

    pub fn create(&self, role_id: &str, name: &str, description: &str) -> Result<Role> {
        if role_id.trim().is_empty() {
            return Err(Error::InvalidOperation("role id cannot be empty".to_string()));
        }
        if self.list()?.iter().any(|r| r.id == role_id) {
            return Err(Error::InvalidOperation(format!(
                "role '{}' already exists",
                role_id
            )));
        }
        let mut role = Role::new(role_id, name);
        role.description = description.to_string();
        self.ctx.backend.save_role(&role)?;
        self.ctx
            .audit("role.create", format!("role/{}", role_id), name.to_string());
        Ok(role)
    }

    pub fn delete(&self, role_id: &str) -> Result<()> {
        self.ctx.backend.delete_role(role_id)?;
        self.ctx
            .audit("role.delete", format!("role/{}", role_id), String::new());
        Ok(())
    }

    pub fn grant(&self, role_id: &str, scope: PermissionScope) -> Result<Role> {
        self.update(role_id, "role.grant", scope, |m| m.set_scope(scope, true))
    }

    pub fn revoke(&self, role_id: &str, scope: PermissionScope) -> Result<Role> {
        self.update(role_id, "role.revoke", scope, |m| m.set_scope(scope, false))
    }

    /// Full scope is cleared, anything less is filled
    pub fn toggle(&self, role_id: &str, scope: PermissionScope) -> Result<Role> {
        self.update(role_id, "role.toggle", scope, |m| {
            let fill = m.scope(scope) != Selection::All;
            m.set_scope(scope, fill);
        })
    }

    fn update(
        &self,
        role_id: &str,
        action: &str,
        scope: PermissionScope,
        edit: impl FnOnce(&mut PermissionMatrix),
    ) -> Result<Role> {
        let mut role = self.get(role_id)?;
        let mut matrix = PermissionMatrix::from_role(&role);
        edit(&mut matrix);
        role.permissions = matrix.into_permissions();
        self.ctx.backend.save_role(&role)?;
        self.ctx.audit(
            action,
            format!("role/{}", role_id),
            format!("{} ({} granted)", scope, role.permissions.len()),
        );
        Ok(role)
    }
}
