use crate::handlers::HandlerContext;
use crate::presentation::presenters;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, MessageViewModel, StatusBadge,
};
use anyhow::Result;
use rollcall_runtime::Rollcall;
use rollcall_types::PermissionScope;

/// Edit applied to one scope of a role's matrix
#[derive(Debug, Clone, Copy)]
pub enum Change {
    Grant(PermissionScope),
    Revoke(PermissionScope),
    Toggle(PermissionScope),
}

pub fn list(workspace: &Rollcall, ctx: &HandlerContext) -> Result<()> {
    let roles = workspace.roles().list()?;
    let vm = presenters::present_role_list(&roles);
    ctx.render(
        CommandResultViewModel::new(vm).with_suggestion(
            Guidance::new("Inspect a permission matrix").with_command("rollcall roles show <ROLE>"),
        ),
    )
}

pub fn show(workspace: &Rollcall, role_id: &str, ctx: &HandlerContext) -> Result<()> {
    let role = workspace.roles().get(role_id)?;
    ctx.render(CommandResultViewModel::new(presenters::present_role_matrix(&role)))
}

pub fn create(
    workspace: &Rollcall,
    role_id: &str,
    name: Option<&str>,
    description: &str,
    ctx: &HandlerContext,
) -> Result<()> {
    let role = workspace
        .roles()
        .create(role_id, name.unwrap_or(role_id), description)?;
    ctx.render(
        CommandResultViewModel::new(presenters::present_role_matrix(&role))
            .with_badge(StatusBadge::success(format!("Role '{}' created", role.id)))
            .with_suggestion(
                Guidance::new("Grant a module")
                    .with_command(format!("rollcall roles grant {} attendance", role.id)),
            ),
    )
}

pub fn delete(workspace: &Rollcall, role_id: &str, ctx: &HandlerContext) -> Result<()> {
    workspace.roles().delete(role_id)?;
    let vm = MessageViewModel {
        message: format!("Role '{}' deleted", role_id),
        path: None,
    };
    ctx.render(CommandResultViewModel::new(vm).with_badge(StatusBadge::success("Deleted")))
}

pub fn update(
    workspace: &Rollcall,
    role_id: &str,
    change: Change,
    ctx: &HandlerContext,
) -> Result<()> {
    let roles = workspace.roles();
    let (role, label) = match change {
        Change::Grant(scope) => (roles.grant(role_id, scope)?, format!("Granted {}", scope)),
        Change::Revoke(scope) => (roles.revoke(role_id, scope)?, format!("Revoked {}", scope)),
        Change::Toggle(scope) => (roles.toggle(role_id, scope)?, format!("Toggled {}", scope)),
    };
    ctx.render(
        CommandResultViewModel::new(presenters::present_role_matrix(&role))
            .with_badge(StatusBadge::success(label)),
    )
}
