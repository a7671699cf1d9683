//! Module x action permission grid used by the role editor.

use std::collections::BTreeSet;

use rollcall_types::{Action, Module, Permission, PermissionScope, Role};
use serde::Serialize;

/// Aggregate state of a group of checkboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    None,
    Partial,
    All,
}

impl Selection {
    fn of(flags: impl IntoIterator<Item = bool>) -> Self {
        let (mut on, mut total) = (0usize, 0usize);
        for flag in flags {
            total += 1;
            on += usize::from(flag);
        }
        match on {
            0 => Selection::None,
            n if n == total => Selection::All,
            _ => Selection::Partial,
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Selection::None => "[ ]",
            Selection::Partial => "[-]",
            Selection::All => "[x]",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    grants: BTreeSet<Permission>,
}

impl PermissionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_role(role: &Role) -> Self {
        Self {
            grants: role.permissions.clone(),
        }
    }

    pub fn into_permissions(self) -> BTreeSet<Permission> {
        self.grants
    }

    pub fn is_granted(&self, module: Module, action: Action) -> bool {
        self.grants.contains(&Permission::new(module, action))
    }

    pub fn set(&mut self, module: Module, action: Action, granted: bool) {
        let permission = Permission::new(module, action);
        if granted {
            self.grants.insert(permission);
        } else {
            self.grants.remove(&permission);
        }
    }

    pub fn toggle(&mut self, module: Module, action: Action) {
        let granted = self.is_granted(module, action);
        self.set(module, action, !granted);
    }

    pub fn row(&self, module: Module) -> Selection {
        Selection::of(Action::ALL.iter().map(|&a| self.is_granted(module, a)))
    }

    pub fn column(&self, action: Action) -> Selection {
        Selection::of(Module::ALL.iter().map(|&m| self.is_granted(m, action)))
    }

    pub fn overall(&self) -> Selection {
        Selection::of(
            Module::ALL
                .iter()
                .flat_map(|&m| Action::ALL.iter().map(move |&a| self.is_granted(m, a))),
        )
    }

    /// A full row is cleared; an empty or partial row is filled.
    pub fn toggle_row(&mut self, module: Module) {
        let fill = self.row(module) != Selection::All;
        for action in Action::ALL {
            self.set(module, action, fill);
        }
    }

    pub fn toggle_column(&mut self, action: Action) {
        let fill = self.column(action) != Selection::All;
        for module in Module::ALL {
            self.set(module, action, fill);
        }
    }

    pub fn toggle_all(&mut self) {
        let fill = self.overall() != Selection::All;
        for module in Module::ALL {
            for action in Action::ALL {
                self.set(module, action, fill);
            }
        }
    }

    pub fn scope(&self, scope: PermissionScope) -> Selection {
        Selection::of(
            scope
                .permissions()
                .iter()
                .map(|p| self.is_granted(p.module, p.action)),
        )
    }

    pub fn set_scope(&mut self, scope: PermissionScope, granted: bool) {
        for p in scope.permissions() {
            self.set(p.module, p.action, granted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_matches_row_and_column() {
        let mut m = PermissionMatrix::new();
        m.set_scope(PermissionScope::Module(Module::Reports), true);
        assert_eq!(m.row(Module::Reports), Selection::All);
        assert_eq!(m.scope(PermissionScope::Action(Action::View)), Selection::Partial);
        m.set_scope(PermissionScope::All, false);
        assert_eq!(m.overall(), Selection::None);
    }

    #[test]
    fn test_row_tri_state() {
        let mut m = PermissionMatrix::new();
        assert_eq!(m.row(Module::Students), Selection::None);
        m.toggle(Module::Students, Action::View);
        assert_eq!(m.row(Module::Students), Selection::Partial);
        for a in [Action::Create, Action::Edit, Action::Delete] {
            m.toggle(Module::Students, a);
        }
        assert_eq!(m.row(Module::Students), Selection::All);
    }

    #[test]
    fn test_toggle_row_fills_partial_then_clears_full() {
        let mut m = PermissionMatrix::new();
        m.set(Module::Attendance, Action::Edit, true);
        m.toggle_row(Module::Attendance);
        assert_eq!(m.row(Module::Attendance), Selection::All);
        m.toggle_row(Module::Attendance);
        assert_eq!(m.row(Module::Attendance), Selection::None);
        assert_eq!(m.overall(), Selection::None);
    }

    #[test]
    fn test_column_and_overall() {
        let mut m = PermissionMatrix::new();
        m.toggle_column(Action::View);
        assert_eq!(m.column(Action::View), Selection::All);
        assert_eq!(m.column(Action::Delete), Selection::None);
        assert_eq!(m.overall(), Selection::Partial);
        assert_eq!(m.row(Module::Roles), Selection::Partial);

        m.toggle_all();
        assert_eq!(m.overall(), Selection::All);
        m.toggle_all();
        assert_eq!(m.overall(), Selection::None);
    }

    #[test]
    fn test_roundtrip_through_role() {
        let mut role = Role::new("clerk", "Clerk");
        role.permissions
            .insert(Permission::new(Module::AuditLog, Action::View));
        let mut m = PermissionMatrix::from_role(&role);
        m.toggle(Module::AuditLog, Action::View);
        m.toggle(Module::Reports, Action::View);
        let perms = m.into_permissions();
        assert_eq!(perms.len(), 1);
        assert!(perms.contains(&Permission::new(Module::Reports, Action::View)));
    }
}
