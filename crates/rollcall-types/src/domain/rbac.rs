use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Dashboard area a permission applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Attendance,
    Students,
    Classes,
    Reports,
    AuditLog,
    Roles,
}

impl Module {
    pub const ALL: [Module; 6] = [
        Module::Attendance,
        Module::Students,
        Module::Classes,
        Module::Reports,
        Module::AuditLog,
        Module::Roles,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Module::Attendance => "Attendance",
            Module::Students => "Students",
            Module::Classes => "Classes",
            Module::Reports => "Reports",
            Module::AuditLog => "Audit Log",
            Module::Roles => "Roles",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Module::Attendance => "attendance",
            Module::Students => "students",
            Module::Classes => "classes",
            Module::Reports => "reports",
            Module::AuditLog => "audit_log",
            Module::Roles => "roles",
        };
        f.write_str(name)
    }
}

impl FromStr for Module {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.to_string() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| Error::parse("module", s))
    }
}

/// Operation a permission grants within a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
        };
        f.write_str(name)
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.to_string() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| Error::parse("action", s))
    }
}

/// A single grant, serialized as "module:action"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Permission {
    pub module: Module,
    pub action: Action,
}

impl Permission {
    pub fn new(module: Module, action: Action) -> Self {
        Self { module, action }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.module, self.action)
    }
}

impl FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((module, action)) = s.split_once(':') else {
            return Err(Error::parse("permission (expected module:action)", s));
        };
        Ok(Self {
            module: module.parse()?,
            action: action.parse()?,
        })
    }
}

impl From<Permission> for String {
    fn from(p: Permission) -> Self {
        p.to_string()
    }
}

impl TryFrom<String> for Permission {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Target of a grant or revoke: one cell, a module row, an action column or everything.
///
/// Parsed from `module:action`, `module` (or `module:*`), `*:action`, or `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionScope {
    One(Permission),
    Module(Module),
    Action(Action),
    All,
}

impl PermissionScope {
    pub fn permissions(&self) -> Vec<Permission> {
        let all = Module::ALL
            .iter()
            .flat_map(|&m| Action::ALL.iter().map(move |&a| Permission::new(m, a)));
        match *self {
            PermissionScope::One(p) => vec![p],
            PermissionScope::Module(module) => all.filter(|p| p.module == module).collect(),
            PermissionScope::Action(action) => all.filter(|p| p.action == action).collect(),
            PermissionScope::All => all.collect(),
        }
    }
}

impl fmt::Display for PermissionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionScope::One(p) => write!(f, "{}", p),
            PermissionScope::Module(m) => write!(f, "{}:*", m),
            PermissionScope::Action(a) => write!(f, "*:{}", a),
            PermissionScope::All => f.write_str("*"),
        }
    }
}

impl FromStr for PermissionScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, action) = s.trim().split_once(':').unwrap_or((s.trim(), "*"));
        match (module, action) {
            ("*", "*") => Ok(PermissionScope::All),
            ("*", action) => Ok(PermissionScope::Action(action.parse()?)),
            (module, "*") => Ok(PermissionScope::Module(module.parse()?)),
            (module, action) => Ok(PermissionScope::One(Permission::new(
                module.parse()?,
                action.parse()?,
            ))),
        }
    }
}

/// Named bundle of permissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Slug, e.g. "teacher"
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Built-in roles cannot be deleted
    #[serde(default)]
    pub system: bool,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl Role {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            system: false,
            permissions: BTreeSet::new(),
        }
    }

    pub fn allows(&self, module: Module, action: Action) -> bool {
        self.permissions.contains(&Permission::new(module, action))
    }
}
