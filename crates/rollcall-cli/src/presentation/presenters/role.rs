use rollcall_engine::PermissionMatrix;
use rollcall_types::{Action, Module, Role};

use crate::presentation::view_models::{
    MatrixRowViewModel, RoleListViewModel, RoleMatrixViewModel, RoleSummaryViewModel,
};

const CELL_COUNT: usize = Module::ALL.len() * Action::ALL.len();

pub fn present_role_list(roles: &[Role]) -> RoleListViewModel {
    RoleListViewModel {
        roles: roles
            .iter()
            .map(|r| RoleSummaryViewModel {
                id: r.id.clone(),
                name: r.name.clone(),
                description: r.description.clone(),
                system: r.system,
                granted: r.permissions.len(),
                possible: CELL_COUNT,
            })
            .collect(),
    }
}

pub fn present_role_matrix(role: &Role) -> RoleMatrixViewModel {
    let matrix = PermissionMatrix::from_role(role);
    RoleMatrixViewModel {
        id: role.id.clone(),
        name: role.name.clone(),
        system: role.system,
        actions: Action::ALL.iter().map(|a| a.to_string()).collect(),
        rows: Module::ALL
            .iter()
            .map(|&module| MatrixRowViewModel {
                module: module.to_string(),
                label: module.label().to_string(),
                cells: Action::ALL
                    .iter()
                    .map(|&action| matrix.is_granted(module, action))
                    .collect(),
                state: matrix.row(module),
            })
            .collect(),
        column_states: Action::ALL.iter().map(|&a| matrix.column(a)).collect(),
        overall: matrix.overall(),
        permissions: role.permissions.iter().map(|p| p.to_string()).collect(),
    }
}
