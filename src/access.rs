// src/access.rs
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Actor, EmployeeId, Role};

// --- Operations ---

/// Operations gated by the policy, one per row of the permission matrix.
/// Create/update/delete share a row per subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    EmployeeWrite,
    DepartmentWrite,
    UserWrite,
    PayrollWrite,
    PayrollList,
    PunchWrite,
    PunchDelete,
    PunchList,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::EmployeeWrite => "employee.write",
            Operation::DepartmentWrite => "department.write",
            Operation::UserWrite => "user.write",
            Operation::PayrollWrite => "payroll.write",
            Operation::PayrollList => "payroll.list",
            Operation::PunchWrite => "punch.write",
            Operation::PunchDelete => "punch.delete",
            Operation::PunchList => "punch.list",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Permission table ---

/// What the matrix grants a (role, operation) pair. `SelfOnly` narrows
/// reads to the actor's own employee id and restricts mutations to targets
/// matching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    SelfOnly,
    Denied,
}

static POLICY: Lazy<HashMap<(Role, Operation), Access>> = Lazy::new(|| {
    use Access::*;
    use Operation::*;
    use Role::*;

    let mut table = HashMap::new();

    // Staff roles share the employee-record and punch-administration rows.
    for role in [Admin, Hr, Manager] {
        table.insert((role, EmployeeWrite), Granted);
        table.insert((role, PayrollList), Granted);
        table.insert((role, PunchDelete), Granted);
        table.insert((role, PunchList), Granted);
        table.insert((role, PunchWrite), Denied);
    }

    // Structural records and payroll mutations are admin-only.
    for op in [DepartmentWrite, UserWrite, PayrollWrite] {
        table.insert((Admin, op), Granted);
        table.insert((Hr, op), Denied);
        table.insert((Manager, op), Denied);
        table.insert((Employee, op), Denied);
    }

    // Employees punch for themselves and read their own rows only.
    table.insert((Employee, EmployeeWrite), Denied);
    table.insert((Employee, PayrollList), SelfOnly);
    table.insert((Employee, PunchWrite), SelfOnly);
    table.insert((Employee, PunchDelete), Denied);
    table.insert((Employee, PunchList), SelfOnly);

    table
});

/// Scope granted to a list read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadScope {
    All,
    Employee(EmployeeId),
}

pub fn access_for(role: Role, operation: Operation) -> Access {
    POLICY
        .get(&(role, operation))
        .copied()
        .unwrap_or(Access::Denied)
}

/// The raw policy predicate: may an actor with `role` (linked to
/// `actor_employee_id`) run `operation` against `target_employee_id`?
pub fn may_perform(
    role: Role,
    operation: Operation,
    target_employee_id: EmployeeId,
    actor_employee_id: EmployeeId,
) -> bool {
    match access_for(role, operation) {
        Access::Granted => true,
        Access::Denied => false,
        Access::SelfOnly => actor_employee_id > 0 && target_employee_id == actor_employee_id,
    }
}

/// Gate for mutations. A self-only grant only reaches the actor's own
/// employee id; denials are final.
pub fn check_mutation(
    actor: &Actor,
    operation: Operation,
    target_employee_id: EmployeeId,
) -> Result<(), CoreError> {
    if may_perform(actor.role, operation, target_employee_id, actor.employee_id) {
        Ok(())
    } else {
        warn!(
            "access denied: role={} operation={} target_employee={}",
            actor.role, operation, target_employee_id
        );
        Err(CoreError::AccessDenied {
            role: actor.role,
            operation,
        })
    }
}

/// Scope decision for list reads. A self-only grant silently rewrites any
/// requested employee filter to the actor's own id.
pub fn read_scope(
    actor: &Actor,
    operation: Operation,
    requested: Option<EmployeeId>,
) -> Result<ReadScope, CoreError> {
    match access_for(actor.role, operation) {
        Access::Granted => Ok(match requested {
            Some(employee_id) => ReadScope::Employee(employee_id),
            None => ReadScope::All,
        }),
        Access::SelfOnly => {
            if requested.is_some() && requested != Some(actor.employee_id) {
                debug!(
                    "narrowing {} filter to employee {}",
                    operation, actor.employee_id
                );
            }
            Ok(ReadScope::Employee(actor.employee_id))
        }
        Access::Denied => {
            warn!("access denied: role={} operation={}", actor.role, operation);
            Err(CoreError::AccessDenied {
                role: actor.role,
                operation,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OPERATIONS: [Operation; 8] = [
        Operation::EmployeeWrite,
        Operation::DepartmentWrite,
        Operation::UserWrite,
        Operation::PayrollWrite,
        Operation::PayrollList,
        Operation::PunchWrite,
        Operation::PunchDelete,
        Operation::PunchList,
    ];

    #[test]
    fn policy_table_covers_every_pair() {
        for role in [Role::Admin, Role::Hr, Role::Manager, Role::Employee] {
            for op in ALL_OPERATIONS {
                assert!(
                    POLICY.contains_key(&(role, op)),
                    "missing policy entry for {} / {}",
                    role,
                    op
                );
            }
        }
    }

    #[test]
    fn admin_matrix_row() {
        use Access::*;
        assert_eq!(access_for(Role::Admin, Operation::EmployeeWrite), Granted);
        assert_eq!(access_for(Role::Admin, Operation::DepartmentWrite), Granted);
        assert_eq!(access_for(Role::Admin, Operation::UserWrite), Granted);
        assert_eq!(access_for(Role::Admin, Operation::PayrollWrite), Granted);
        assert_eq!(access_for(Role::Admin, Operation::PayrollList), Granted);
        assert_eq!(access_for(Role::Admin, Operation::PunchWrite), Denied);
        assert_eq!(access_for(Role::Admin, Operation::PunchDelete), Granted);
        assert_eq!(access_for(Role::Admin, Operation::PunchList), Granted);
    }

    #[test]
    fn hr_and_manager_matrix_rows() {
        use Access::*;
        for role in [Role::Hr, Role::Manager] {
            assert_eq!(access_for(role, Operation::EmployeeWrite), Granted);
            assert_eq!(access_for(role, Operation::DepartmentWrite), Denied);
            assert_eq!(access_for(role, Operation::UserWrite), Denied);
            assert_eq!(access_for(role, Operation::PayrollWrite), Denied);
            assert_eq!(access_for(role, Operation::PayrollList), Granted);
            assert_eq!(access_for(role, Operation::PunchWrite), Denied);
            assert_eq!(access_for(role, Operation::PunchDelete), Granted);
            assert_eq!(access_for(role, Operation::PunchList), Granted);
        }
    }

    #[test]
    fn employee_matrix_row() {
        use Access::*;
        assert_eq!(access_for(Role::Employee, Operation::EmployeeWrite), Denied);
        assert_eq!(
            access_for(Role::Employee, Operation::DepartmentWrite),
            Denied
        );
        assert_eq!(access_for(Role::Employee, Operation::UserWrite), Denied);
        assert_eq!(access_for(Role::Employee, Operation::PayrollWrite), Denied);
        assert_eq!(access_for(Role::Employee, Operation::PayrollList), SelfOnly);
        assert_eq!(access_for(Role::Employee, Operation::PunchWrite), SelfOnly);
        assert_eq!(access_for(Role::Employee, Operation::PunchDelete), Denied);
        assert_eq!(access_for(Role::Employee, Operation::PunchList), SelfOnly);
    }

    #[test]
    fn self_only_mutation_requires_matching_target() {
        assert!(may_perform(Role::Employee, Operation::PunchWrite, 7, 7));
        assert!(!may_perform(Role::Employee, Operation::PunchWrite, 8, 7));
        // An unlinked account (employee id 0) can never satisfy self-only.
        assert!(!may_perform(Role::Employee, Operation::PunchWrite, 0, 0));
    }

    #[test]
    fn read_scope_rewrites_employee_filters() {
        let actor = Actor::new(Role::Employee, 7);
        let scope = read_scope(&actor, Operation::PunchList, Some(9)).unwrap();
        assert_eq!(scope, ReadScope::Employee(7));

        let scope = read_scope(&actor, Operation::PunchList, None).unwrap();
        assert_eq!(scope, ReadScope::Employee(7));
    }

    #[test]
    fn read_scope_honours_staff_filters() {
        let actor = Actor::new(Role::Manager, 0);
        assert_eq!(
            read_scope(&actor, Operation::PayrollList, None).unwrap(),
            ReadScope::All
        );
        assert_eq!(
            read_scope(&actor, Operation::PunchList, Some(9)).unwrap(),
            ReadScope::Employee(9)
        );
    }

    #[test]
    fn denied_mutation_reports_role_and_operation() {
        let actor = Actor::new(Role::Hr, 0);
        let err = check_mutation(&actor, Operation::PayrollWrite, 7).unwrap_err();
        assert!(matches!(
            err,
            CoreError::AccessDenied {
                role: Role::Hr,
                operation: Operation::PayrollWrite
            }
        ));
    }
}
