//! Explanations of permission decisions and the per-role policy registry.

use serde::Serialize;
use uuid::Uuid;

use licensehub_core::UserId;

use crate::{Action, Permission, Role, Subject, User, build_ability, derive_permissions};

// ─────────────────────────────────────────────────────────────────────────────
// Permission Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Why a permission was or was not derived for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionExplanation {
    /// The permission that was checked.
    pub permission: Permission,

    /// Whether the permission is granted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// The acting role, if a user was present.
    pub role: Option<Role>,

    pub password_reset_required: bool,

    /// If denied, the category of denial.
    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    Anonymous,
    PasswordResetPending,
    NoPasswordResetPending,
    NotGrantedByRole,
}

/// Explain the derivation of `permission` for `user`.
///
/// Reads the result of [`derive_permissions`] rather than re-implementing the
/// policy, so explanations cannot drift from enforcement.
pub fn explain_permission(user: Option<&User>, permission: Permission) -> PermissionExplanation {
    let granted = derive_permissions(user).get(permission);

    let Some(user) = user else {
        return PermissionExplanation {
            permission,
            granted,
            reason: "No authenticated user; every permission is denied".to_string(),
            role: None,
            password_reset_required: false,
            denial: Some(DenialKind::Anonymous),
        };
    };

    let reset = user.password_reset_required;
    let (reason, denial) = match (permission, granted, reset) {
        (Permission::ChangePassword, true, _) => ("A password reset is pending".to_string(), None),
        (Permission::ChangePassword, false, _) => (
            "Password change is only offered while a reset is pending".to_string(),
            Some(DenialKind::NoPasswordResetPending),
        ),
        (_, false, true) => (
            format!("'{permission}' is suppressed until the pending password reset is completed"),
            Some(DenialKind::PasswordResetPending),
        ),
        (_, true, _) => (format!("Role '{}' grants '{permission}'", user.role), None),
        (_, false, false) => (
            format!("Role '{}' does not grant '{permission}'", user.role),
            Some(DenialKind::NotGrantedByRole),
        ),
    };

    PermissionExplanation {
        permission,
        granted,
        reason,
        role: Some(user.role.clone()),
        password_reset_required: reset,
        denial,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Policy Registry
// ─────────────────────────────────────────────────────────────────────────────

/// One role's row of the policy table (for audit/display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub description: &'static str,
    pub permissions: Vec<Permission>,
    pub abilities: Vec<(Action, Subject)>,
}

impl RoleDefinition {
    /// Row for `role`, derived from a representative user with no pending reset.
    pub fn for_role(role: Role) -> Self {
        let probe = User::new(UserId::from_uuid(Uuid::nil()), role.clone());
        let permissions = derive_permissions(Some(&probe));

        Self {
            description: role.description(),
            permissions: permissions.granted().collect(),
            abilities: build_ability(&permissions).rules().collect(),
            role,
        }
    }
}

/// Complete view of the closed role set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyRegistry {
    pub roles: Vec<RoleDefinition>,
}

impl PolicyRegistry {
    /// Every staff role plus one representative machine role.
    pub fn standard() -> Self {
        let machine = Role::parse(&format!("{}CLIENT", crate::MACHINE_ROLE_PREFIX));
        let roles = Role::staff_roles()
            .into_iter()
            .chain(std::iter::once(machine))
            .map(RoleDefinition::for_role)
            .collect();

        Self { roles }
    }

    pub fn role(&self, role: &Role) -> Option<&RoleDefinition> {
        self.roles.iter().find(|definition| &definition.role == role)
    }
}
