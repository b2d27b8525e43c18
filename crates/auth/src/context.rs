//! Authorization snapshot handed to presentation and routing code.
//!
//! Nothing here reads ambient state: callers build an [`Authorization`] from
//! the latest [`AuthSnapshot`] and pass it explicitly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AbilityMatrix, Permission, PermissionSet, User, build_ability, derive_permissions};

/// Snapshot published by the authentication/session layer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub current_user: Option<User>,
    pub is_authenticated: bool,
}

impl AuthSnapshot {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            current_user: Some(user),
            is_authenticated: true,
        }
    }
}

/// Permissions and ability derived from one [`AuthSnapshot`].
///
/// Never patched: a new snapshot means a new `Authorization`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Authorization {
    snapshot: AuthSnapshot,
    permissions: PermissionSet,
    ability: AbilityMatrix,
}

impl Authorization {
    /// Derive everything from `snapshot`.
    ///
    /// A user left behind in an unauthenticated snapshot is ignored.
    pub fn from_snapshot(snapshot: AuthSnapshot) -> Self {
        let user = if snapshot.is_authenticated {
            snapshot.current_user.as_ref()
        } else {
            None
        };
        let permissions = derive_permissions(user);
        let ability = build_ability(&permissions);

        Self {
            snapshot,
            permissions,
            ability,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot.is_authenticated
    }

    /// The acting user, only while authenticated.
    pub fn user(&self) -> Option<&User> {
        if self.snapshot.is_authenticated {
            self.snapshot.current_user.as_ref()
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> &AuthSnapshot {
        &self.snapshot
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn ability(&self) -> &AbilityMatrix {
        &self.ability
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.get(permission)
    }
}

/// Programmer-usage error: the authorization context was never provisioned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("authorization context unavailable")]
    Unavailable,
}

/// Fail fast when a screen asks for authorization outside its provider.
pub fn require_authorization(
    context: Option<&Authorization>,
) -> Result<&Authorization, ContextError> {
    context.ok_or(ContextError::Unavailable)
}

#[cfg(test)]
mod tests {
    use licensehub_core::UserId;

    use super::*;
    use crate::{Action, Role, Subject};

    #[test]
    fn authenticated_snapshot_derives_permissions_and_ability() {
        let admin = User::new(UserId::new(), Role::Admin);
        let authz = Authorization::from_snapshot(AuthSnapshot::authenticated(admin.clone()));

        assert!(authz.is_authenticated());
        assert_eq!(authz.user(), Some(&admin));
        assert!(authz.has(Permission::ManageTenants));
        assert!(authz.ability().can(Action::Manage, Subject::Tenant));
    }

    #[test]
    fn stale_user_in_logged_out_snapshot_is_ignored() {
        let snapshot = AuthSnapshot {
            current_user: Some(User::new(UserId::new(), Role::Superuser)),
            is_authenticated: false,
        };
        let authz = Authorization::from_snapshot(snapshot);

        assert_eq!(authz.user(), None);
        assert_eq!(*authz.permissions(), PermissionSet::none());
        assert!(authz.ability().is_empty());
    }

    #[test]
    fn missing_context_is_reported() {
        let err = require_authorization(None).unwrap_err();
        assert_eq!(err, ContextError::Unavailable);
        assert_eq!(err.to_string(), "authorization context unavailable");

        let authz = Authorization::default();
        assert!(require_authorization(Some(&authz)).is_ok());
    }
}
