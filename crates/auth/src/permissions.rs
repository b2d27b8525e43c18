//! Named permissions and the permission deriver.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use licensehub_core::{DomainError, DomainResult};

use crate::{Role, User};

/// Coarse-grained feature-area permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    ViewDashboard,
    ManageLicenses,
    ManageProducts,
    ManageTenants,
    ManageUsers,
    ViewAnalytics,
    ChangePassword,
}

impl Permission {
    /// Stable transport name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewDashboard => "view-dashboard",
            Self::ManageLicenses => "manage-licenses",
            Self::ManageProducts => "manage-products",
            Self::ManageTenants => "manage-tenants",
            Self::ManageUsers => "manage-users",
            Self::ViewAnalytics => "view-analytics",
            Self::ChangePassword => "change-password",
        }
    }

    /// Every permission, in declaration order.
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
            Permission::ViewDashboard,
            Permission::ManageLicenses,
            Permission::ManageProducts,
            Permission::ManageTenants,
            Permission::ManageUsers,
            Permission::ViewAnalytics,
            Permission::ChangePassword,
        ];

        ALL
    }
}

impl FromStr for Permission {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == value)
            .ok_or_else(|| DomainError::validation(format!("unknown permission '{value}'")))
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Permission set
// ─────────────────────────────────────────────────────────────────────────────

/// Total mapping from every [`Permission`] to a flag.
///
/// Fields are private: a set is only ever produced by [`derive_permissions`]
/// (or the explicit constructors) and is replaced, never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    view_dashboard: bool,
    manage_licenses: bool,
    manage_products: bool,
    manage_tenants: bool,
    manage_users: bool,
    view_analytics: bool,
    change_password: bool,
}

impl PermissionSet {
    /// Everything denied (anonymous).
    pub const fn none() -> Self {
        Self {
            view_dashboard: false,
            manage_licenses: false,
            manage_products: false,
            manage_tenants: false,
            manage_users: false,
            view_analytics: false,
            change_password: false,
        }
    }

    /// Only change-password granted (reset pending).
    pub const fn password_reset_only() -> Self {
        Self {
            change_password: true,
            ..Self::none()
        }
    }

    /// Build a set granting exactly the given permissions.
    pub fn from_granted(granted: impl IntoIterator<Item = Permission>) -> Self {
        granted.into_iter().fold(Self::none(), |mut set, permission| {
            *set.slot(permission) = true;
            set
        })
    }

    pub fn get(&self, permission: Permission) -> bool {
        match permission {
            Permission::ViewDashboard => self.view_dashboard,
            Permission::ManageLicenses => self.manage_licenses,
            Permission::ManageProducts => self.manage_products,
            Permission::ManageTenants => self.manage_tenants,
            Permission::ManageUsers => self.manage_users,
            Permission::ViewAnalytics => self.view_analytics,
            Permission::ChangePassword => self.change_password,
        }
    }

    /// True while a password reset is pending. Role and vendor based access
    /// outside this set must be withheld as well.
    pub fn is_reset_pending(&self) -> bool {
        self.change_password
    }

    /// Granted permissions, in declaration order.
    pub fn granted(&self) -> impl Iterator<Item = Permission> + '_ {
        Permission::all().iter().copied().filter(|p| self.get(*p))
    }

    fn slot(&mut self, permission: Permission) -> &mut bool {
        match permission {
            Permission::ViewDashboard => &mut self.view_dashboard,
            Permission::ManageLicenses => &mut self.manage_licenses,
            Permission::ManageProducts => &mut self.manage_products,
            Permission::ManageTenants => &mut self.manage_tenants,
            Permission::ManageUsers => &mut self.manage_users,
            Permission::ViewAnalytics => &mut self.view_analytics,
            Permission::ChangePassword => &mut self.change_password,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Deriver
// ─────────────────────────────────────────────────────────────────────────────

/// Derive the permission set for a user snapshot.
///
/// - No IO
/// - No panics
/// - Unknown roles get `view-dashboard` only
/// - A pending password reset overrides every role grant
pub fn derive_permissions(user: Option<&User>) -> PermissionSet {
    let Some(user) = user else {
        return PermissionSet::none();
    };

    let change_password = user.password_reset_required;
    if change_password {
        debug!(
            user_id = %user.id,
            role = %user.role,
            "password reset pending; role grants suppressed"
        );
        return PermissionSet::password_reset_only();
    }

    let role = &user.role;
    let superuser = matches!(role, Role::Superuser);
    let admin = matches!(role, Role::Admin);
    let support = matches!(role, Role::Support);
    let vendor_manager = matches!(role, Role::VendorManager);
    let vendor_admin = matches!(role, Role::VendorAdmin);

    let permissions = PermissionSet {
        view_dashboard: true,
        manage_licenses: superuser || admin || support || vendor_manager || vendor_admin,
        manage_products: superuser || admin || vendor_manager || vendor_admin,
        manage_tenants: superuser || admin,
        manage_users: superuser || admin || vendor_manager,
        view_analytics: superuser || admin || support || vendor_manager || vendor_admin,
        change_password,
    };

    debug!(user_id = %user.id, role = %user.role, ?permissions, "permissions derived");
    permissions
}
