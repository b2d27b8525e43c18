//! Header navigation filtered by permissions, role and location.

use serde::Serialize;

use crate::{Permission, PermissionSet, User, is_system_admin, is_vendor_scoped};

/// Inputs to [`build_navigation`].
#[derive(Debug, Clone, Copy)]
pub struct NavigationContext<'a> {
    pub permissions: &'a PermissionSet,
    pub current_user: Option<&'a User>,
    pub current_path: &'a str,
}

/// Custom visibility rule evaluated instead of (or on top of) a permission.
pub type NavigationPredicate = fn(&NavigationContext<'_>) -> bool;

/// How an entry decides it is the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Current path equals the entry path.
    Exact,
    /// Current path starts with the entry path.
    Prefix,
}

impl MatchStrategy {
    pub fn matches(self, entry_path: &str, current_path: &str) -> bool {
        match self {
            Self::Exact => current_path == entry_path,
            Self::Prefix => current_path.starts_with(entry_path),
        }
    }
}

/// Static description of one header entry.
#[derive(Debug, Clone, Copy)]
pub struct NavigationDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub path: &'static str,
    pub permission: Option<Permission>,
    pub predicate: Option<NavigationPredicate>,
    pub matching: MatchStrategy,
}

impl NavigationDefinition {
    fn is_visible(&self, ctx: &NavigationContext<'_>) -> bool {
        let permitted = self.permission.is_none_or(|p| ctx.permissions.get(p));
        let predicate = self.predicate.is_none_or(|check| check(ctx));
        permitted && predicate
    }
}

/// Rendered header entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    pub id: &'static str,
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

// Role-based entries stay hidden while a password reset is pending.
fn tenants_visible(ctx: &NavigationContext<'_>) -> bool {
    if ctx.permissions.is_reset_pending() {
        return false;
    }
    ctx.permissions.get(Permission::ManageTenants) || is_vendor_scoped(ctx.current_user)
}

fn system_admin_only(ctx: &NavigationContext<'_>) -> bool {
    !ctx.permissions.is_reset_pending() && is_system_admin(ctx.current_user)
}

/// Header entries in display order.
pub const NAVIGATION: &[NavigationDefinition] = &[
    NavigationDefinition {
        id: "dashboard",
        label: "Dashboard",
        path: "/dashboard",
        permission: Some(Permission::ViewDashboard),
        predicate: None,
        matching: MatchStrategy::Prefix,
    },
    NavigationDefinition {
        id: "licenses",
        label: "Licenses",
        path: "/licenses",
        permission: Some(Permission::ManageLicenses),
        predicate: None,
        matching: MatchStrategy::Exact,
    },
    NavigationDefinition {
        id: "products",
        label: "Products",
        path: "/products",
        permission: Some(Permission::ManageProducts),
        predicate: None,
        matching: MatchStrategy::Exact,
    },
    NavigationDefinition {
        id: "tenants",
        label: "Tenants",
        path: "/tenants",
        permission: None,
        predicate: Some(tenants_visible),
        matching: MatchStrategy::Exact,
    },
    NavigationDefinition {
        id: "users",
        label: "Users",
        path: "/users",
        permission: Some(Permission::ManageUsers),
        predicate: None,
        matching: MatchStrategy::Exact,
    },
    NavigationDefinition {
        id: "analytics",
        label: "Analytics",
        path: "/analytics",
        permission: Some(Permission::ViewAnalytics),
        predicate: None,
        matching: MatchStrategy::Exact,
    },
    NavigationDefinition {
        id: "system-health",
        label: "System Health",
        path: "/system-health",
        permission: None,
        predicate: Some(system_admin_only),
        matching: MatchStrategy::Exact,
    },
    NavigationDefinition {
        id: "audit",
        label: "Audit",
        path: "/audit",
        permission: None,
        predicate: Some(system_admin_only),
        matching: MatchStrategy::Exact,
    },
];

/// Filter [`NAVIGATION`] for the given context, preserving its order.
pub fn build_navigation(ctx: &NavigationContext<'_>) -> Vec<NavigationItem> {
    NAVIGATION
        .iter()
        .filter(|definition| definition.is_visible(ctx))
        .map(|definition| NavigationItem {
            id: definition.id,
            label: definition.label,
            path: definition.path,
            active: definition.matching.matches(definition.path, ctx.current_path),
        })
        .collect()
}

/// The first active entry, if any.
pub fn active_item(items: &[NavigationItem]) -> Option<&NavigationItem> {
    items.iter().find(|item| item.active)
}

#[cfg(test)]
mod tests {
    use licensehub_core::{UserId, VendorId};

    use super::*;
    use crate::{Role, derive_permissions};

    fn ids(items: &[NavigationItem]) -> Vec<&'static str> {
        items.iter().map(|item| item.id).collect()
    }

    fn navigation_for(user: Option<&User>, path: &str) -> Vec<NavigationItem> {
        let permissions = derive_permissions(user);
        build_navigation(&NavigationContext {
            permissions: &permissions,
            current_user: user,
            current_path: path,
        })
    }

    #[test]
    fn admin_sees_every_entry_in_fixed_order() {
        let admin = User::new(UserId::new(), Role::Admin);
        let items = navigation_for(Some(&admin), "/");

        assert_eq!(
            ids(&items),
            vec![
                "dashboard",
                "licenses",
                "products",
                "tenants",
                "users",
                "analytics",
                "system-health",
                "audit"
            ]
        );
    }

    #[test]
    fn vendor_scoped_user_sees_tenants_without_manage_tenants() {
        let manager = User::new(UserId::new(), Role::VendorManager).with_vendor(VendorId::new());
        let permissions = derive_permissions(Some(&manager));
        assert!(!permissions.get(Permission::ManageTenants));

        let items = navigation_for(Some(&manager), "/");
        assert_eq!(
            ids(&items),
            vec!["dashboard", "licenses", "products", "tenants", "users", "analytics"]
        );
    }

    #[test]
    fn tenants_hidden_without_permission_or_vendor() {
        let support = User::new(UserId::new(), Role::Support);
        let items = navigation_for(Some(&support), "/");

        assert_eq!(ids(&items), vec!["dashboard", "licenses", "analytics"]);
    }

    #[test]
    fn anonymous_navigation_is_empty() {
        assert!(navigation_for(None, "/dashboard").is_empty());
    }

    #[test]
    fn dashboard_matches_by_prefix() {
        let viewer = User::new(UserId::new(), Role::Viewer);
        let items = navigation_for(Some(&viewer), "/dashboard/anything");

        assert_eq!(active_item(&items).map(|item| item.id), Some("dashboard"));
    }

    #[test]
    fn other_entries_match_exactly() {
        let admin = User::new(UserId::new(), Role::Superuser);

        let exact = navigation_for(Some(&admin), "/licenses");
        assert_eq!(active_item(&exact).map(|item| item.id), Some("licenses"));

        let nested = navigation_for(Some(&admin), "/licenses/42");
        assert_eq!(active_item(&nested), None);
    }

    #[test]
    fn pending_reset_hides_every_entry() {
        let superuser = User::new(UserId::new(), Role::Superuser).requiring_password_reset();
        assert!(navigation_for(Some(&superuser), "/audit").is_empty());

        let manager = User::new(UserId::new(), Role::VendorManager)
            .with_vendor(VendorId::new())
            .requiring_password_reset();
        assert!(navigation_for(Some(&manager), "/tenants").is_empty());
    }

    #[test]
    fn tenants_entry_follows_manage_tenants_without_user() {
        let permissions = PermissionSet::from_granted([Permission::ManageTenants]);
        let items = build_navigation(&NavigationContext {
            permissions: &permissions,
            current_user: None,
            current_path: "/tenants",
        });

        assert_eq!(ids(&items), vec!["tenants"]);
        assert!(items[0].active);
    }
}
