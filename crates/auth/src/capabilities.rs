//! Per-resource capability checks and vendor ownership.
//!
//! Every check is a pure predicate over a user snapshot: a missing user, a
//! missing permission, or a vendor mismatch all answer `false`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Permission, User, VendorOwned, derive_permissions, is_system_admin, is_vendor_scoped};

/// Resource types managed from the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    License,
    Product,
    Tenant,
    User,
    Entitlement,
    ProductTier,
}

impl ResourceKind {
    /// The `manage-*` permission that gates view and manage for this kind.
    ///
    /// Entitlements hang off licenses and tiers off products, so they share
    /// their parent's flag.
    pub fn permission(self) -> Permission {
        match self {
            Self::License | Self::Entitlement => Permission::ManageLicenses,
            Self::Product | Self::ProductTier => Permission::ManageProducts,
            Self::Tenant => Permission::ManageTenants,
            Self::User => Permission::ManageUsers,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::License => "license",
            Self::Product => "product",
            Self::Tenant => "tenant",
            Self::User => "user",
            Self::Entitlement => "entitlement",
            Self::ProductTier => "product-tier",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: &[ResourceKind] = &[
            ResourceKind::License,
            ResourceKind::Product,
            ResourceKind::Tenant,
            ResourceKind::User,
            ResourceKind::Entitlement,
            ResourceKind::ProductTier,
        ];

        ALL
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation attempted on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceAction {
    View,
    Create,
    Update,
    Delete,
}

// ─────────────────────────────────────────────────────────────────────────────
// Ownership
// ─────────────────────────────────────────────────────────────────────────────

/// Whether `user` owns `resource`.
///
/// System admins own everything. Anyone else owns a resource only when both
/// sides carry a vendor and the vendors are equal.
pub fn is_owned_by(user: Option<&User>, resource: Option<&dyn VendorOwned>) -> bool {
    let (Some(user), Some(resource)) = (user, resource) else {
        return false;
    };

    if is_system_admin(Some(user)) {
        return true;
    }

    match (user.vendor_id, resource.vendor_id()) {
        (Some(mine), Some(theirs)) => mine == theirs,
        _ => false,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decision
// ─────────────────────────────────────────────────────────────────────────────

/// Decide whether `user` may perform `action` on a resource of `kind`.
///
/// `resource` is the specific instance for per-row checks; `None` asks whether
/// the action is available at all on the screen.
pub fn is_permitted(
    user: Option<&User>,
    action: ResourceAction,
    kind: ResourceKind,
    resource: Option<&dyn VendorOwned>,
) -> bool {
    let Some(acting) = user else {
        return false;
    };

    if !derive_permissions(user).get(kind.permission()) {
        debug!(role = %acting.role, %kind, ?action, "denied: missing permission");
        return false;
    }

    let allowed = match action {
        ResourceAction::View | ResourceAction::Create => true,
        ResourceAction::Update => may_update(acting, kind, resource),
        ResourceAction::Delete => may_delete(acting, kind, resource),
    };

    debug!(role = %acting.role, %kind, ?action, allowed, "capability checked");
    allowed
}

fn may_update(user: &User, kind: ResourceKind, resource: Option<&dyn VendorOwned>) -> bool {
    if is_system_admin(Some(user)) {
        return true;
    }

    // Known inconsistency: entitlement updates skip the vendor comparison once
    // an entitlement is supplied. Kept as-is pending product clarification.
    if kind == ResourceKind::Entitlement && resource.is_some() {
        return true;
    }

    may_mutate_instance(user, resource)
}

fn may_delete(user: &User, kind: ResourceKind, resource: Option<&dyn VendorOwned>) -> bool {
    if is_system_admin(Some(user)) {
        return true;
    }

    // License deletion is reserved to system admins, owned or not.
    if kind == ResourceKind::License {
        return false;
    }

    may_mutate_instance(user, resource)
}

fn may_mutate_instance(user: &User, resource: Option<&dyn VendorOwned>) -> bool {
    match resource {
        None => true,
        Some(resource) if is_vendor_scoped(Some(user)) => is_owned_by(Some(user), Some(resource)),
        Some(_) => false,
    }
}

/// Tenant suspension: system admins only, no vendor exception.
pub fn can_suspend_tenant(user: Option<&User>) -> bool {
    is_system_admin(user) && derive_permissions(user).get(Permission::ManageTenants)
}

// ─────────────────────────────────────────────────────────────────────────────
// Named checks
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! resource_checks {
    ($kind:expr, $noun:literal, $view:ident, $create:ident, $update:ident, $delete:ident, $owned:ident) => {
        #[doc = concat!("Whether `user` may view ", $noun, " records.")]
        pub fn $view(user: Option<&User>) -> bool {
            is_permitted(user, ResourceAction::View, $kind, None)
        }

        #[doc = concat!("Whether `user` may create ", $noun, " records.")]
        pub fn $create(user: Option<&User>) -> bool {
            is_permitted(user, ResourceAction::Create, $kind, None)
        }

        #[doc = concat!("Whether `user` may update a ", $noun, " (or any, when `resource` is `None`).")]
        pub fn $update(user: Option<&User>, resource: Option<&dyn VendorOwned>) -> bool {
            is_permitted(user, ResourceAction::Update, $kind, resource)
        }

        #[doc = concat!("Whether `user` may delete a ", $noun, " (or any, when `resource` is `None`).")]
        pub fn $delete(user: Option<&User>, resource: Option<&dyn VendorOwned>) -> bool {
            is_permitted(user, ResourceAction::Delete, $kind, resource)
        }

        #[doc = concat!("Whether `user` owns the given ", $noun, ".")]
        pub fn $owned(user: Option<&User>, resource: Option<&dyn VendorOwned>) -> bool {
            is_owned_by(user, resource)
        }
    };
}

resource_checks!(
    ResourceKind::License,
    "license",
    can_view_license,
    can_create_license,
    can_update_license,
    can_delete_license,
    is_license_owned_by_user
);
resource_checks!(
    ResourceKind::Product,
    "product",
    can_view_product,
    can_create_product,
    can_update_product,
    can_delete_product,
    is_product_owned_by_user
);
resource_checks!(
    ResourceKind::Tenant,
    "tenant",
    can_view_tenant,
    can_create_tenant,
    can_update_tenant,
    can_delete_tenant,
    is_tenant_owned_by_user
);
resource_checks!(
    ResourceKind::User,
    "user",
    can_view_user,
    can_create_user,
    can_update_user,
    can_delete_user,
    is_user_owned_by_user
);
resource_checks!(
    ResourceKind::Entitlement,
    "entitlement",
    can_view_entitlement,
    can_create_entitlement,
    can_update_entitlement,
    can_delete_entitlement,
    is_entitlement_owned_by_user
);
resource_checks!(
    ResourceKind::ProductTier,
    "product tier",
    can_view_product_tier,
    can_create_product_tier,
    can_update_product_tier,
    can_delete_product_tier,
    is_product_tier_owned_by_user
);

#[cfg(test)]
mod tests {
    use licensehub_core::{UserId, VendorId};

    use super::*;
    use crate::{ResourceRef, Role};

    fn user(role: Role) -> User {
        User::new(UserId::new(), role)
    }

    fn vendor_user(role: Role, vendor: VendorId) -> User {
        user(role).with_vendor(vendor)
    }

    #[test]
    fn admin_owns_every_resource_kind() {
        let admin = user(Role::Admin);
        let foreign = ResourceRef::owned_by(VendorId::new());
        let shared = ResourceRef::unowned();

        for owned in [
            is_license_owned_by_user,
            is_product_owned_by_user,
            is_tenant_owned_by_user,
            is_user_owned_by_user,
            is_entitlement_owned_by_user,
            is_product_tier_owned_by_user,
        ] {
            assert!(owned(Some(&admin), Some(&foreign)));
            assert!(owned(Some(&admin), Some(&shared)));
        }
    }

    #[test]
    fn vendor_ownership_requires_matching_vendor_on_both_sides() {
        let vendor = VendorId::new();
        let manager = vendor_user(Role::VendorManager, vendor);

        assert!(is_product_owned_by_user(Some(&manager), Some(&ResourceRef::owned_by(vendor))));
        assert!(!is_product_owned_by_user(
            Some(&manager),
            Some(&ResourceRef::owned_by(VendorId::new()))
        ));
        assert!(!is_product_owned_by_user(Some(&manager), Some(&ResourceRef::unowned())));
    }

    #[test]
    fn ownership_is_false_without_both_sides() {
        let vendor = VendorId::new();
        let resource = ResourceRef::owned_by(vendor);
        let unaffiliated = user(Role::Support);

        assert!(!is_owned_by(None, Some(&resource)));
        assert!(!is_owned_by(Some(&vendor_user(Role::VendorAdmin, vendor)), None));
        assert!(!is_owned_by(Some(&unaffiliated), Some(&resource)));
    }

    #[test]
    fn user_snapshots_can_be_ownership_targets() {
        let vendor = VendorId::new();
        let manager = vendor_user(Role::VendorManager, vendor);
        let colleague = vendor_user(Role::Viewer, vendor);

        assert!(can_update_user(Some(&manager), Some(&colleague)));
        assert!(!can_update_user(Some(&manager), Some(&user(Role::Viewer))));
    }

    #[test]
    fn view_and_create_follow_manage_flag() {
        let vendor_admin = vendor_user(Role::VendorAdmin, VendorId::new());

        assert!(can_view_license(Some(&vendor_admin)));
        assert!(can_create_product(Some(&vendor_admin)));
        assert!(can_view_product_tier(Some(&vendor_admin)));
        assert!(!can_view_tenant(Some(&vendor_admin)));
        assert!(!can_create_user(Some(&vendor_admin)));
    }

    #[test]
    fn anonymous_is_denied_everything() {
        let resource = ResourceRef::owned_by(VendorId::new());
        for kind in ResourceKind::all() {
            for action in [
                ResourceAction::View,
                ResourceAction::Create,
                ResourceAction::Update,
                ResourceAction::Delete,
            ] {
                assert!(!is_permitted(None, action, *kind, Some(&resource)));
                assert!(!is_permitted(None, action, *kind, None));
            }
        }
        assert!(!can_suspend_tenant(None));
    }

    #[test]
    fn update_by_vendor_user_requires_ownership() {
        let vendor = VendorId::new();
        let manager = vendor_user(Role::VendorManager, vendor);

        assert!(can_update_license(Some(&manager), Some(&ResourceRef::owned_by(vendor))));
        assert!(!can_update_license(
            Some(&manager),
            Some(&ResourceRef::owned_by(VendorId::new()))
        ));
        // Blanket check degrades to the permission flag.
        assert!(can_update_license(Some(&manager), None));
    }

    #[test]
    fn update_without_vendor_scope_is_denied_per_instance() {
        let support = user(Role::Support);
        let license = ResourceRef::owned_by(VendorId::new());

        assert!(can_update_license(Some(&support), None));
        assert!(!can_update_license(Some(&support), Some(&license)));
    }

    #[test]
    fn license_delete_is_reserved_to_system_admins() {
        let vendor = VendorId::new();
        let owned = ResourceRef::owned_by(vendor);

        assert!(can_delete_license(Some(&user(Role::Superuser)), Some(&owned)));
        assert!(can_delete_license(Some(&user(Role::Admin)), None));

        for role in [Role::VendorManager, Role::VendorAdmin] {
            let scoped = vendor_user(role, vendor);
            assert!(is_license_owned_by_user(Some(&scoped), Some(&owned)));
            assert!(!can_delete_license(Some(&scoped), Some(&owned)));
            assert!(!can_delete_license(Some(&scoped), None));
        }
        assert!(!can_delete_license(Some(&user(Role::Support)), None));
    }

    #[test]
    fn product_delete_allows_owner() {
        let vendor = VendorId::new();
        let vendor_admin = vendor_user(Role::VendorAdmin, vendor);

        assert!(can_delete_product(Some(&vendor_admin), Some(&ResourceRef::owned_by(vendor))));
        assert!(!can_delete_product(
            Some(&vendor_admin),
            Some(&ResourceRef::owned_by(VendorId::new()))
        ));
    }

    #[test]
    fn entitlement_update_ignores_vendor_mismatch() {
        let manager = vendor_user(Role::VendorManager, VendorId::new());
        let foreign = ResourceRef::owned_by(VendorId::new());

        assert!(can_update_entitlement(Some(&manager), Some(&foreign)));
        assert!(!can_delete_entitlement(Some(&manager), Some(&foreign)));
        assert!(!can_update_entitlement(Some(&user(Role::Viewer)), Some(&foreign)));
    }

    #[test]
    fn tenant_suspension_is_admin_only() {
        let vendor = VendorId::new();

        assert!(can_suspend_tenant(Some(&user(Role::Superuser))));
        assert!(can_suspend_tenant(Some(&user(Role::Admin))));
        assert!(!can_suspend_tenant(Some(&vendor_user(Role::VendorManager, vendor))));
        assert!(!can_suspend_tenant(Some(&user(Role::Support))));
    }

    #[test]
    fn pending_reset_blocks_admin_capabilities() {
        let admin = user(Role::Admin).requiring_password_reset();

        assert!(!can_view_license(Some(&admin)));
        assert!(!can_delete_license(Some(&admin), None));
        assert!(!can_suspend_tenant(Some(&admin)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a vendor user owns a resource iff the vendors match.
            #[test]
            fn vendor_ownership_is_equality(a in any::<u128>(), b in any::<u128>()) {
                let mine = VendorId::from_uuid(uuid::Uuid::from_u128(a));
                let theirs = VendorId::from_uuid(uuid::Uuid::from_u128(b));
                let scoped = vendor_user(Role::VendorAdmin, mine);

                prop_assert_eq!(
                    is_owned_by(Some(&scoped), Some(&ResourceRef::owned_by(theirs))),
                    a == b
                );
            }
        }
    }
}
