//! `licensehub-auth`: advisory authorization core for the licensing console.
//!
//! Pure functions over an immutable user snapshot: no IO, no ambient state.
//! The remote API remains the real enforcement boundary.

pub mod ability;
pub mod capabilities;
pub mod context;
pub mod explain;
pub mod gate;
pub mod guards;
pub mod navigation;
pub mod permissions;
pub mod roles;
pub mod session;
pub mod user;

pub use ability::{AbilityMatrix, Action, Subject, build_ability};
pub use capabilities::*;
pub use context::{AuthSnapshot, Authorization, ContextError, require_authorization};
pub use explain::{
    DenialKind, PermissionExplanation, PolicyRegistry, RoleDefinition, explain_permission,
};
pub use gate::{Gate, GatePredicate};
pub use guards::{
    GuardConfig, GuardResult, Location, Redirect, RedirectSearch, RouteContext,
    assert_authenticated, assert_permission, assert_system_access, assert_tenant_access,
};
pub use navigation::{
    MatchStrategy, NAVIGATION, NavigationContext, NavigationDefinition, NavigationItem,
    NavigationPredicate, active_item, build_navigation,
};
pub use permissions::{Permission, PermissionSet, derive_permissions};
pub use roles::{MACHINE_ROLE_PREFIX, Role, is_machine_identity, is_system_admin, is_vendor_scoped};
pub use session::{SessionClaims, SessionError, validate_claims};
pub use user::{ResourceRef, User, VendorOwned};
