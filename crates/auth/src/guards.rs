//! Route guards invoked by the router before entering a protected route.
//!
//! Guards return `Err(Redirect)` to abort navigation. The redirect is a
//! control-flow signal for the router, not a failure, and composes with `?`.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Authorization, Permission, is_system_admin, is_vendor_scoped};

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_ROOT_PATH: &str = "/";

/// Router-side paths used when building redirects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Where unauthenticated navigation is sent.
    pub login_path: String,
    /// Application root; target of hard denials and the return-to fallback.
    pub root_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            root_path: DEFAULT_ROOT_PATH.to_string(),
        }
    }
}

impl GuardConfig {
    /// Read `LICENSEHUB_LOGIN_PATH` / `LICENSEHUB_ROOT_PATH`, falling back to
    /// the defaults for unset or blank values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            login_path: env_path("LICENSEHUB_LOGIN_PATH").unwrap_or(defaults.login_path),
            root_path: env_path("LICENSEHUB_ROOT_PATH").unwrap_or(defaults.root_path),
        }
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_root_path(mut self, path: impl Into<String>) -> Self {
        self.root_path = path.into();
        self
    }
}

fn env_path(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        warn!(key, "blank route path in environment; using default");
        return None;
    }
    Some(trimmed.to_string())
}

/// Navigation target handed to a guard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub href: String,
}

impl Location {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Search parameters carried by a login redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectSearch {
    /// Where to return after logging in.
    pub redirect: String,
}

/// Abort-and-redirect signal raised by a guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<RedirectSearch>,
}

pub type GuardResult = Result<(), Redirect>;

/// Router context: the authorization snapshot plus redirect paths.
#[derive(Debug, Clone, Default)]
pub struct RouteContext {
    pub authorization: Authorization,
    pub config: GuardConfig,
}

impl RouteContext {
    pub fn new(authorization: Authorization) -> Self {
        Self {
            authorization,
            config: GuardConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    fn to_login(&self, location: &Location) -> Redirect {
        let redirect = if location.href.is_empty() {
            self.config.root_path.clone()
        } else {
            location.href.clone()
        };

        Redirect {
            to: self.config.login_path.clone(),
            search: Some(RedirectSearch { redirect }),
        }
    }

    fn to_root(&self) -> Redirect {
        Redirect {
            to: self.config.root_path.clone(),
            search: None,
        }
    }
}

/// Send unauthenticated navigation to the login route with a return-to.
pub fn assert_authenticated(context: &RouteContext, location: &Location) -> GuardResult {
    if context.authorization.is_authenticated() {
        return Ok(());
    }

    let redirect = context.to_login(location);
    debug!(href = %location.href, to = %redirect.to, "not authenticated; redirecting to login");
    Err(redirect)
}

/// Require authentication, then `permission`; a missing permission is a hard
/// denial to the root.
pub fn assert_permission(
    context: &RouteContext,
    location: &Location,
    permission: Permission,
) -> GuardResult {
    assert_authenticated(context, location)?;
    deny_unless(context, location, context.authorization.has(permission), permission.as_str())
}

/// Tenant screens: `manage-tenants` or a vendor-scoped operator. Denied while
/// a password reset is pending.
pub fn assert_tenant_access(context: &RouteContext, location: &Location) -> GuardResult {
    assert_authenticated(context, location)?;
    let authorization = &context.authorization;
    let allowed = !authorization.permissions().is_reset_pending()
        && (authorization.has(Permission::ManageTenants) || is_vendor_scoped(authorization.user()));
    deny_unless(context, location, allowed, "tenant-access")
}

/// System screens (health, audit): system admins only, and never while a
/// password reset is pending.
pub fn assert_system_access(context: &RouteContext, location: &Location) -> GuardResult {
    assert_authenticated(context, location)?;
    let authorization = &context.authorization;
    let allowed =
        !authorization.permissions().is_reset_pending() && is_system_admin(authorization.user());
    deny_unless(context, location, allowed, "system-access")
}

fn deny_unless(
    context: &RouteContext,
    location: &Location,
    allowed: bool,
    rule: &str,
) -> GuardResult {
    if allowed {
        return Ok(());
    }

    debug!(href = %location.href, rule, "navigation denied; redirecting to root");
    Err(context.to_root())
}
