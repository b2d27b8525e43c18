//! Role enumeration and role classification.
//!
//! This module and the permission deriver are the only places that match on
//! [`Role`]. Everything else asks the classifier functions below.

use serde::{Deserialize, Serialize};

use crate::User;

/// Wire prefix shared by every machine/API identity role.
pub const MACHINE_ROLE_PREFIX: &str = "API_";

/// Account classification driving permission derivation.
///
/// Parsing is total: values outside the closed set are kept verbatim in
/// [`Role::Machine`] (when they carry [`MACHINE_ROLE_PREFIX`]) or
/// [`Role::Unrecognized`], so a snapshot never fails to load because of a role
/// this build does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Superuser,
    Admin,
    Support,
    VendorManager,
    VendorAdmin,
    Viewer,
    /// Machine/API identity; holds the full wire value (e.g. `API_SYNC`).
    Machine(String),
    /// Anything else. Treated as "none of the above" by every check.
    Unrecognized(String),
}

impl Role {
    /// Parse a wire value.
    pub fn parse(value: &str) -> Self {
        match value {
            "SUPERUSER" => Self::Superuser,
            "ADMIN" => Self::Admin,
            "SUPPORT" => Self::Support,
            "VENDOR_MANAGER" => Self::VendorManager,
            "VENDOR_ADMIN" => Self::VendorAdmin,
            "VIEWER" => Self::Viewer,
            other if other.starts_with(MACHINE_ROLE_PREFIX) => Self::Machine(other.to_string()),
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Superuser => "SUPERUSER",
            Self::Admin => "ADMIN",
            Self::Support => "SUPPORT",
            Self::VendorManager => "VENDOR_MANAGER",
            Self::VendorAdmin => "VENDOR_ADMIN",
            Self::Viewer => "VIEWER",
            Self::Machine(raw) | Self::Unrecognized(raw) => raw,
        }
    }

    /// The human staff roles, in privilege order.
    pub fn staff_roles() -> [Role; 6] {
        [
            Self::Superuser,
            Self::Admin,
            Self::Support,
            Self::VendorManager,
            Self::VendorAdmin,
            Self::Viewer,
        ]
    }

    /// Whether this role is one of the two system administrator roles.
    pub fn is_system_admin(&self) -> bool {
        matches!(self, Self::Superuser | Self::Admin)
    }

    pub fn is_machine(&self) -> bool {
        matches!(self, Self::Machine(_))
    }

    /// Short description for audit listings.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Superuser => "System superuser with unrestricted access",
            Self::Admin => "System administrator",
            Self::Support => "Support staff handling licenses across vendors",
            Self::VendorManager => "Vendor manager: licenses, products and users of one vendor",
            Self::VendorAdmin => "Vendor administrator: licenses and products of one vendor",
            Self::Viewer => "Read-only dashboard access",
            Self::Machine(_) => "Machine/API identity",
            Self::Unrecognized(_) => "Unrecognized role (dashboard only)",
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True iff the user holds a system superuser or system admin role.
pub fn is_system_admin(user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role.is_system_admin())
}

/// True iff the user carries a vendor affiliation.
pub fn is_vendor_scoped(user: Option<&User>) -> bool {
    user.is_some_and(|u| u.vendor_id.is_some())
}

/// True iff the user's role is a machine/API role.
pub fn is_machine_identity(user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role.is_machine())
}
