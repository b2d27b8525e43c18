//! Read-only operator snapshot and vendor ownership.
//!
//! The authentication layer owns the lifecycle of these values; this crate
//! only reads them.

use serde::{Deserialize, Serialize};

use licensehub_core::{UserId, VendorId};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of the acting operator.
///
/// # Invariants
/// - System-level roles carry no vendor; vendor-scoped roles carry one.
/// - With `password_reset_required` set, the only permission ever derived is
///   change-password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub role: Role,
    #[serde(default)]
    pub vendor_id: Option<VendorId>,
    #[serde(default)]
    pub password_reset_required: bool,
}

impl User {
    pub fn new(id: UserId, role: Role) -> Self {
        Self {
            id,
            role,
            vendor_id: None,
            password_reset_required: false,
        }
    }

    pub fn with_vendor(mut self, vendor_id: VendorId) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    pub fn requiring_password_reset(mut self) -> Self {
        self.password_reset_required = true;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ownership context
// ─────────────────────────────────────────────────────────────────────────────

/// Any entity that may belong to a vendor (license, product, tenant, user,
/// entitlement, product tier).
pub trait VendorOwned {
    /// The owning vendor, or `None` for shared/system-level entities.
    fn vendor_id(&self) -> Option<VendorId>;
}

impl VendorOwned for User {
    fn vendor_id(&self) -> Option<VendorId> {
        self.vendor_id
    }
}

/// Minimal resource snapshot carrying only the ownership field.
///
/// Screens that already hold a richer record can implement [`VendorOwned`] on
/// it instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    #[serde(default)]
    pub vendor_id: Option<VendorId>,
}

impl ResourceRef {
    pub fn owned_by(vendor_id: VendorId) -> Self {
        Self {
            vendor_id: Some(vendor_id),
        }
    }

    pub fn unowned() -> Self {
        Self { vendor_id: None }
    }
}

impl VendorOwned for ResourceRef {
    fn vendor_id(&self) -> Option<VendorId> {
        self.vendor_id
    }
}
