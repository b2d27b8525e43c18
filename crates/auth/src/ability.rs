//! Ability matrix: (action, subject) pairs compiled from a permission set.

use core::str::FromStr;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use licensehub_core::{DomainError, DomainResult};

use crate::{Permission, PermissionSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    View,
    Manage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subject {
    Dashboard,
    License,
    Entitlement,
    Product,
    ProductTier,
    Tenant,
    User,
    Analytics,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Manage => "manage",
        }
    }
}

impl Subject {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::License => "license",
            Self::Entitlement => "entitlement",
            Self::Product => "product",
            Self::ProductTier => "product-tier",
            Self::Tenant => "tenant",
            Self::User => "user",
            Self::Analytics => "analytics",
        }
    }

    fn all() -> &'static [Self] {
        const ALL: &[Subject] = &[
            Subject::Dashboard,
            Subject::License,
            Subject::Entitlement,
            Subject::Product,
            Subject::ProductTier,
            Subject::Tenant,
            Subject::User,
            Subject::Analytics,
        ];

        ALL
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        match value {
            "view" => Ok(Self::View),
            "manage" => Ok(Self::Manage),
            _ => Err(DomainError::validation(format!("unknown action '{value}'"))),
        }
    }
}

impl FromStr for Subject {
    type Err = DomainError;

    fn from_str(value: &str) -> DomainResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| DomainError::validation(format!("unknown subject '{value}'")))
    }
}

/// Capability pairs contributed by each permission.
///
/// `change-password` contributes nothing; it is read directly from the
/// permission set.
fn grants(permission: Permission) -> &'static [(Action, Subject)] {
    use Action::{Manage, View};

    match permission {
        Permission::ViewDashboard => &[(View, Subject::Dashboard)],
        Permission::ManageLicenses => &[
            (View, Subject::License),
            (Manage, Subject::License),
            (View, Subject::Entitlement),
            (Manage, Subject::Entitlement),
        ],
        Permission::ManageProducts => &[
            (View, Subject::Product),
            (Manage, Subject::Product),
            (View, Subject::ProductTier),
            (Manage, Subject::ProductTier),
        ],
        Permission::ManageTenants => &[(View, Subject::Tenant), (Manage, Subject::Tenant)],
        Permission::ManageUsers => &[(View, Subject::User), (Manage, Subject::User)],
        Permission::ViewAnalytics => &[(View, Subject::Analytics)],
        Permission::ChangePassword => &[],
    }
}

/// Read-only set of allowed (action, subject) pairs.
///
/// Rebuilt whole whenever the permission set changes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AbilityMatrix {
    rules: BTreeSet<(Action, Subject)>,
}

impl AbilityMatrix {
    /// True iff the pair was granted at build time.
    pub fn can(&self, action: Action, subject: Subject) -> bool {
        self.rules.contains(&(action, subject))
    }

    pub fn cannot(&self, action: Action, subject: Subject) -> bool {
        !self.can(action, subject)
    }

    /// String-keyed query for generic gating components. Unknown names are
    /// denied.
    pub fn can_named(&self, action: &str, subject: &str) -> bool {
        match (action.parse::<Action>(), subject.parse::<Subject>()) {
            (Ok(action), Ok(subject)) => self.can(action, subject),
            _ => false,
        }
    }

    /// Granted pairs in a stable order.
    pub fn rules(&self) -> impl Iterator<Item = (Action, Subject)> + '_ {
        self.rules.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Compile a permission set into its ability matrix.
pub fn build_ability(permissions: &PermissionSet) -> AbilityMatrix {
    let rules = permissions
        .granted()
        .flat_map(|permission| grants(permission).iter().copied())
        .collect();

    AbilityMatrix { rules }
}
