//! Conditional rendering gate for declarative "show only if allowed" wrappers.

use std::sync::Arc;

use crate::{Action, Authorization, Permission, Subject, User};

/// Predicate form: `(user, context) -> allowed`.
pub type GatePredicate = Arc<dyn Fn(Option<&User>, &Authorization) -> bool + Send + Sync>;

/// A visibility rule, independent of any UI toolkit.
#[derive(Clone)]
pub enum Gate {
    /// Allowed when the named permission is granted.
    Permission(Permission),
    /// Allowed when the ability matrix holds the pair.
    Ability(Action, Subject),
    /// Allowed when the predicate returns true.
    Predicate(GatePredicate),
}

impl Gate {
    pub fn predicate<F>(check: F) -> Self
    where
        F: Fn(Option<&User>, &Authorization) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(check))
    }

    pub fn allows(&self, authorization: &Authorization) -> bool {
        match self {
            Self::Permission(permission) => authorization.has(*permission),
            Self::Ability(action, subject) => authorization.ability().can(*action, *subject),
            Self::Predicate(check) => check(authorization.user(), authorization),
        }
    }

    /// Run `render` only when allowed.
    pub fn render<T>(
        &self,
        authorization: &Authorization,
        render: impl FnOnce() -> T,
    ) -> Option<T> {
        self.allows(authorization).then(render)
    }

    /// Run `render` when allowed, `fallback` otherwise.
    pub fn render_or<T>(
        &self,
        authorization: &Authorization,
        render: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.allows(authorization) {
            render()
        } else {
            fallback()
        }
    }
}

impl core::fmt::Debug for Gate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Permission(permission) => f.debug_tuple("Permission").field(permission).finish(),
            Self::Ability(action, subject) => {
                f.debug_tuple("Ability").field(action).field(subject).finish()
            }
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
