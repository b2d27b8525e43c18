//! Session claims and their re-validation into an [`AuthSnapshot`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{AuthSnapshot, User};

/// Session claims as delivered by the authentication layer (transport-agnostic).
///
/// Signature verification / decoding happens before this crate sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// The authenticated operator.
    pub user: User,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session has expired")]
    Expired,

    #[error("session not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid session time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate session claims against `now`.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), SessionError> {
    if claims.expires_at <= claims.issued_at {
        return Err(SessionError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(SessionError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(SessionError::Expired);
    }
    Ok(())
}

impl AuthSnapshot {
    /// Snapshot for the current session, re-validated at `now`.
    ///
    /// Invalid or absent claims produce an anonymous snapshot.
    pub fn from_claims(claims: Option<&SessionClaims>, now: DateTime<Utc>) -> Self {
        let Some(claims) = claims else {
            return Self::anonymous();
        };

        match validate_claims(claims, now) {
            Ok(()) => Self::authenticated(claims.user.clone()),
            Err(error) => {
                debug!(user_id = %claims.user.id, %error, "session rejected");
                Self::anonymous()
            }
        }
    }
}
