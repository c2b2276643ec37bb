//! Auth data models.

use jiff::{SignedDuration, Timestamp};

use crate::{auth::SessionTokenVersion, domain::users::records::UserUuid, uuids::TypedUuid};

/// Session UUID
pub type SessionUuid = TypedUuid<SessionMetadata>;

/// Default lifetime of a login session: seven days.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(168);

/// Settings for issuing sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthSettings {
    /// How long a session stays valid after login.
    pub session_ttl: SignedDuration,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

/// Session data used during bearer authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    /// User that owns this session.
    pub user_uuid: UserUuid,

    /// Token format/hash version.
    pub version: SessionTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,
}

/// Session metadata persisted in storage.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionMetadata {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: SessionUuid,
    pub user_uuid: UserUuid,
    pub version: SessionTokenVersion,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub metadata: SessionMetadata,
}
