//! Session token formatting, parsing, and verifier construction.
//!
//! Tokens look like `tr_v1_<session uuid>.<64 hex chars>`. The part before the dot
//! locates the session row; the secret after it is never stored, only the SHA-256
//! of the verifier input built from it.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserUuid;

/// Session token identifier prefix.
pub const SESSION_TOKEN_PREFIX: &str = "tr";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

const SESSION_TOKEN_SECRET_HEX_CHARS: usize = SESSION_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for SessionTokenVersion {
    type Error = SessionTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

/// Raw secret half of a session token. Zeroed on drop and never printed.
#[derive(Clone)]
pub struct SessionTokenSecret {
    bytes: [u8; SESSION_TOKEN_SECRET_BYTES],
}

impl SessionTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for SessionTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionTokenSecret(**redacted**)")
    }
}

impl Drop for SessionTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSessionToken {
    pub session_uuid: Uuid,
    pub version: SessionTokenVersion,
    pub secret: SessionTokenSecret,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_session_secret() -> SessionTokenSecret {
    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    SessionTokenSecret::from_bytes(secret)
}

#[must_use]
pub fn format_session_token(
    session_uuid: Uuid,
    version: SessionTokenVersion,
    secret: &SessionTokenSecret,
) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        session_uuid.simple(),
        encode_hex(secret.as_bytes())
    )
}

/// Split a bearer token into its session UUID, version and secret.
///
/// # Errors
///
/// Returns a [`SessionTokenError`] when any segment is malformed.
pub fn parse_session_token(token: &str) -> Result<ParsedSessionToken, SessionTokenError> {
    let (prefix_and_id, secret_hex) = token
        .split_once('.')
        .ok_or(SessionTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let uuid_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    let version = SessionTokenVersion::from_str(version_segment)?;

    let session_uuid =
        Uuid::try_parse(uuid_segment).map_err(|_| SessionTokenError::InvalidFormat)?;

    let secret = decode_secret_hex(secret_hex).ok_or(SessionTokenError::InvalidSecretEncoding)?;

    Ok(ParsedSessionToken {
        session_uuid,
        version,
        secret: SessionTokenSecret::from_bytes(secret),
    })
}

/// Hex SHA-256 of the canonical verifier input for a token.
///
/// Input format: `{session_uuid_hex}:{version_i16_decimal}:{user_uuid_hex}:{secret_hex}`.
/// Binding the user UUID means a row moved to another user no longer verifies.
#[must_use]
pub fn session_verifier(
    session_uuid: &Uuid,
    version: SessionTokenVersion,
    user_uuid: &UserUuid,
    secret: &SessionTokenSecret,
) -> String {
    let mut input = format!(
        "{}:{}:{}:{}",
        session_uuid.simple(),
        version.as_i16(),
        user_uuid.into_uuid().simple(),
        encode_hex(secret.as_bytes()),
    );

    let digest = Sha256::digest(input.as_bytes());

    input.zeroize();

    encode_hex(&digest)
}

/// Compare a stored verifier with one computed from a presented token.
///
/// Runs in time independent of where the two first differ.
#[must_use]
pub fn verifier_matches(stored: &str, computed: &str) -> bool {
    bool::from(stored.as_bytes().ct_eq(computed.as_bytes()))
}

fn encode_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; SESSION_TOKEN_SECRET_BYTES]> {
    if secret_hex.len() != SESSION_TOKEN_SECRET_HEX_CHARS || !secret_hex.is_ascii() {
        return None;
    }

    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let pair = std::str::from_utf8(pair).ok()?;

        *byte = u8::from_str_radix(pair, 16).ok()?;
    }

    Some(secret)
}
