//! User Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User role
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown user role: {0}")]
pub struct UnknownUserRole(pub String);

impl FromStr for UserRole {
    type Err = UnknownUserRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(UnknownUserRole(value.to_string())),
        }
    }
}

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user together with their stored password hash.
#[derive(Clone)]
pub(crate) struct UserCredentials {
    pub user: UserRecord,
    pub password_hash: String,
}
