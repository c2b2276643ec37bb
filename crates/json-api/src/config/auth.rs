//! Auth Config

use clap::Args;
use jiff::SignedDuration;
use trolley_app::auth::{AuthSettings, DEFAULT_SESSION_TTL};

/// Session settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Hours a login session stays valid
    #[arg(
        long,
        env = "SESSION_TTL_HOURS",
        default_value_t = DEFAULT_SESSION_TTL.as_hours()
    )]
    pub session_ttl_hours: i64,
}

impl AuthConfig {
    /// Session settings handed to the auth service.
    #[must_use]
    pub fn settings(&self) -> AuthSettings {
        AuthSettings {
            session_ttl: SignedDuration::from_hours(self.session_ttl_hours),
        }
    }
}
