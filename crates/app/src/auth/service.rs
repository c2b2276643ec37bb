//! Auth service.

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::{debug, info};

use crate::{
    auth::{
        AuthServiceError, AuthSettings, IssuedSession, NewSession, ParsedSessionToken,
        SessionTokenVersion, SessionUuid, format_session_token, generate_session_secret,
        parse_session_token, repository::PgSessionsRepository, session_verifier, verifier_matches,
    },
    database::Db,
    domain::users::{PgUsersService, UsersService, records::UserUuid},
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgSessionsRepository,
    users: PgUsersService,
    session_ttl: SignedDuration,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, settings: AuthSettings) -> Self {
        Self {
            users: PgUsersService::new(db.clone()),
            repository: PgSessionsRepository::new(),
            session_ttl: settings.session_ttl,
            db,
        }
    }

    /// Parse a bearer token and check it against its active session row.
    async fn verify_token(
        &self,
        bearer_token: &str,
    ) -> Result<(ParsedSessionToken, UserUuid), AuthServiceError> {
        let parsed = parse_session_token(bearer_token).map_err(|error| {
            debug!(%error, "rejected malformed session token");

            AuthServiceError::NotFound
        })?;

        let session = SessionUuid::from_uuid(parsed.session_uuid);

        let mut tx = self.db.begin().await?;

        let active = self
            .repository
            .find_active_session(&mut tx, session, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        if active.version != parsed.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier = session_verifier(
            &parsed.session_uuid,
            parsed.version,
            &active.user_uuid,
            &parsed.secret,
        );

        if !verifier_matches(&active.token_hash, &verifier) {
            return Err(AuthServiceError::NotFound);
        }

        Ok((parsed, active.user_uuid))
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedSession, AuthServiceError> {
        let user = self.users.verify_credentials(username, password).await?;

        let session_uuid = SessionUuid::new();
        let version = SessionTokenVersion::V1;
        let secret = generate_session_secret();
        let token = format_session_token(session_uuid.into_uuid(), version, &secret);

        let token_hash = session_verifier(&session_uuid.into_uuid(), version, &user.uuid, &secret);

        let expires_at = Timestamp::now()
            .checked_add(self.session_ttl)
            .map_err(AuthServiceError::InvalidExpiry)?;

        let mut tx = self.db.begin().await?;

        let metadata = self
            .repository
            .create_session(
                &mut tx,
                &NewSession {
                    uuid: session_uuid,
                    user_uuid: user.uuid,
                    version,
                    token_hash,
                    expires_at,
                },
            )
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, session = %metadata.uuid, "user logged in");

        Ok(IssuedSession { token, metadata })
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let (parsed, user) = self.verify_token(bearer_token).await?;
        let session = SessionUuid::from_uuid(parsed.session_uuid);

        // Best-effort metadata update; auth success should not depend on this write.
        let touched: Result<(), sqlx::Error> = async {
            let mut tx = self.db.begin().await?;

            self.repository.touch_session(&mut tx, session).await?;

            tx.commit().await
        }
        .await;

        if let Err(error) = touched {
            debug!(%error, %session, "failed to record session use");
        }

        Ok(user)
    }

    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError> {
        let (parsed, user) = self.verify_token(bearer_token).await?;
        let session = SessionUuid::from_uuid(parsed.session_uuid);

        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.revoke_session(&mut tx, session).await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%user, %session, "user logged out");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and open a new session, returning its one-time token.
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to the user it was issued to.
    ///
    /// Every failure, including malformed, expired, revoked and tampered tokens, is
    /// reported as [`AuthServiceError::NotFound`].
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;

    /// Revoke the session behind a bearer token.
    async fn logout(&self, bearer_token: &str) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::{data::Registration, records::UserRecord},
        test::TestContext,
    };

    use super::*;

    async fn register(ctx: &TestContext, username: &str) -> TestResult<UserRecord> {
        Ok(ctx
            .users
            .register(Registration {
                uuid: UserUuid::new(),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: "correct horse".to_string(),
                confirm_password: "correct horse".to_string(),
            })
            .await?)
    }

    #[tokio::test]
    async fn login_issues_token_that_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register(&ctx, "alice").await?;

        let issued = ctx.auth.login("alice", "correct horse").await?;

        assert!(issued.token.starts_with("tr_v1_"), "unexpected token format");
        assert_eq!(issued.metadata.user_uuid, user.uuid);
        assert!(issued.metadata.expires_at > issued.metadata.created_at);

        let authenticated = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(authenticated, user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        register(&ctx, "alice").await?;

        let result = ctx.auth.login("alice", "wrong horse").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        register(&ctx, "alice").await?;

        let issued = ctx.auth.login("alice", "correct horse").await?;
        let (id, _secret) = issued
            .token
            .split_once('.')
            .ok_or("token should contain a dot")?;
        let forged = format!("{id}.{}", "0".repeat(64));

        let result = ctx.auth.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn logout_revokes_session() -> TestResult {
        let ctx = TestContext::new().await;
        register(&ctx, "alice").await?;

        let issued = ctx.auth.login("alice", "correct horse").await?;

        ctx.auth.logout(&issued.token).await?;

        let after = ctx.auth.authenticate_bearer(&issued.token).await;
        let again = ctx.auth.logout(&issued.token).await;

        assert!(
            matches!(after, Err(AuthServiceError::NotFound)),
            "expected NotFound after logout, got {after:?}"
        );
        assert!(
            matches!(again, Err(AuthServiceError::NotFound)),
            "expected NotFound on second logout, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_session_does_not_authenticate() -> TestResult {
        let ctx = TestContext::new().await;
        register(&ctx, "alice").await?;

        let expired = PgAuthService::new(
            ctx.app_db(),
            AuthSettings {
                session_ttl: SignedDuration::from_secs(-60),
            },
        );

        let issued = expired.login("alice", "correct horse").await?;
        let result = expired.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn garbage_token_is_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("definitely-not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
