//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::users::{
        data::{NewUser, Registration},
        errors::UsersServiceError,
        password::{hash_password, verify_password},
        records::{UserRecord, UserRole, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn register(&self, registration: Registration) -> Result<UserRecord, UsersServiceError> {
        registration.validate()?;

        let username = registration.username.trim();
        let email = registration.email.trim();

        let mut tx = self.db.begin().await?;

        if self.repository.username_exists(&mut tx, username).await? {
            return Err(UsersServiceError::UsernameTaken);
        }

        if self.repository.email_exists(&mut tx, email).await? {
            return Err(UsersServiceError::EmailTaken);
        }

        let new_user = NewUser {
            uuid: registration.uuid,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(&registration.password)?,
            role: UserRole::User,
        };

        let user = self.repository.create_user(&mut tx, &new_user).await?;

        tx.commit().await?;

        info!(user = %user.uuid, username = %user.username, "registered user");

        Ok(user)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_credentials_by_username(&mut tx, username.trim())
            .await?;

        tx.commit().await?;

        Ok(credentials.map(|credentials| credentials.user))
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let credentials = self
            .repository
            .find_credentials_by_username(&mut tx, username.trim())
            .await?;

        tx.commit().await?;

        let Some(credentials) = credentials else {
            return Err(UsersServiceError::InvalidCredentials);
        };

        if !verify_password(password, &credentials.password_hash)? {
            return Err(UsersServiceError::InvalidCredentials);
        }

        Ok(credentials.user)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Validate a registration form and create a `USER` account for it.
    ///
    /// Username uniqueness is checked before email uniqueness.
    async fn register(&self, registration: Registration) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UsersServiceError>;

    /// Check a username and password pair.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`UsersServiceError::InvalidCredentials`].
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserRecord, UsersServiceError>;
}
