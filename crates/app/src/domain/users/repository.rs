//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::users::{
    data::NewUser,
    records::{UserCredentials, UserRecord, UserRole, UserUuid},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const FIND_USER_BY_USERNAME_SQL: &str = include_str!("sql/find_user_by_username.sql");
const USERNAME_EXISTS_SQL: &str = include_str!("sql/username_exists.sql");
const EMAIL_EXISTS_SQL: &str = include_str!("sql/email_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: &NewUser,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .fetch_one(&mut **tx)
            .await
            .map(|credentials| credentials.user)
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
            .map(|credentials| credentials.user)
    }

    pub(crate) async fn find_credentials_by_username(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        query_as::<Postgres, UserCredentials>(FIND_USER_BY_USERNAME_SQL)
            .bind(username)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn username_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        username: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(USERNAME_EXISTS_SQL)
            .bind(username)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn email_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(EMAIL_EXISTS_SQL)
            .bind(email)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for UserCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        let role = role
            .parse::<UserRole>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            user: UserRecord {
                uuid: UserUuid::from_uuid(row.try_get("uuid")?),
                username: row.try_get("username")?,
                email: row.try_get("email")?,
                role,
                created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
                updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            },
            password_hash: row.try_get("password_hash")?,
        })
    }
}
