//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, AuthSettings, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        checkout::{CheckoutService, PgCheckoutService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub orders: Arc<dyn OrdersService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, auth: AuthSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), auth))
    }

    /// Build application context on an existing pool.
    #[must_use]
    pub fn from_db(db: Db, auth: AuthSettings) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            checkout: Arc::new(PgCheckoutService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            auth: Arc::new(PgAuthService::new(db, auth)),
        }
    }
}
