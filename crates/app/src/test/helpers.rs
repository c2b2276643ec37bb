//! Test Helpers

use rust_decimal::Decimal;
use sqlx::query;

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid},
        },
        products::{
            ProductsService, ProductsServiceError,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            UsersService, UsersServiceError,
            records::{UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

/// PHC string that parses but matches no password; keeps argon2 out of tests that
/// only need a user row.
const UNUSABLE_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Insert a user directly, with email `{username}@example.com`.
pub(crate) async fn create_user(
    ctx: &TestContext,
    username: &str,
) -> Result<UserRecord, UsersServiceError> {
    let uuid = UserUuid::new();

    query("INSERT INTO users (uuid, username, email, password_hash) VALUES ($1, $2, $3, $4)")
        .bind(uuid.into_uuid())
        .bind(username)
        .bind(format!("{username}@example.com"))
        .bind(UNUSABLE_PASSWORD_HASH)
        .execute(ctx.db.pool())
        .await?;

    ctx.users.get_user(uuid).await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
    stock: u32,
) -> Result<ProductRecord, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            description: String::new(),
            price,
            stock,
            image_url: None,
        })
        .await
}

pub(crate) async fn add_item(
    ctx: &TestContext,
    user: UserUuid,
    product: ProductUuid,
    quantity: i32,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                uuid: CartItemUuid::new(),
                product_uuid: product,
                quantity,
            },
        )
        .await
}
