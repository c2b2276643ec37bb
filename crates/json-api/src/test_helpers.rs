//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use trolley_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid},
        },
        checkout::MockCheckoutService,
        orders::{
            MockOrdersService,
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderStatus, OrderUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        users::{
            MockUsersService,
            records::{UserRecord, UserRole, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// Mocked services behind an [`AppContext`]. Anything not replaced refuses every call.
pub(crate) struct TestServices {
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) orders: MockOrdersService,
    pub(crate) users: MockUsersService,
    pub(crate) auth: MockAuthService,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            products: strict_products_mock(),
            carts: strict_carts_mock(),
            checkout: strict_checkout_mock(),
            orders: strict_orders_mock(),
            users: strict_users_mock(),
            auth: strict_auth_mock(),
        }
    }
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            checkout: Arc::new(self.checkout),
            orders: Arc::new(self.orders),
            users: Arc::new(self.users),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` as [`TEST_USER_UUID`], skipping bearer authentication.
    pub(crate) fn authenticated(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_user)
                .push(route),
        )
    }

    /// Serve `route` without any user in the depot.
    pub(crate) fn anonymous(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_list_products_by_name().never();
    products.expect_search_products().never();
    products.expect_find_products_by_name().never();
    products.expect_list_products_in_price_range().never();
    products.expect_list_in_stock_products().never();
    products.expect_get_product().never();
    products.expect_has_stock().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_set_stock().never();

    products
}

pub(crate) fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();
    carts.expect_count_items().never();
    carts.expect_cart_total().never();
    carts.expect_validate_stock().never();

    carts
}

pub(crate) fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_summary().never();
    checkout.expect_checkout().never();

    checkout
}

pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_list_orders().never();
    orders.expect_list_orders_by_status().never();
    orders.expect_get_order().never();
    orders.expect_count_orders().never();
    orders.expect_total_spent().never();

    orders
}

pub(crate) fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_register().never();
    users.expect_get_user().never();
    users.expect_find_by_username().never();
    users.expect_verify_credentials().never();

    users
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();
    auth.expect_logout().never();

    auth
}

pub(crate) fn make_product(uuid: ProductUuid, name: &str, price: Decimal, stock: u32) -> ProductRecord {
    ProductRecord {
        uuid,
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        stock,
        image_url: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(
    product: ProductUuid,
    name: &str,
    unit_price: Decimal,
    quantity: u32,
) -> CartItemRecord {
    CartItemRecord {
        uuid: CartItemUuid::new(),
        user_uuid: TEST_USER_UUID,
        product_uuid: product,
        product_name: name.to_string(),
        unit_price,
        stock: 10,
        quantity,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, lines: &[(&str, u32, Decimal)]) -> OrderRecord {
    let items: Vec<OrderItemRecord> = lines
        .iter()
        .map(|&(name, quantity, price_at_purchase)| OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: ProductUuid::new(),
            product_name: name.to_string(),
            quantity,
            price_at_purchase,
        })
        .collect();

    let total_price = items
        .iter()
        .map(|item| item.price_at_purchase * Decimal::from(item.quantity))
        .sum();

    OrderRecord {
        uuid,
        user_uuid: TEST_USER_UUID,
        total_price,
        status: OrderStatus::Pending,
        created_at: Timestamp::UNIX_EPOCH,
        items,
    }
}

pub(crate) fn make_user(uuid: UserUuid, username: &str) -> UserRecord {
    UserRecord {
        uuid,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        role: UserRole::User,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
