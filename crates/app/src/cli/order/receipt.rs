use std::io;

use clap::Args;
use rusty_money::iso;
use trolley_app::domain::{
    orders::{OrdersService, PgOrdersService, records::OrderUuid},
    users::records::UserUuid,
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ReceiptArgs {
    /// Order UUID
    #[arg(long)]
    order_uuid: Uuid,

    /// UUID of the user who placed the order
    #[arg(long)]
    user_uuid: Uuid,

    /// ISO 4217 currency code used to format amounts
    #[arg(long, env = "TROLLEY_CURRENCY", default_value = "USD")]
    currency: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ReceiptArgs) -> Result<(), String> {
    let currency = iso::find(&args.currency.to_ascii_uppercase())
        .ok_or_else(|| format!("unknown currency: {}", args.currency))?;

    let service = PgOrdersService::new(args.database.connect().await?);

    let order = service
        .get_order(
            UserUuid::from_uuid(args.user_uuid),
            OrderUuid::from_uuid(args.order_uuid),
        )
        .await
        .map_err(|error| format!("failed to load order: {error}"))?;

    order
        .receipt(currency)
        .and_then(|receipt| receipt.write_to(io::stdout()))
        .map_err(|error| format!("failed to print receipt: {error}"))?;

    println!("status: {}", order.status);

    Ok(())
}
