use clap::Args;
use trolley_app::domain::products::{PgProductsService, ProductsService, records::ProductUuid};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct RestockProductArgs {
    /// Product UUID
    #[arg(long)]
    product_uuid: Uuid,

    /// New stock level
    #[arg(long)]
    stock: u32,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: RestockProductArgs) -> Result<(), String> {
    let service = PgProductsService::new(args.database.connect().await?);

    let product = service
        .set_stock(ProductUuid::from_uuid(args.product_uuid), args.stock)
        .await
        .map_err(|error| format!("failed to restock product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("stock: {}", product.stock);

    Ok(())
}
