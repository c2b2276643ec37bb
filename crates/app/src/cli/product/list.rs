use clap::Args;
use trolley_app::domain::products::{PgProductsService, ProductsService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    /// Only list products with stock left
    #[arg(long)]
    in_stock: bool,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListProductsArgs) -> Result<(), String> {
    let service = PgProductsService::new(args.database.connect().await?);

    let products = if args.in_stock {
        service.list_in_stock_products().await
    } else {
        service.list_products_by_name().await
    }
    .map_err(|error| format!("failed to list products: {error}"))?;

    if products.is_empty() {
        println!("no products");
        return Ok(());
    }

    for product in products {
        println!(
            "{}  {:>10}  {:>6}  {}",
            product.uuid, product.price, product.stock, product.name
        );
    }

    Ok(())
}
