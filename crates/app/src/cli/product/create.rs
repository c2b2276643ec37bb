use clap::Args;
use rust_decimal::Decimal;
use trolley_app::domain::products::{
    PgProductsService, ProductsService,
    data::NewProduct,
    records::ProductUuid,
};
use uuid::Uuid;

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price, at most two decimal places
    #[arg(long)]
    price: Decimal,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    #[arg(long, default_value = "")]
    description: String,

    #[arg(long)]
    image_url: Option<String>,

    /// Optional product UUID; generated when omitted
    #[arg(long)]
    product_uuid: Option<Uuid>,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let service = PgProductsService::new(args.database.connect().await?);

    let product = service
        .create_product(NewProduct {
            uuid: args
                .product_uuid
                .map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: args.name,
            description: args.description,
            price: args.price,
            stock: args.stock,
            image_url: args.image_url,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("name: {}", product.name);
    println!("price: {}", product.price);
    println!("stock: {}", product.stock);

    Ok(())
}
