use clap::{Args, Subcommand};

mod create;
mod list;
mod restock;

#[derive(Debug, Args)]
pub(crate) struct ProductCommand {
    #[command(subcommand)]
    command: ProductSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductSubcommand {
    /// Add a product to the catalog
    Create(create::CreateProductArgs),

    /// Print the catalog
    List(list::ListProductsArgs),

    /// Overwrite a product's stock level
    Restock(restock::RestockProductArgs),
}

pub(crate) async fn run(command: ProductCommand) -> Result<(), String> {
    match command.command {
        ProductSubcommand::Create(args) => create::run(args).await,
        ProductSubcommand::List(args) => list::run(args).await,
        ProductSubcommand::Restock(args) => restock::run(args).await,
    }
}
