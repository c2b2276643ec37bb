use clap::{Args, Parser, Subcommand};
use trolley_app::database::{self, Db};

mod order;
mod product;
mod user;

#[derive(Debug, Parser)]
#[command(name = "trolley-app", about = "Trolley shop administration", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Product(product::ProductCommand),
    User(user::UserCommand),
    Order(order::OrderCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Product(command) => product::run(command).await,
            Commands::User(command) => user::run(command).await,
            Commands::Order(command) => order::run(command).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        database::connect(&self.database_url)
            .await
            .map(Db::new)
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
