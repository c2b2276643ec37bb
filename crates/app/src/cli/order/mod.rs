use clap::{Args, Subcommand};

mod receipt;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Print a placed order as a receipt
    Receipt(receipt::ReceiptArgs),
}

pub(crate) async fn run(command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::Receipt(args) => receipt::run(args).await,
    }
}
