use clap::Parser;
use tradebell::cli::{self, Cli};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli::execute(cli).await
}
