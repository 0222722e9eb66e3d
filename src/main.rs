use clap::Parser;
use user_sync::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::List(args) => cli::list::run(args).await,
        Command::Create(args) => cli::create::run(args).await,
        Command::Update(args) => cli::update::run(args).await,
        Command::Delete(args) => cli::delete::run(args).await,
    }
}
