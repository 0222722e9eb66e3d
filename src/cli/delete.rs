//! Delete command

use std::io::Write;

use clap::Args;

use crate::domain::mutation::Mutation;
use crate::domain::user::UserId;

#[derive(Args)]
pub struct DeleteArgs {
    /// Remote id of the user to delete
    pub id: i64,
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

pub async fn run(args: DeleteArgs) -> anyhow::Result<()> {
    if !args.yes && !confirm()? {
        println!("Cancelled");
        return Ok(());
    }

    let core = super::bootstrap()?;
    super::submit_and_report(&core, Mutation::Delete(UserId::new(args.id))).await
}

fn confirm() -> anyhow::Result<bool> {
    print!("This action cannot be undone. This will permanently delete the user. Continue? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
