//! List command

use clap::Args;

use super::render;
use crate::domain::query::{QueryState, USERS_KEY};

#[derive(Args)]
pub struct ListArgs {
    /// Local, case-insensitive filter over the name column
    #[arg(long)]
    pub search: Option<String>,
}

pub async fn run(args: ListArgs) -> anyhow::Result<()> {
    let core = super::bootstrap()?;

    match core.queries.settled(USERS_KEY).await? {
        QueryState::Ready(users) => {
            let term = args.search.unwrap_or_default();
            render::print_table(&render::filter_by_name(&users, &term));
            Ok(())
        }
        QueryState::Errored(reason) => anyhow::bail!("error fetching users: {reason}"),
        _ => anyhow::bail!("collection read did not settle"),
    }
}
