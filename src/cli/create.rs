//! Create command

use clap::Args;

use crate::domain::mutation::Mutation;
use crate::domain::user::{Address, Company, UserDraft};

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub username: String,
    /// Website URL; may be left empty
    #[arg(long, default_value = "")]
    pub website: String,
    /// Company name (optional)
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub city: String,
}

impl CreateArgs {
    fn into_draft(self) -> UserDraft {
        UserDraft {
            name: self.name,
            email: self.email,
            phone: self.phone,
            username: self.username,
            website: self.website,
            company: Company { name: self.company },
            address: Address {
                street: self.street,
                city: self.city,
            },
        }
    }
}

pub async fn run(args: CreateArgs) -> anyhow::Result<()> {
    let core = super::bootstrap()?;
    super::submit_and_report(&core, Mutation::Create(args.into_draft())).await
}
