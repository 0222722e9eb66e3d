//! Update command

use clap::Args;

use crate::domain::mutation::Mutation;
use crate::domain::query::USERS_KEY;
use crate::domain::user::{User, UserDraft, UserId};

#[derive(Args)]
pub struct UpdateArgs {
    /// Remote id of the user to edit
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    // No --username flag: the username is immutable once persisted, so
    // the edit form disables the field at the source.
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub street: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
}

/// Seed the edit form from the persisted record and apply the changed
/// fields. The username always round-trips verbatim.
pub(crate) fn apply_edits(user: &User, args: &UpdateArgs) -> UserDraft {
    let mut draft = user.draft();

    if let Some(name) = &args.name {
        draft.name = name.clone();
    }
    if let Some(email) = &args.email {
        draft.email = email.clone();
    }
    if let Some(phone) = &args.phone {
        draft.phone = phone.clone();
    }
    if let Some(website) = &args.website {
        draft.website = website.clone();
    }
    if let Some(company) = &args.company {
        draft.company.name = Some(company.clone());
    }
    if let Some(street) = &args.street {
        draft.address.street = street.clone();
    }
    if let Some(city) = &args.city {
        draft.address.city = city.clone();
    }

    draft
}

pub async fn run(args: UpdateArgs) -> anyhow::Result<()> {
    let core = super::bootstrap()?;

    let state = core.queries.settled(USERS_KEY).await?;
    let users = state
        .users()
        .ok_or_else(|| anyhow::anyhow!("error fetching users"))?;

    let id = UserId::new(args.id);
    let user = users
        .iter()
        .find(|user| user.id == id)
        .ok_or_else(|| anyhow::anyhow!("user {id} not found"))?;

    let draft = apply_edits(user, &args);
    super::submit_and_report(&core, Mutation::Update(id, draft)).await
}
