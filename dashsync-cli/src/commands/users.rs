use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use shared::{
    client::UserDirectoryApi,
    directory::{DirectoryAction, DirectoryState, DraftField},
    guard::Access,
    models::{DirectoryUser, Notice},
    workflow,
};

use super::session::Terminal;

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List one page of users
    List(ListArgs),
    /// Change a user's name or email
    Update(UpdateArgs),
    /// Remove a user
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page to fetch
    #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Case-insensitive match on name or email
    #[arg(long, short)]
    pub search: Option<String>,

    /// Only users whose first name starts with this letter
    #[arg(long, short)]
    pub letter: Option<char>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Id of the user to update
    pub id: u64,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Page the user is listed on
    #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the user to delete
    pub id: u64,

    /// Page the user is listed on
    #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

/// Runs a `users` subcommand. Every subcommand needs a session.
pub async fn run(terminal: Terminal, command: UsersCommand) -> Result<()> {
    terminal.require(Access::Protected)?;
    let client = terminal.client();

    match command {
        UsersCommand::List(args) => {
            let mut state = load_page(&client, args.page).await?;
            if let Some(search) = args.search {
                state.apply(DirectoryAction::SetSearch(search));
            }
            state.apply(DirectoryAction::SetLetter(args.letter));
            print!("{}", render_page(&state));
            Ok(())
        }
        UsersCommand::Update(args) => {
            let mut state = load_page(&client, args.page).await?;
            if !state.apply(DirectoryAction::BeginEdit(args.id)) {
                bail!("user {} is not on page {}", args.id, state.page());
            }
            let edits = [
                (DraftField::FirstName, args.first_name),
                (DraftField::LastName, args.last_name),
                (DraftField::Email, args.email),
            ];
            for (field, value) in edits {
                if let Some(value) = value {
                    state.apply(DirectoryAction::EditField(field, value));
                }
            }
            let Some(draft) = state.draft().cloned() else {
                bail!("user {} is not on page {}", args.id, state.page());
            };

            let notice = workflow::submit_edit(&client, &draft)
                .await
                .apply_to(&mut state);
            report(notice)?;
            if let Some(user) = state.user(args.id) {
                println!("{}", render_row(user));
            }
            Ok(())
        }
        UsersCommand::Delete(args) => {
            let mut state = load_page(&client, args.page).await?;
            if state.user(args.id).is_none() {
                bail!("user {} is not on page {}", args.id, state.page());
            }
            let notice = workflow::delete_user(&client, args.id)
                .await
                .apply_to(&mut state);
            report(notice)
        }
    }
}

/// Fetches `page` through the same state machine the web view uses.
///
/// Fails when the service reports fewer pages than `page`; the state machine
/// would otherwise clamp the indicator while keeping that page's records.
async fn load_page<A>(api: &A, page: u32) -> Result<DirectoryState>
where
    A: UserDirectoryApi + ?Sized,
{
    let mut state = DirectoryState::starting_at(page);
    let generation = state.next_generation();
    state.apply(DirectoryAction::FetchStarted { generation });

    let notice = workflow::fetch_page(api, state.page(), generation)
        .await
        .apply_to(&mut state);
    if let Some(notice) = notice.filter(Notice::is_error) {
        bail!("{}", notice.message);
    }
    ensure_page_in_range(&state, page)?;
    Ok(state)
}

fn ensure_page_in_range(state: &DirectoryState, requested: u32) -> Result<()> {
    if requested > state.total_pages() {
        bail!(
            "page {requested} is out of range; the directory has {} page(s)",
            state.total_pages()
        );
    }
    Ok(())
}

fn report(notice: Option<Notice>) -> Result<()> {
    match notice {
        Some(notice) if notice.is_error() => bail!("{}", notice.message),
        Some(notice) => {
            println!("{}", notice.message);
            Ok(())
        }
        None => Ok(()),
    }
}

fn render_row(user: &DirectoryUser) -> String {
    format!("{:>4}  {:<24}  {}", user.id, user.full_name(), user.email)
}

fn render_page(state: &DirectoryState) -> String {
    let mut out = String::new();
    if state.filtered_users().is_empty() {
        out.push_str("No users match the current filters.\n");
    } else {
        out.push_str(&format!("{:>4}  {:<24}  {}\n", "ID", "NAME", "EMAIL"));
        for user in state.filtered_users() {
            out.push_str(&render_row(user));
            out.push('\n');
        }
    }

    let letters: String = state.letters().into_iter().collect();
    out.push_str(&format!("Page {}/{}\n", state.page(), state.total_pages()));
    out.push_str(&format!("Letters: {letters}\n"));
    out
}
