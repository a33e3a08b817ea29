//! Command handlers for the stockly CLI.

pub mod categories;
pub mod products;

use stockly_api::InventoryClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    client: InventoryClient,
    page_size: u32,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::List(args) => products::list(client, page_size, args, global).await,
        Command::Create(args) => products::create(client, page_size, args, global).await,
        Command::Update(args) => products::update(client, page_size, args, global).await,
        Command::Delete(args) => products::delete(client, page_size, args, global).await,
        Command::Categories => categories::list(&client, global).await,
        // Handled in main, before a client exists.
        Command::Completions(_) => Ok(()),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
