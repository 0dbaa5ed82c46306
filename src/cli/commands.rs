//! Command dispatch: one handler per subcommand

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::TrelloClient;
use crate::cli::args::{AddCardArgs, Cli, Commands, ConfigCommands, UpdateCardArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::table::{boards_table, cards_table, labels_table, lists_table};
use crate::config::{config_template, global_config_path, resolve_credentials, Settings};
use crate::domain::{CardUpdate, NewCard};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Boards => cmd_boards(&connect(cli)?.client),
        Commands::Lists { board_id } => cmd_lists(&connect(cli)?.client, board_id),
        Commands::Labels { board_id } => cmd_labels(&connect(cli)?.client, board_id),
        Commands::ViewCards { list_id } => cmd_view_cards(&connect(cli)?.client, list_id),
        Commands::Search { query } => cmd_search(&connect(cli)?.client, query),
        Commands::AddCard(args) => cmd_add_card(&connect(cli)?.client, args),
        Commands::UpdateCard(args) => cmd_update_card(&connect(cli)?.client, args),
        Commands::Comment { card_id, text } => cmd_comment(&connect(cli)?.client, card_id, text),
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Completion { shell } => cmd_completion(*shell),
    }
}

/// Resolve credentials and settings, then build the client.
///
/// Fails before any network call when credentials are missing.
fn connect(cli: &Cli) -> CliResult<ServiceContainer> {
    let credentials = resolve_credentials(cli.api_key.as_deref(), cli.token.as_deref(), |var| {
        std::env::var(var).ok()
    })?;
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("connect: base_url={}", settings.base_url);

    ServiceContainer::new(&settings, credentials)
        .map_err(|e| CliError::Config(format!("cannot create HTTP client: {}", e)))
}

#[instrument(skip(client))]
fn cmd_boards(client: &TrelloClient) -> CliResult<()> {
    let boards = client
        .list_boards()
        .map_err(CliError::operation("Error retrieving boards"))?;

    if boards.is_empty() {
        output::info("No boards found for the current user");
        return Ok(());
    }
    output::header("Your Trello Boards");
    output::info(&boards_table(&boards));
    Ok(())
}

#[instrument(skip(client))]
fn cmd_lists(client: &TrelloClient, board_id: &str) -> CliResult<()> {
    let lists = client
        .list_lists(board_id)
        .map_err(CliError::operation("Error retrieving lists"))?;

    if lists.is_empty() {
        output::info(&format!("No lists found in board {}", board_id));
        return Ok(());
    }
    output::header(&format!("Lists in Board {}", board_id));
    output::info(&lists_table(&lists));
    Ok(())
}

#[instrument(skip(client))]
fn cmd_labels(client: &TrelloClient, board_id: &str) -> CliResult<()> {
    let labels = client
        .list_labels(board_id)
        .map_err(CliError::operation("Error retrieving labels"))?;

    if labels.is_empty() {
        output::info(&format!("No labels found in board {}", board_id));
        return Ok(());
    }
    output::header(&format!("Labels in Board {}", board_id));
    output::info(&labels_table(&labels));
    Ok(())
}

#[instrument(skip(client))]
fn cmd_view_cards(client: &TrelloClient, list_id: &str) -> CliResult<()> {
    const CONTEXT: &str = "Error displaying the cards in list";
    let cards = client.list_cards(list_id).map_err(CliError::operation(CONTEXT))?;

    if cards.is_empty() {
        output::info("The list does not contain any cards yet");
        return Ok(());
    }
    let list_name = client
        .get_list_name(list_id)
        .map_err(CliError::operation(CONTEXT))?;
    output::header(&format!("Cards in list: {}[{}]", list_name, list_id));
    output::info(&cards_table(&cards));
    Ok(())
}

#[instrument(skip(client))]
fn cmd_search(client: &TrelloClient, query: &str) -> CliResult<()> {
    let cards = client
        .search_cards(query)
        .map_err(CliError::operation("Error retrieving search results"))?;

    if cards.is_empty() {
        output::info(&format!("No cards found for the query string: {}", query));
        return Ok(());
    }
    output::header(&format!("Card results for the query string: {}", query));
    output::info(&cards_table(&cards));
    Ok(())
}

#[instrument(skip(client))]
fn cmd_add_card(client: &TrelloClient, args: &AddCardArgs) -> CliResult<()> {
    let card = client
        .create_card(&NewCard::from(args))
        .map_err(CliError::operation("Error creating card"))?;
    output::success(&format!("Successfully created card: {}", card.short_url));
    Ok(())
}

#[instrument(skip(client))]
fn cmd_update_card(client: &TrelloClient, args: &UpdateCardArgs) -> CliResult<()> {
    let update = CardUpdate::from(args);
    if update.is_empty() {
        return Err(CliError::Usage(
            "nothing to update: pass --name, --list-id, --comment, --archive or --unarchive"
                .into(),
        ));
    }
    let card = client
        .update_card(&args.card_id, &update)
        .map_err(CliError::operation("Error updating card"))?;
    output::success(&format!("Successfully updated card: {}", card.short_url));
    Ok(())
}

#[instrument(skip(client, text))]
fn cmd_comment(client: &TrelloClient, card_id: &str, text: &str) -> CliResult<()> {
    let comment = client
        .add_comment(card_id, text)
        .map_err(CliError::operation("Error adding comment"))?;
    output::success(&format!("Comment added to card {}", comment.card_id));
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let global = global_config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(no home directory)".into());
            output::action("Global config", &global);
            if let Some(path) = &cli.config {
                output::action("Active config", &path.display());
            }
        }
        ConfigCommands::Init { force } => {
            let path = config_target(cli)?;
            if path.exists() && !*force {
                return Err(CliError::Usage(format!(
                    "config file already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|source| CliError::Io {
                    context: format!("create {}", parent.display()),
                    source,
                })?;
            }
            std::fs::write(&path, config_template()).map_err(|source| CliError::Io {
                context: format!("write {}", path.display()),
                source,
            })?;
            output::action("Created", &path.display());
        }
    }
    Ok(())
}

/// `--config` if given, else the global config location.
fn config_target(cli: &Cli) -> CliResult<PathBuf> {
    cli.config
        .clone()
        .or_else(global_config_path)
        .ok_or_else(|| CliError::Config("cannot determine config directory".into()))
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
