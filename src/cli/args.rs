//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::domain::{CardUpdate, Field, NewCard};

/// CLI tool for managing Trello cards and boards
#[derive(Parser, Debug)]
#[command(name = "trello-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Trello API key (falls back to TRELLO_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Trello API token (falls back to TRELLO_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Settings file (default: $XDG_CONFIG_HOME/trello-cli/trello-cli.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all Trello boards for the current user
    Boards,

    /// List all lists in a specific Trello board
    Lists {
        /// ID of the Trello board
        #[arg(short, long)]
        board_id: String,
    },

    /// List all labels in a specific Trello board
    Labels {
        /// ID of the Trello board
        #[arg(short, long)]
        board_id: String,
    },

    /// View all the cards in a specific list
    ViewCards {
        /// ID of the Trello list
        #[arg(short, long)]
        list_id: String,
    },

    /// Search for cards across all your boards
    Search {
        /// Query string to search for
        #[arg(short, long)]
        query: String,
    },

    /// Add a new card to a list with optional labels and comment
    AddCard(AddCardArgs),

    /// Rename, move, archive or comment on a card
    UpdateCard(UpdateCardArgs),

    /// Add a comment to a card
    Comment {
        /// ID of the Trello card
        #[arg(long)]
        card_id: String,
        /// Comment text
        #[arg(short, long)]
        text: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug)]
pub struct AddCardArgs {
    /// ID of the Trello list
    #[arg(short, long)]
    pub list_id: String,
    /// Name of the card
    #[arg(short, long)]
    pub name: String,
    /// Label ID to add to the card (repeatable)
    #[arg(long = "label")]
    pub labels: Vec<String>,
    /// Comment to add to the card
    #[arg(short, long)]
    pub comment: Option<String>,
}

impl From<&AddCardArgs> for NewCard {
    fn from(args: &AddCardArgs) -> Self {
        let card = NewCard::new(&args.list_id, &args.name).with_labels(args.labels.iter().cloned());
        match &args.comment {
            Some(comment) => card.with_comment(comment),
            None => card,
        }
    }
}

#[derive(Args, Debug)]
pub struct UpdateCardArgs {
    /// ID of the Trello card
    #[arg(long)]
    pub card_id: String,
    /// New card name
    #[arg(short, long)]
    pub name: Option<String>,
    /// Move the card to this list
    #[arg(short, long)]
    pub list_id: Option<String>,
    /// Comment to add to the card
    #[arg(short, long)]
    pub comment: Option<String>,
    /// Archive the card
    #[arg(long, conflicts_with = "unarchive")]
    pub archive: bool,
    /// Restore an archived card
    #[arg(long, conflicts_with = "archive")]
    pub unarchive: bool,
}

impl UpdateCardArgs {
    /// Neither flag leaves the archive state untouched.
    pub fn archive_field(&self) -> Field<bool> {
        match (self.archive, self.unarchive) {
            (true, _) => Field::Set(true),
            (_, true) => Field::Set(false),
            _ => Field::Unset,
        }
    }
}

impl From<&UpdateCardArgs> for CardUpdate {
    fn from(args: &UpdateCardArgs) -> Self {
        CardUpdate {
            name: args.name.clone().into(),
            list_id: args.list_id.clone().into(),
            archive: args.archive_field(),
            comment: args.comment.clone().into(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
