//! trello-cli: command-line client for Trello boards, lists, labels and cards
//!
//! Layers, inner to outer:
//! - [`domain`]: entity projections and request models, no I/O
//! - [`application`]: the API client
//! - [`infrastructure`]: HTTP transport and dependency wiring
//! - [`cli`]: argument parsing, dispatch and rendering

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
