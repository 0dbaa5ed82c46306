//! Application layer: the API client
//!
//! This layer orchestrates domain logic and depends on the transport trait.

pub mod client;
pub mod error;

pub use client::TrelloClient;
pub use error::{ApplicationError, ApplicationResult};
