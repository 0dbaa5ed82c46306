//! Domain layer: entities and request models
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod requests;

pub use entities::*;
pub use error::DomainError;
pub use requests::{join_label_ids, CardUpdate, Field, NewCard};
