//! Trello API client
//!
//! One method per remote operation. Each method builds a request, sends it
//! through the transport, rejects non-2xx answers and projects the JSON into
//! domain records.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    require_id, Board, Card, CardUpdate, Comment, Credentials, Field, Label, List, ListName,
    NewCard, RawCommentAction, RawLabel, SearchResults,
};
use crate::infrastructure::traits::{HttpMethod, HttpRequest, HttpTransport};

/// Authenticated client for the Trello REST API.
pub struct TrelloClient {
    transport: Arc<dyn HttpTransport>,
    credentials: Credentials,
}

impl TrelloClient {
    pub fn new(transport: Arc<dyn HttpTransport>, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Boards owned by the authenticated member.
    #[instrument(skip(self))]
    pub fn list_boards(&self) -> ApplicationResult<Vec<Board>> {
        let request = HttpRequest::new(HttpMethod::Get, ["members", "me", "boards"])
            .param("fields", "name,id");
        self.execute("list boards", request)
    }

    /// Lists on a board.
    #[instrument(skip(self))]
    pub fn list_lists(&self, board_id: &str) -> ApplicationResult<Vec<List>> {
        let board_id = require_id(board_id, "board id")?;
        let request = HttpRequest::new(HttpMethod::Get, ["boards", board_id, "lists"])
            .param("fields", "name,id");
        self.execute("list lists", request)
    }

    /// Name of a single list.
    #[instrument(skip(self))]
    pub fn get_list_name(&self, list_id: &str) -> ApplicationResult<String> {
        let list_id = require_id(list_id, "list id")?;
        let request = HttpRequest::new(HttpMethod::Get, ["lists", list_id]).param("fields", "name");
        let list: ListName = self.execute("get list", request)?;
        Ok(list.name)
    }

    /// Cards in a list.
    #[instrument(skip(self))]
    pub fn list_cards(&self, list_id: &str) -> ApplicationResult<Vec<Card>> {
        let list_id = require_id(list_id, "list id")?;
        let request = HttpRequest::new(HttpMethod::Get, ["lists", list_id, "cards"])
            .param("fields", "id,name,shortUrl");
        self.execute("list cards", request)
    }

    /// Labels on a board, with display defaults for unnamed or colorless labels.
    #[instrument(skip(self))]
    pub fn list_labels(&self, board_id: &str) -> ApplicationResult<Vec<Label>> {
        let board_id = require_id(board_id, "board id")?;
        let request = HttpRequest::new(HttpMethod::Get, ["boards", board_id, "labels"])
            .param("fields", "name,id,color");
        let raw: Vec<RawLabel> = self.execute("list labels", request)?;
        Ok(raw.into_iter().map(Label::from).collect())
    }

    /// Cards matching `query` across all boards of the member.
    #[instrument(skip(self))]
    pub fn search_cards(&self, query: &str) -> ApplicationResult<Vec<Card>> {
        let request = HttpRequest::new(HttpMethod::Get, ["search"])
            .param("query", query)
            .param("modelTypes", "cards")
            .param("card_fields", "name,shortUrl");
        let results: SearchResults = self.execute("search cards", request)?;
        debug!("search_cards: {} hits", results.cards.len());
        Ok(results.cards)
    }

    /// Create a card, then attach the optional comment.
    ///
    /// The comment is only posted once the card exists and has an id. A
    /// failing comment fails the call, although the card has been created.
    #[instrument(skip(self))]
    pub fn create_card(&self, card: &NewCard) -> ApplicationResult<Card> {
        require_id(&card.list_id, "list id")?;
        let request = HttpRequest::new(HttpMethod::Post, ["cards"]).params(card.to_params());
        let created: Card = self.execute("create card", request)?;
        info!("created card {} ({})", created.id, created.short_url);

        if let Some(comment) = &card.comment {
            if !created.id.is_empty() {
                self.add_comment(&created.id, comment)?;
            }
        }
        Ok(created)
    }

    /// Apply a partial update. Only fields that are `Set` are sent.
    ///
    /// A comment, if present, is posted before the update itself.
    #[instrument(skip(self))]
    pub fn update_card(&self, card_id: &str, update: &CardUpdate) -> ApplicationResult<Card> {
        let card_id = require_id(card_id, "card id")?;
        if let Field::Set(list_id) = &update.list_id {
            require_id(list_id, "list id")?;
        }
        if let Field::Set(comment) = &update.comment {
            self.add_comment(card_id, comment)?;
        }

        let request = HttpRequest::new(HttpMethod::Put, ["cards", card_id]).params(update.to_params());
        let updated: Card = self.execute("update card", request)?;
        info!("updated card {}", updated.id);
        Ok(updated)
    }

    /// Post a comment onto a card.
    #[instrument(skip(self, text))]
    pub fn add_comment(&self, card_id: &str, text: &str) -> ApplicationResult<Comment> {
        let card_id = require_id(card_id, "card id")?;
        let request = HttpRequest::new(HttpMethod::Post, ["cards", card_id, "actions", "comments"])
            .param("text", text);
        let action: RawCommentAction = self.execute("add comment", request)?;
        info!("added comment {} to card {}", action.id, card_id);
        Ok(action.into_comment(card_id, text))
    }

    /// Append credentials, send, check the status and decode the body.
    fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: HttpRequest,
    ) -> ApplicationResult<T> {
        let request = request.params(self.credentials.query_params());
        let response = self
            .transport
            .send(&request)
            .map_err(|source| ApplicationError::Transport {
                operation: operation.to_string(),
                source,
            })?;

        if !response.is_success() {
            debug!(
                "{}: {} {} returned {}",
                operation,
                request.method,
                request.path(),
                response.status
            );
            return Err(ApplicationError::api(response.status, response.body));
        }

        serde_json::from_str(&response.body).map_err(|source| ApplicationError::Decode {
            operation: operation.to_string(),
            source,
        })
    }
}
