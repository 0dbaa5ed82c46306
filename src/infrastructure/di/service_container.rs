//! Service container for dependency injection
//!
//! Builds the transport from settings and hands it to the API client.

use std::sync::Arc;

use crate::application::TrelloClient;
use crate::config::Settings;
use crate::domain::Credentials;
use crate::infrastructure::error::TransportResult;
use crate::infrastructure::http::ReqwestTransport;
use crate::infrastructure::traits::HttpTransport;

/// Container holding everything a command needs.
pub struct ServiceContainer {
    /// Authenticated API client
    pub client: TrelloClient,
}

impl ServiceContainer {
    /// Create a new service container with the real HTTP transport.
    pub fn new(settings: &Settings, credentials: Credentials) -> TransportResult<Self> {
        let transport = ReqwestTransport::from_settings(settings)?;
        Ok(Self::with_deps(credentials, Arc::new(transport)))
    }

    /// Create a service container with a custom transport (for testing).
    pub fn with_deps(credentials: Credentials, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            client: TrelloClient::new(transport, credentials),
        }
    }
}
