//! Blocking HTTP transport over reqwest

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::{Method, Url};
use tracing::{debug, trace};

use crate::config::Settings;
use crate::infrastructure::error::{TransportError, TransportResult};
use crate::infrastructure::traits::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

/// Real transport: joins request segments onto the base URL and sends the
/// request with explicit connect and overall timeouts.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, connect_timeout: Duration, timeout: Duration) -> TransportResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_settings(settings: &Settings) -> TransportResult<Self> {
        Self::new(
            &settings.base_url,
            Duration::from_secs(settings.connect_timeout_secs),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Full URL for a request, path segments percent-encoded.
    pub fn url_for(&self, request: &HttpRequest) -> TransportResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::Url {
                message: format!("{} cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(request.segments.iter().map(String::as_str));
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                request
                    .query
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(url)
    }
}

/// Parse and check that the URL can carry a path.
pub fn parse_base_url(raw: &str) -> TransportResult<Url> {
    let url = Url::parse(raw).map_err(|e| TransportError::Url {
        message: format!("{}: {}", raw, e),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::Url {
            message: format!("{}: expected an http(s) base URL", raw),
        });
    }
    Ok(url)
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> TransportResult<HttpResponse> {
        let url = self.url_for(request)?;
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
        };
        debug!("{} {}", request.method, request.path());

        let response = self.client.request(method, url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        trace!("{} {} -> {} ({} bytes)", request.method, request.path(), status, body.len());

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> ReqwestTransport {
        ReqwestTransport::new(base, Duration::from_secs(1), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn url_for_appends_segments_to_versioned_base() {
        let t = transport("https://api.trello.com/1");
        let req = HttpRequest::new(HttpMethod::Get, ["members", "me", "boards"])
            .param("key", "k")
            .param("fields", "name,id");
        let url = t.url_for(&req).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.trello.com/1/members/me/boards?key=k&fields=name%2Cid"
        );
    }

    #[test]
    fn url_for_handles_trailing_slash_and_bare_host() {
        let with_slash = transport("https://api.trello.com/1/");
        let bare = transport("http://127.0.0.1:8080");
        let req = HttpRequest::new(HttpMethod::Get, ["search"]);
        assert_eq!(
            with_slash.url_for(&req).unwrap().as_str(),
            "https://api.trello.com/1/search"
        );
        assert_eq!(bare.url_for(&req).unwrap().as_str(), "http://127.0.0.1:8080/search");
    }

    #[test]
    fn url_for_encodes_path_segments() {
        let t = transport("https://api.trello.com/1");
        let req = HttpRequest::new(HttpMethod::Get, ["lists", "a/b c"]);
        assert_eq!(
            t.url_for(&req).unwrap().as_str(),
            "https://api.trello.com/1/lists/a%2Fb%20c"
        );
    }

    #[test]
    fn rejects_non_http_base_urls() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("mailto:someone@example.com").is_err());
        assert!(parse_base_url("ftp://example.com/1").is_err());
        assert!(parse_base_url("https://api.trello.com/1").is_ok());
    }
}
