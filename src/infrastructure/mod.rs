//! Infrastructure layer: HTTP transport and DI container
//!
//! This layer implements the I/O boundary traits and wires up the client.

pub mod di;
pub mod error;
pub mod http;
pub mod traits;

pub use error::{TransportError, TransportResult};
pub use http::ReqwestTransport;
pub use traits::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
