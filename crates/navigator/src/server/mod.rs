//! Validating HTTP proxy in front of the Parliament APIs
//!
//! Browser clients cannot call the upstream APIs directly, so the proxy
//! validates query parameters, forwards the request and relays the upstream
//! JSON with permissive CORS headers.

pub mod error;
pub mod handlers;
pub mod routing;
pub mod startup;
pub mod state;
pub mod types;

pub use error::ProxyError;
pub use routing::create_router;
pub use startup::start_server;
pub use state::AppState;
