//! Locale Gateway Library
//!
//! Edge gateway for a bilingual (en/uk) marketing site: answers legacy
//! WordPress-era URLs with permanent redirects, forwards everything else to
//! the rendering origin, and serves related-content ranking over an
//! in-memory content snapshot.

pub mod config;
pub mod content;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod redirect;
pub mod related;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use redirect::{RedirectAction, RedirectEngine};
