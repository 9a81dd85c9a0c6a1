//! Page responder helpers for axum applications.
//!
//! Per-request `Responder`, response helpers (JSON/JSONP, cache headers, flash
//! messages), client IP resolution, meta tags and template rendering over a
//! pluggable engine.

pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod localize;
pub mod meta;
pub mod observability;
pub mod render;
pub mod responder;
pub mod session;
pub mod timezone;
pub mod views;

pub use app::App;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use http::{HttpServer, IncomingRequest, OutgoingResponse};
pub use responder::Responder;
