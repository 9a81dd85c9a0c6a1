//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Responders, render helpers, view loader
//!     → tracing events with structured fields (responder, path, error)
//!     → logging.rs subscriber (fmt layer, EnvFilter)
//! HTTP layer
//!     → tower_http TraceLayer spans carrying x-request-id
//! ```

pub mod logging;

pub use logging::init_logging;
