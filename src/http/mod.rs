//! HTTP request/response helpers.
//!
//! # Data Flow
//! ```text
//! axum request parts
//!     → request.rs (IncomingRequest: path, query, client addressing, session, user)
//!     → extend.rs (default locals, session hook for flash messages)
//!     → [page handler via Responder]
//!     → response.rs (OutgoingResponse: JSON, cache headers, rendered HTML)
//!     → axum Response
//! ```

pub mod extend;
pub mod headers;
pub mod language;
pub mod request;
pub mod response;
pub mod server;

pub use extend::extend_response;
pub use language::{get_language, get_locale};
pub use request::{AuthUser, IncomingRequest, QueryParams};
pub use response::{AppData, OutgoingResponse, PageLocals};
pub use server::HttpServer;
