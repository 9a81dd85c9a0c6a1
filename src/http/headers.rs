//! Header names and values used by the request/response helpers.

/// X-Forwarded-For header - client IP chain appended by proxies.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// X-Forwarded-Proto header - scheme the client used towards the proxy.
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// X-Real-IP header - single client IP set by a proxy.
pub const X_REAL_IP: &str = "x-real-ip";

/// Request ID header propagated through the trace layer.
pub const X_REQUEST_ID: &str = "x-request-id";

pub const ACCEPT_LANGUAGE: &str = "accept-language";

pub const PRAGMA: &str = "pragma";

pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";
pub const CONTENT_TYPE_JAVASCRIPT: &str = "application/javascript; charset=UTF-8";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=UTF-8";

/// Cache-Control value disabling every cache layer.
pub const NO_CACHE_CONTROL: &str =
    "no-cache, private, must-revalidate, max-stale=0, post-check=0, pre-check=0, no-store";
