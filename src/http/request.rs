//! Incoming request view.
//!
//! # Responsibilities
//! - Capture path, query, headers and connection data from axum request parts
//! - Resolve protocol/hostname, honoring X-Forwarded-* only from trusted proxies
//! - Attach session, authenticated user and translator from request extensions
//!
//! # Design Decisions
//! - Forwarding headers from untrusted peers are ignored; `ip` is then the peer address
//! - The platform header (CDN client IP) is read only when explicitly configured
//! - Missing session/translator extensions fall back to in-process defaults

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{header, request::Parts, HeaderMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::App;
use crate::http::headers::{X_FORWARDED_FOR, X_FORWARDED_PROTO, X_REAL_IP};
use crate::http::language::get_locale;
use crate::localize::{StaticTranslations, Translator};
use crate::session::{MemorySession, SessionHandle};

/// Insertion-ordered query parameters.
///
/// A repeated key keeps its first position and takes the last value; earlier
/// values are dropped rather than collected into a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Parse a raw (percent-encoded) query string without the leading `?`.
    pub fn parse(query: &str) -> Self {
        url::form_urlencoded::parse(query.as_bytes()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::default();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Authenticated user attached to a request by the host's auth layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
    /// Authorization level. Lower values denote higher privilege.
    pub level: u32,
    #[serde(default)]
    pub data: Value,
}

impl AuthUser {
    pub fn new(username: impl Into<String>, level: u32) -> Self {
        Self {
            username: username.into(),
            level,
            data: Value::Null,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub path: String,
    pub query: QueryParams,
    /// Path plus query string as received.
    pub original_url: String,
    pub headers: HeaderMap,
    /// Scheme without `:` ("http" / "https").
    pub protocol: String,
    pub hostname: String,
    /// Peer address of the TCP connection.
    pub remote_addr: Option<IpAddr>,
    /// Client IP reported by the CDN/platform header.
    pub platform_ip: Option<String>,
    /// X-Forwarded-For chain, client first; only set behind a trusted proxy.
    pub proxy_ips: Vec<String>,
    /// Single client IP reported by a trusted proxy (X-Real-IP).
    pub ip: Option<String>,
    /// Preferred locale of the client (e.g. `en-US`).
    pub language: String,
    pub session: SessionHandle,
    pub user: Option<AuthUser>,
    pub translator: Translator,
}

impl IncomingRequest {
    /// A bare request for `original_url` on `http://localhost`, with an empty
    /// in-memory session and no translations.
    pub fn new(original_url: &str) -> Self {
        let (path, query) = split_url(original_url);
        Self {
            path: path.to_string(),
            query: QueryParams::parse(query),
            original_url: original_url.to_string(),
            headers: HeaderMap::new(),
            protocol: "http".to_string(),
            hostname: "localhost".to_string(),
            remote_addr: None,
            platform_ip: None,
            proxy_ips: Vec::new(),
            ip: None,
            language: String::new(),
            session: SessionHandle::new(MemorySession::new()),
            user: None,
            translator: Translator::new(StaticTranslations::default()),
        }
    }

    pub fn from_parts(parts: &Parts, app: &App) -> Self {
        let config = app.config();
        let headers = &parts.headers;

        let remote_addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_canonical());
        let trusted = remote_addr
            .is_some_and(|ip| is_trusted_proxy(ip, &config.client_ip.trusted_proxies));

        let platform_ip = config
            .client_ip
            .platform_header
            .as_deref()
            .and_then(|name| header_str(headers, name))
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .map(String::from);

        // The directly observed IP is the peer itself unless a trusted proxy
        // reports the client in X-Real-IP.
        let peer_ip = remote_addr.map(|ip| ip.to_string());
        let (proxy_ips, ip) = if trusted {
            (
                header_str(headers, X_FORWARDED_FOR)
                    .map(split_forwarded_for)
                    .unwrap_or_default(),
                header_str(headers, X_REAL_IP)
                    .map(str::trim)
                    .filter(|ip| !ip.is_empty())
                    .map(String::from)
                    .or(peer_ip),
            )
        } else {
            (Vec::new(), peer_ip)
        };

        let forwarded_proto = if trusted {
            header_str(headers, X_FORWARDED_PROTO)
                .and_then(|proto| proto.split(',').next())
                .map(str::trim)
                .filter(|proto| !proto.is_empty())
        } else {
            None
        };
        let protocol = forwarded_proto
            .or_else(|| parts.uri.scheme_str())
            .unwrap_or("http")
            .to_ascii_lowercase();

        let hostname = header_str(headers, header::HOST.as_str())
            .or_else(|| parts.uri.host())
            .map(strip_port)
            .unwrap_or_default()
            .to_string();

        let original_url = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        let session = parts
            .extensions
            .get::<SessionHandle>()
            .cloned()
            .unwrap_or_else(|| SessionHandle::new(MemorySession::new()));
        let translator = parts
            .extensions
            .get::<Translator>()
            .cloned()
            .unwrap_or_else(|| {
                Translator::new(StaticTranslations::new(config.translations.0.clone()))
            });

        Self {
            path: parts.uri.path().to_string(),
            query: QueryParams::parse(parts.uri.query().unwrap_or_default()),
            original_url,
            headers: headers.clone(),
            protocol,
            hostname,
            remote_addr,
            platform_ip,
            proxy_ips,
            ip,
            language: get_locale(headers, &config.app.default_language),
            session,
            user: parts.extensions.get::<AuthUser>().cloned(),
            translator,
        }
    }

    /// Translate `key` with the request's translator.
    pub fn t(&self, key: &str) -> String {
        self.translator.t(key)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl FromRequestParts<Arc<App>> for IncomingRequest {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<App>,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts, state))
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|h| h.to_str().ok())
}

fn split_url(url: &str) -> (&str, &str) {
    url.split_once('?').unwrap_or((url, ""))
}

/// Split an X-Forwarded-For value on commas, trimming entries and dropping empty ones.
pub fn split_forwarded_for(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(String::from)
        .collect()
}

fn is_trusted_proxy(ip: IpAddr, trusted: &[String]) -> bool {
    trusted
        .iter()
        .filter_map(|t| t.parse::<IpAddr>().ok())
        .any(|t| t.to_canonical() == ip)
}

/// Remove a `:port` suffix from a Host value, keeping bracketed IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.split(':').next().unwrap_or(host)
}
