//! Outgoing response builder and response helpers.
//!
//! # Responsibilities
//! - Hold status, headers, body and per-request template locals
//! - JSON / JSONP / form-post JSON bodies with the matching Content-Type
//! - Cache headers (`set_cache_headers`)
//! - Flash messages (`add_message`), queued in the session or shown on this render
//!
//! # Design Decisions
//! - Header setters replace existing values, like a framework's `setHeader`
//! - Converted into an axum `Response` only at the end of the handler

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::app::App;
use crate::error::{Error, Result};
use crate::http::headers::{
    CONTENT_TYPE_HTML, CONTENT_TYPE_JAVASCRIPT, CONTENT_TYPE_JSON, NO_CACHE_CONTROL, PRAGMA,
};
use crate::http::request::AuthUser;
use crate::session::SessionHandle;

/// Application data exposed to client-side scripts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppData {
    pub lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

/// Per-request template locals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageLocals {
    /// Default page title; pages usually call [`PageLocals::get_title`].
    pub title: String,
    pub user: Option<AuthUser>,
    #[serde(rename = "appData")]
    pub app_data: AppData,
    #[serde(rename = "langDir")]
    pub lang_dir: String,
    pub messages: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageLocals {
    /// `"<title> - <default title>"`
    pub fn get_title(&self, title: &str) -> String {
        format!("{} - {}", title, self.title)
    }
}

pub struct OutgoingResponse {
    app: Arc<App>,
    status: StatusCode,
    headers: HeaderMap,
    body: Option<String>,
    session: Option<SessionHandle>,
    pub locals: PageLocals,
}

impl OutgoingResponse {
    pub fn new(app: Arc<App>) -> Self {
        Self {
            app,
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: None,
            session: None,
            locals: PageLocals::default(),
        }
    }

    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Set (replace) a header.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| Error::invalid_header(name))?;
        let header_value = HeaderValue::from_str(value).map_err(|_| Error::invalid_header(name))?;
        self.headers.insert(header_name, header_value);
        Ok(())
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Finish the response with `body`.
    pub fn end(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
    }

    pub(crate) fn attach_session(&mut self, session: SessionHandle) {
        self.session = Some(session);
    }

    /// Queue a message in the session; it is shown on the next rendered page.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.add_message_to(message, true);
    }

    /// Show a message on the page rendered for this request.
    pub fn add_message_now(&mut self, message: impl Into<String>) {
        self.add_message_to(message, false);
    }

    /// Without an attached session, session messages fall back to this render.
    pub fn add_message_to(&mut self, message: impl Into<String>, to_session: bool) {
        match (&self.session, to_session) {
            (Some(session), true) => session.push_message(message),
            _ => self.locals.messages.push(message.into()),
        }
    }

    /// Send `obj` as JSON, or as JSONP when `jsonp_callback` is non-empty.
    pub fn send_json<T: Serialize + ?Sized>(
        &mut self,
        obj: &T,
        jsonp_callback: Option<&str>,
    ) -> Result<()> {
        let json = serde_json::to_string(obj)?;
        match jsonp_callback.filter(|cb| !cb.is_empty()) {
            Some(callback) => {
                self.set_header(header::CONTENT_TYPE.as_str(), CONTENT_TYPE_JAVASCRIPT)?;
                self.end(format!("{}({});", callback, json));
            }
            None => {
                self.set_header(header::CONTENT_TYPE.as_str(), CONTENT_TYPE_JSON)?;
                self.end(json);
            }
        }
        Ok(())
    }

    /// Send `obj` as JSON with an HTML content type, for targets of form posts
    /// (url-encoded or multipart) that expect an HTML response.
    pub fn send_json_post_response<T: Serialize + ?Sized>(&mut self, obj: &T) -> Result<()> {
        let json = serde_json::to_string(obj)?;
        self.set_header(header::CONTENT_TYPE.as_str(), CONTENT_TYPE_HTML)?;
        self.end(json);
        Ok(())
    }

    /// Set caching headers. `expires_min == 0` disables caching entirely and
    /// varies on Cookie.
    pub fn set_cache_headers(&mut self, expires_min: u64, vary: Option<&str>) -> Result<()> {
        let vary = vary.unwrap_or_default();
        if expires_min == 0 {
            self.set_header(PRAGMA, "no-cache")?;
            self.set_header(header::CACHE_CONTROL.as_str(), NO_CACHE_CONTROL)?;
            let vary = if vary.is_empty() {
                "Cookie".to_string()
            } else {
                format!("Cookie, {}", vary)
            };
            return self.set_header(header::VARY.as_str(), &vary);
        }

        let expires = expires_min.saturating_mul(60);
        self.set_header(PRAGMA, "public")?;
        self.set_header(
            header::CACHE_CONTROL.as_str(),
            &format!("public, max-age={}", expires),
        )?;
        if !vary.is_empty() {
            self.set_header(header::VARY.as_str(), vary)?;
        }
        Ok(())
    }
}

impl IntoResponse for OutgoingResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body.unwrap_or_default()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::render::FnEngine;
    use crate::session::MemorySession;
    use serde_json::json;

    fn response() -> OutgoingResponse {
        let app = App::new(
            AppConfig::default(),
            Arc::new(FnEngine::new(|_: &str, _: &Value| Ok(String::new()))),
        );
        OutgoingResponse::new(Arc::new(app))
    }

    #[test]
    fn test_send_json() {
        let mut res = response();
        res.send_json(&json!({"ok": true}), None).unwrap();
        assert_eq!(res.header("content-type"), Some(CONTENT_TYPE_JSON));
        assert_eq!(res.body(), Some(r#"{"ok":true}"#));
    }

    #[test]
    fn test_send_jsonp() {
        let mut res = response();
        res.send_json(&json!([1, 2]), Some("cb")).unwrap();
        assert_eq!(res.header("content-type"), Some(CONTENT_TYPE_JAVASCRIPT));
        assert_eq!(res.body(), Some("cb([1,2]);"));
    }

    #[test]
    fn test_empty_callback_sends_plain_json() {
        let mut res = response();
        res.send_json(&json!(1), Some("")).unwrap();
        assert_eq!(res.header("content-type"), Some(CONTENT_TYPE_JSON));
        assert_eq!(res.body(), Some("1"));
    }

    #[test]
    fn test_send_json_post_response() {
        let mut res = response();
        res.send_json_post_response(&json!({"error": false})).unwrap();
        assert_eq!(res.header("content-type"), Some(CONTENT_TYPE_HTML));
        assert_eq!(res.body(), Some(r#"{"error":false}"#));
    }

    #[test]
    fn test_no_cache_headers() {
        let mut res = response();
        res.set_cache_headers(0, None).unwrap();
        assert_eq!(res.header("pragma"), Some("no-cache"));
        assert!(res.header("cache-control").unwrap().contains("no-cache"));
        assert!(res.header("cache-control").unwrap().contains("no-store"));
        assert_eq!(res.header("vary"), Some("Cookie"));

        let mut res = response();
        res.set_cache_headers(0, Some("Accept-Language")).unwrap();
        assert_eq!(res.header("vary"), Some("Cookie, Accept-Language"));
    }

    #[test]
    fn test_public_cache_headers() {
        let mut res = response();
        res.set_cache_headers(5, None).unwrap();
        assert_eq!(res.header("pragma"), Some("public"));
        assert_eq!(res.header("cache-control"), Some("public, max-age=300"));
        assert!(res.header("vary").is_none());

        let mut res = response();
        res.set_cache_headers(1, Some("Accept-Encoding")).unwrap();
        assert_eq!(res.header("vary"), Some("Accept-Encoding"));
    }

    #[test]
    fn test_invalid_vary_rejected() {
        let mut res = response();
        let err = res.set_cache_headers(5, Some("bad\nvalue")).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { .. }));
    }

    #[test]
    fn test_add_message_routes() {
        let session = SessionHandle::new(MemorySession::new());
        let mut res = response();
        res.attach_session(session.clone());

        res.add_message("later");
        res.add_message_now("now");

        assert_eq!(res.locals.messages, vec!["now".to_string()]);
        assert_eq!(session.take_messages(), Some(vec!["later".to_string()]));
    }

    #[test]
    fn test_get_title() {
        let locals = PageLocals {
            title: "My Site".into(),
            ..Default::default()
        };
        assert_eq!(locals.get_title("Login"), "Login - My Site");
    }

    #[test]
    fn test_locals_serialization() {
        let locals = PageLocals {
            title: "T".into(),
            app_data: AppData {
                lang: "en".into(),
                username: None,
                level: None,
            },
            lang_dir: "ltr".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&locals).unwrap();
        assert_eq!(value["appData"], json!({"lang": "en"}));
        assert_eq!(value["langDir"], "ltr");
        assert_eq!(value["messages"], json!([]));
    }
}
