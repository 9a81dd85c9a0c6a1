//! Per-request responder.
//!
//! # Responsibilities
//! - Derive origin, protocol, hostname, port and URL of the current request
//! - Resolve client IPs (see `client_ip.rs`)
//! - Render pages with queued flash messages and meta tags
//! - Edit form value lists (see `submit.rs`)
//! - Gate pages by authorization level (see `access.rs`)
//!
//! # Lifecycle
//! ```text
//! axum handler
//!     → Responder::from_request_parts (IncomingRequest + OutgoingResponse + extend_response)
//!     → page logic (can_access, render, send_json, ...)
//!     → IntoResponse (deferred error from `next`, else the built response)
//! ```

pub mod access;
pub mod client_ip;
pub mod submit;

pub use access::{DeferredError, Next};
pub use submit::{read_submit_value, select_value, update_submit_value, SubmitValue};

use std::borrow::Cow;
use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use axum::response::{IntoResponse, Response};
use futures_util::future::try_join_all;
use serde::Serialize;
use serde_json::{json, Value};

use crate::app::App;
use crate::error::{Error, Result};
use crate::http::headers::CONTENT_TYPE_HTML;
use crate::http::{extend_response, IncomingRequest, OutgoingResponse};
use crate::meta::Meta;
use crate::render;

/// Template local holding the rendered meta tags.
pub const META_HTML_LOCAL: &str = "metaHtml";

pub struct Responder {
    app: Arc<App>,
    req: IncomingRequest,
    res: OutgoingResponse,
    next: Next,
    deferred: Option<DeferredError>,
    name: Cow<'static, str>,
}

impl Responder {
    pub fn new(app: Arc<App>, req: IncomingRequest, res: OutgoingResponse, next: Next) -> Self {
        Self {
            app,
            req,
            res,
            next,
            deferred: None,
            name: Cow::Borrowed("Responder"),
        }
    }

    /// Build a responder for axum request parts: extends the response and parks
    /// errors passed to `next` until the responder is turned into a response.
    pub fn from_parts(parts: &Parts, app: Arc<App>) -> Self {
        let mut req = IncomingRequest::from_parts(parts, &app);
        let mut res = OutgoingResponse::new(app.clone());
        extend_response(&mut req, &mut res);

        let (next, deferred) = Next::deferred();
        let mut responder = Self::new(app, req, res, next);
        responder.deferred = Some(deferred);
        responder
    }

    /// Name used in diagnostics, usually the page type wrapping this responder.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn app(&self) -> &Arc<App> {
        &self.app
    }

    pub fn req(&self) -> &IncomingRequest {
        &self.req
    }

    pub fn req_mut(&mut self) -> &mut IncomingRequest {
        &mut self.req
    }

    pub fn res(&self) -> &OutgoingResponse {
        &self.res
    }

    pub fn res_mut(&mut self) -> &mut OutgoingResponse {
        &mut self.res
    }

    pub fn next(&self) -> &Next {
        &self.next
    }

    pub fn get_origin(&self) -> String {
        format!(
            "{}://{}{}",
            self.req.protocol,
            self.req.hostname,
            self.app.port_suffix()
        )
    }

    /// Protocol with trailing colon, like a parsed URL's `protocol`.
    pub fn get_protocol(&self) -> String {
        format!("{}:", self.req.protocol)
    }

    pub fn get_hostname(&self) -> &str {
        &self.req.hostname
    }

    pub fn get_port(&self) -> String {
        self.app.port_suffix()
    }

    pub fn get_url(&self) -> String {
        format!("{}{}", self.get_origin(), self.req.original_url)
    }

    pub fn get_client_ips(&self) -> Vec<String> {
        client_ip::resolve_client_ips(&self.req)
    }

    pub fn get_client_ip(&self) -> Option<String> {
        self.get_client_ips().into_iter().next()
    }

    /// Render a page into the response body.
    ///
    /// Pages that show flash messages must render through here so messages queued
    /// by an earlier request are displayed.
    pub async fn render<O: Serialize + ?Sized>(&mut self, name: &str, options: &O) -> Result<()> {
        let html = self.render_to_string(name, options).await?;
        self.res
            .set_header(header::CONTENT_TYPE.as_str(), CONTENT_TYPE_HTML)?;
        self.res.end(html);
        Ok(())
    }

    /// Same as [`Responder::render`] but returns the HTML instead of sending it.
    pub async fn render_to_string<O: Serialize + ?Sized>(
        &mut self,
        name: &str,
        options: &O,
    ) -> Result<String> {
        self.flush_session_messages();
        let meta_html = self.get_meta_html().await;
        self.res
            .locals
            .extra
            .insert(META_HTML_LOCAL.to_string(), Value::String(meta_html));
        render::render(&self.res, name, options).await
    }

    /// Move messages queued in the session by a previous request into this render.
    ///
    /// Queued messages go in front of ones added during this request instead of
    /// replacing them, so `add_message_now` output is never lost.
    fn flush_session_messages(&mut self) {
        if let Some(mut queued) = self.req.session.take_messages() {
            queued.append(&mut self.res.locals.messages);
            self.res.locals.messages = queued;
        }
    }

    /// HTML of all meta tags for this page, joined by newlines.
    ///
    /// Best-effort: a failing tag render is logged and yields an empty string so the
    /// page still renders.
    pub async fn get_meta_html(&self) -> String {
        let tags = Meta::new(self).get_meta_tags();
        let template = self.app.config().views.meta_template.as_str();

        let renders = tags.iter().map(|tag| {
            let locals = json!({ "tag": tag.tag_name(), "props": tag.properties() });
            async move { render::render(&self.res, template, &locals).await }
        });

        match try_join_all(renders).await {
            Ok(html) => html.join("\n"),
            Err(e) => {
                tracing::warn!(responder = %self.name, error = %e, "Error getting meta html");
                String::new()
            }
        }
    }

    pub fn read_submit_value<'a>(
        &self,
        values: &'a [Arc<SubmitValue>],
        name: &str,
    ) -> Option<&'a str> {
        read_submit_value(values, name)
    }

    pub fn update_submit_value(&self, values: &mut [Arc<SubmitValue>], name: &str, value: &str) {
        update_submit_value(values, name, value)
    }

    pub fn select_value(&self, values: &mut [Arc<SubmitValue>], value: &str) -> bool {
        select_value(values, value)
    }

    /// Check the user's authorization level. On failure a 403 error is handed to
    /// `next` (once) and false is returned.
    pub fn can_access(&self, level: u32) -> bool {
        if access::has_access(&self.req, level) {
            return true;
        }
        tracing::debug!(
            responder = %self.name,
            path = %self.req.path,
            required_level = level,
            "Access denied"
        );
        self.next.run(Error::forbidden(self.req.t("forbidden")));
        false
    }
}

impl FromRequestParts<Arc<App>> for Responder {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<App>,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts, state.clone()))
    }
}

impl IntoResponse for Responder {
    fn into_response(self) -> Response {
        if let Some(err) = self.deferred.as_ref().and_then(DeferredError::take) {
            return err.into_response();
        }
        self.res.into_response()
    }
}
