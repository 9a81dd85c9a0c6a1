//! Per-request response setup.

use serde_json::{Map, Value};

use crate::http::request::IncomingRequest;
use crate::http::response::{AppData, OutgoingResponse};

/// Translation key of the default page title.
pub const SITE_NAME_KEY: &str = "siteName";

/// Populate the default template locals and attach the session for `add_message`.
///
/// Also runs for error pages, so it works on any half-initialized request.
pub fn extend_response(req: &mut IncomingRequest, res: &mut OutgoingResponse) {
    res.attach_session(req.session.clone());

    res.locals.title = req.t(SITE_NAME_KEY);

    if let Some(user) = req.user.as_mut() {
        if user.data.is_null() {
            user.data = Value::Object(Map::new());
        }
    }
    res.locals.user = req.user.clone();

    res.locals.app_data = AppData {
        lang: language_code(&req.language).to_string(),
        username: req.user.as_ref().map(|u| u.username.clone()),
        level: req.user.as_ref().map(|u| u.level),
    };
    // TODO: derive from the language once rtl translations exist.
    res.locals.lang_dir = "ltr".to_string();
    res.locals.messages = Vec::new();
}

/// First two characters of a locale tag.
fn language_code(language: &str) -> &str {
    let end = language
        .char_indices()
        .nth(2)
        .map_or(language.len(), |(i, _)| i);
    &language[..end]
}
