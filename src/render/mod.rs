//! Template rendering helpers.
//!
//! # Context merging
//! ```text
//! app locals  →  response locals (title, appData, messages, ...)  →  options
//! ```
//! Later sources override earlier keys. `render_view` skips the response locals.

pub mod engine;
pub mod message;

pub use engine::{FnEngine, TemplateEngine};
pub use message::{escape_html, get_message, MessageOptions};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::app::App;
use crate::error::Result;
use crate::http::OutgoingResponse;

/// Render a template in the context of the current response.
pub async fn render<O: Serialize + ?Sized>(
    res: &OutgoingResponse,
    template: &str,
    options: &O,
) -> Result<String> {
    let app = res.app();
    let locals = serde_json::to_value(&res.locals)?;
    let context = merge_context(&app.locals(), Some(locals), serde_json::to_value(options)?);
    app.engine().render(template, &context).await
}

/// Render a template without a request (no per-request locals).
pub async fn render_view<O: Serialize + ?Sized>(
    app: &App,
    template: &str,
    options: &O,
) -> Result<String> {
    let context = merge_context(&app.locals(), None, serde_json::to_value(options)?);
    app.engine().render(template, &context).await
}

fn merge_context(app_locals: &Map<String, Value>, locals: Option<Value>, options: Value) -> Value {
    let mut context = app_locals.clone();
    for source in locals.into_iter().chain(std::iter::once(options)) {
        if let Value::Object(map) = source {
            context.extend(map);
        }
    }
    Value::Object(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_order() {
        let mut app_locals = Map::new();
        app_locals.insert("a".into(), json!("app"));
        app_locals.insert("b".into(), json!("app"));
        app_locals.insert("c".into(), json!("app"));

        let merged = merge_context(
            &app_locals,
            Some(json!({"b": "res", "c": "res"})),
            json!({"c": "opt"}),
        );
        assert_eq!(merged, json!({"a": "app", "b": "res", "c": "opt"}));
    }

    #[test]
    fn test_non_object_options_ignored() {
        let merged = merge_context(&Map::new(), None, Value::Null);
        assert_eq!(merged, json!({}));
    }
}
