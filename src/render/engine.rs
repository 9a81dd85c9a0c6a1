//! Template engine abstraction.
//!
//! The engine itself is supplied by the host application; this crate only merges
//! render contexts and awaits the result.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

#[async_trait]
pub trait TemplateEngine: Send + Sync {
    /// Render `template` with `context` (a JSON object) into HTML.
    async fn render(&self, template: &str, context: &Value) -> Result<String>;
}

/// Adapts a synchronous closure into a [`TemplateEngine`].
pub struct FnEngine<F>(F);

impl<F> FnEngine<F>
where
    F: Fn(&str, &Value) -> Result<String> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> TemplateEngine for FnEngine<F>
where
    F: Fn(&str, &Value) -> Result<String> + Send + Sync,
{
    async fn render(&self, template: &str, context: &Value) -> Result<String> {
        (self.0)(template, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_engine() {
        let engine = FnEngine::new(|name: &str, ctx: &Value| match name {
            "hello" => Ok(format!("hello {}", ctx["who"].as_str().unwrap_or("?"))),
            other => Err(Error::TemplateNotFound(other.to_string())),
        });

        assert_eq!(
            engine.render("hello", &json!({"who": "world"})).await.unwrap(),
            "hello world"
        );
        assert!(matches!(
            engine.render("missing", &json!({})).await,
            Err(Error::TemplateNotFound(_))
        ));
    }
}
