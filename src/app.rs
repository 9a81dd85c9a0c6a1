//! Application handle shared by every request.
//!
//! Created once at startup and passed around as `Arc<App>` (axum state). Holds the
//! validated configuration, the template engine and app-level template locals.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::{Map, Value};

use crate::config::AppConfig;
use crate::render::TemplateEngine;

pub struct App {
    config: Arc<AppConfig>,
    engine: Arc<dyn TemplateEngine>,
    locals: ArcSwap<Map<String, Value>>,
}

impl App {
    pub fn new(config: AppConfig, engine: Arc<dyn TemplateEngine>) -> Self {
        Self {
            config: Arc::new(config),
            engine,
            locals: ArcSwap::from_pointee(Map::new()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn engine(&self) -> &dyn TemplateEngine {
        self.engine.as_ref()
    }

    /// Snapshot of the app-level locals visible to every template.
    pub fn locals(&self) -> Arc<Map<String, Value>> {
        self.locals.load_full()
    }

    pub fn set_local(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        self.locals.rcu(|current| {
            let mut next = Map::clone(current);
            next.insert(key.clone(), value.clone());
            next
        });
    }

    /// `":<port>"` outside production, empty in production where a reverse proxy
    /// terminates the port.
    pub fn port_suffix(&self) -> String {
        if self.config.app.is_production() {
            String::new()
        } else {
            format!(":{}", self.config.app.port)
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("env", &self.config.app.env)
            .field("port", &self.config.app.port)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FnEngine;
    use serde_json::json;

    fn app(env: &str) -> App {
        let mut config = AppConfig::default();
        config.app.env = env.to_string();
        config.app.port = 8080;
        App::new(config, Arc::new(FnEngine::new(|_: &str, _: &Value| Ok(String::new()))))
    }

    #[test]
    fn test_port_suffix() {
        assert_eq!(app("development").port_suffix(), ":8080");
        assert_eq!(app("production").port_suffix(), "");
    }

    #[test]
    fn test_set_local_keeps_existing() {
        let app = app("development");
        app.set_local("a", json!(1));
        app.set_local("b", json!("two"));
        let locals = app.locals();
        assert_eq!(locals.get("a"), Some(&json!(1)));
        assert_eq!(locals.get("b"), Some(&json!("two")));
    }
}
