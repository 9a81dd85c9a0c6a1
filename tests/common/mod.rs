//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::extract::ConnectInfo;
use axum::http::{Request, Response};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use page_responder::config::AppConfig;
use page_responder::render::TemplateEngine;
use page_responder::{App, Error, HttpServer, Result};

/// Template engine that records every render and prints `name:<json context>`.
/// Templates listed in `failing` return a render error.
#[derive(Default)]
pub struct RecordingEngine {
    pub calls: Mutex<Vec<(String, Value)>>,
    pub failing: Vec<&'static str>,
}

impl RecordingEngine {
    pub fn failing(templates: &[&'static str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: templates.to_vec(),
        }
    }

    pub fn calls_for(&self, template: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| name == template)
            .map(|(_, ctx)| ctx.clone())
            .collect()
    }
}

#[async_trait]
impl TemplateEngine for RecordingEngine {
    async fn render(&self, template: &str, context: &Value) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((template.to_string(), context.clone()));
        if self.failing.contains(&template) {
            return Err(Error::Render(format!("{} is broken", template)));
        }
        if template == "meta" {
            return Ok(format!(
                "<link rel=\"{}\" href=\"{}\">",
                context["tag"].as_str().unwrap_or_default(),
                context["props"]["href"].as_str().unwrap_or_default()
            ));
        }
        Ok(format!("{}:{}", template, context))
    }
}

pub fn test_app(config: AppConfig, engine: Arc<RecordingEngine>) -> Arc<App> {
    Arc::new(App::new(config, engine))
}

pub fn router(app: Arc<App>, routes: Router<Arc<App>>) -> Router {
    HttpServer::new(app, routes).router()
}

/// GET `uri` from `peer` with extra headers.
pub fn get(uri: &str, peer: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(uri).header("host", "example.com");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let mut req = builder.body(Body::empty()).unwrap();
    let peer: SocketAddr = peer.parse().unwrap();
    req.extensions_mut().insert(ConnectInfo(peer));
    req
}

pub async fn send(router: &Router, req: Request<Body>) -> (Response<Body>, String) {
    let response = router.clone().oneshot(req).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    (
        Response::from_parts(parts, Body::empty()),
        String::from_utf8(bytes.to_vec()).unwrap(),
    )
}
