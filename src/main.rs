//! Demo site for page-responder.
//!
//! ```text
//! GET  /            home page (flash messages, canonical meta tag for ?ra=, no-cache)
//! GET  /api/status  JSON, or JSONP with ?callback=
//! POST /contact     form-post JSON reply, queues a flash message
//! GET  /admin       requires authorization level 0 (send `x-demo-user: name:level`)
//! ```
//!
//! Templates, sessions and users are stand-ins; real applications bring their own.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::{self, Next as MiddlewareNext};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use clap::Parser;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use page_responder::config::{load_config, AppConfig};
use page_responder::http::AuthUser;
use page_responder::observability::init_logging;
use page_responder::render::{escape_html, get_message, FnEngine, MessageOptions};
use page_responder::session::{MemorySession, SessionHandle};
use page_responder::timezone::server_timezone_str;
use page_responder::{App, Error, HttpServer, Responder};

#[derive(Parser, Debug)]
#[command(name = "page-responder", about = "Demo site for page-responder")]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    init_logging(&config.observability)?;
    tracing::info!(
        env = %config.app.env,
        bind_address = %config.listener.bind_address,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let app = Arc::new(App::new(config, Arc::new(FnEngine::new(demo_templates))));

    let session = SessionHandle::new(MemorySession::new());
    let routes = Router::new()
        .route("/", get(home))
        .route("/api/status", get(status))
        .route("/contact", post(contact))
        .route("/admin", get(admin))
        .layer(middleware::from_fn_with_state(session, demo_context));

    HttpServer::new(app, routes).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Attach the demo session (one for the whole process) and a demo user.
async fn demo_context(
    State(session): State<SessionHandle>,
    mut req: Request<Body>,
    next: MiddlewareNext,
) -> Response {
    let user = req
        .headers()
        .get("x-demo-user")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split_once(':'))
        .and_then(|(name, level)| Some(AuthUser::new(name, level.parse().ok()?)));

    req.extensions_mut().insert(session);
    if let Some(user) = user {
        req.extensions_mut().insert(user);
    }
    next.run(req).await
}

async fn home(responder: Responder) -> Response {
    let mut responder = responder.with_name("HomePage");
    let title = responder.res().locals.get_title("Home");
    let options = json!({
        "title": title,
        "timezone": server_timezone_str(),
        "clientIp": responder.get_client_ip(),
    });

    let result = match responder.res_mut().set_cache_headers(0, None) {
        Ok(()) => responder.render("home", &options).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        responder.next().run(e);
    }
    responder.into_response()
}

async fn status(mut responder: Responder) -> Response {
    let callback = responder.req().query.get("callback").map(String::from);
    let body = json!({ "status": "ok", "clientIps": responder.get_client_ips() });

    let result = responder
        .res_mut()
        .set_cache_headers(1, Some("Accept-Encoding"))
        .and_then(|()| responder.res_mut().send_json(&body, callback.as_deref()));
    if let Err(e) = result {
        responder.next().run(e);
    }
    responder.into_response()
}

async fn contact(mut responder: Responder) -> Response {
    let options = MessageOptions {
        msg_class: Some("success".to_string()),
        ..Default::default()
    };
    let result = match get_message(responder.res(), "Thanks, your message was sent.", &options).await {
        Ok(html) => {
            responder.res_mut().add_message(html.clone());
            responder
                .res_mut()
                .send_json_post_response(&json!({ "error": false, "html": html }))
        }
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        responder.next().run(e);
    }
    responder.into_response()
}

async fn admin(responder: Responder) -> Response {
    let mut responder = responder.with_name("AdminPage");
    if !responder.can_access(0) {
        return responder.into_response();
    }
    let title = responder.res().locals.get_title("Admin");
    if let Err(e) = responder.render("home", &json!({ "title": title })).await {
        responder.next().run(e);
    }
    responder.into_response()
}

fn demo_templates(name: &str, ctx: &Value) -> Result<String, Error> {
    let text = |key: &str| escape_html(ctx[key].as_str().unwrap_or_default());
    match name {
        "meta" => {
            let props = ctx["props"].as_object().cloned().unwrap_or_default();
            let attrs: String = props
                .iter()
                .map(|(k, v)| format!(" {}=\"{}\"", k, escape_html(v.as_str().unwrap_or_default())))
                .collect();
            Ok(format!("<link rel=\"{}\"{}>", text("tag"), attrs))
        }
        "sub/misc" => Ok(format!(
            "<div class=\"alert alert-{}\">{}</div>",
            text("msgClass"),
            ctx["text"].as_str().unwrap_or_default()
        )),
        "home" => {
            let messages: String = ctx["messages"]
                .as_array()
                .map(|msgs| {
                    msgs.iter()
                        .filter_map(Value::as_str)
                        .map(|m| format!("<div class=\"message\">{}</div>", m))
                        .collect()
                })
                .unwrap_or_default();
            Ok(format!(
                "<!DOCTYPE html><html lang=\"{}\" dir=\"{}\"><head><title>{}</title>{}</head>\
                 <body>{}<p>Server time zone: {}</p><p>Your IP: {}</p></body></html>",
                escape_html(ctx["appData"]["lang"].as_str().unwrap_or_default()),
                text("langDir"),
                text("title"),
                ctx["metaHtml"].as_str().unwrap_or_default(),
                messages,
                text("timezone"),
                text("clientIp"),
            ))
        }
        other => Err(Error::TemplateNotFound(other.to_string())),
    }
}
