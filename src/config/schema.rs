//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults so a minimal (or empty) file is valid.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Execution mode in which origins are rendered without a port.
pub const PRODUCTION_ENV: &str = "production";

/// Root configuration for the application.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Execution mode and public port.
    pub app: AppSection,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Template names and client view manifest settings.
    pub views: ViewsConfig,

    /// Client IP resolution.
    pub client_ip: ClientIpConfig,

    /// Fallback translations used when no translator is attached to a request.
    pub translations: TranslationsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Application section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppSection {
    /// Execution mode ("development", "production", ...).
    pub env: String,

    /// Port the application is reachable on (shown in origins outside production).
    pub port: u16,

    /// Language used when a request carries no Accept-Language header.
    pub default_language: String,
}

impl AppSection {
    pub fn is_production(&self) -> bool {
        self.env == PRODUCTION_ENV
    }
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            env: "development".to_string(),
            port: 3000,
            default_language: "en".to_string(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Template names and the client view manifest.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewsConfig {
    /// Template rendering a single meta tag from `{tag, props}`.
    pub meta_template: String,

    /// Template rendering status messages.
    pub message_template: String,

    /// Directory scanned for client-side view scripts at startup.
    pub client_views_dir: Option<String>,

    /// File extension (without dot) of client-side view scripts.
    pub client_view_extension: String,
}

impl Default for ViewsConfig {
    fn default() -> Self {
        Self {
            meta_template: "meta".to_string(),
            message_template: "sub/misc".to_string(),
            client_views_dir: None,
            client_view_extension: "js".to_string(),
        }
    }
}

/// Client IP resolution settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientIpConfig {
    /// Header set by a CDN/platform with the original client IP (e.g. "cf-connecting-ip").
    /// Only configure this when the platform strips client-supplied values.
    pub platform_header: Option<String>,

    /// Peers whose X-Forwarded-For / X-Real-IP / X-Forwarded-Proto headers are trusted.
    pub trusted_proxies: Vec<String>,
}

/// Key → text map used by the fallback translator.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TranslationsConfig(pub HashMap<String, String>);

impl Default for TranslationsConfig {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert("siteName".to_string(), "Website".to_string());
        map.insert("forbidden".to_string(), "Forbidden".to_string());
        Self(map)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.port, 3000);
        assert_eq!(config.views.meta_template, "meta");
        assert_eq!(config.views.message_template, "sub/misc");
        assert!(config.client_ip.trusted_proxies.is_empty());
        assert_eq!(config.translations.0.get("forbidden").map(String::as_str), Some("Forbidden"));
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [app]
            env = "production"

            [client_ip]
            platform_header = "cf-connecting-ip"
            trusted_proxies = ["10.0.0.1"]

            [translations]
            siteName = "Example"
            "#,
        )
        .unwrap();

        assert!(config.app.is_production());
        assert_eq!(config.app.port, 3000);
        assert_eq!(config.client_ip.platform_header.as_deref(), Some("cf-connecting-ip"));
        assert_eq!(config.translations.0.get("siteName").map(String::as_str), Some("Example"));
        // A user-supplied table replaces the defaults entirely.
        assert!(config.translations.0.get("forbidden").is_none());
    }
}
