//! Accept-Language parsing.

use axum::http::HeaderMap;

use crate::http::headers::ACCEPT_LANGUAGE;

fn accept_language(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|h| h.to_str().ok())
        .filter(|value| !value.is_empty())
}

/// Two-letter lowercase language code of the first Accept-Language entry.
pub fn get_language(headers: &HeaderMap, default: &str) -> String {
    match accept_language(headers) {
        Some(value) => value.chars().take(2).collect::<String>().to_lowercase(),
        None => default.to_string(),
    }
}

/// First full locale tag of the Accept-Language header (e.g. `en-US`).
pub fn get_locale(headers: &HeaderMap, default: &str) -> String {
    match accept_language(headers) {
        Some(value) => value
            .split(';')
            .next()
            .and_then(|first| first.split(',').next())
            .unwrap_or_default()
            .to_string(),
        None => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_language() {
        assert_eq!(get_language(&headers("DE-de,en;q=0.8"), "en"), "de");
        assert_eq!(get_language(&HeaderMap::new(), "en"), "en");
        assert_eq!(get_language(&headers(""), "fr"), "fr");
    }

    #[test]
    fn test_locale() {
        assert_eq!(get_locale(&headers("en-US,en;q=0.9,de;q=0.8"), "x"), "en-US");
        assert_eq!(get_locale(&headers("de;q=0.9"), "x"), "de");
        assert_eq!(get_locale(&HeaderMap::new(), "en-GB"), "en-GB");
    }
}
