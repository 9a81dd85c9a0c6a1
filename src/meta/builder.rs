//! Meta tag derivation for the current page.
//!
//! Currently emits a single `canonical` link when the page was reached with the
//! `ra` pass-through parameter, so search engines consolidate on the URL without it.

use std::collections::BTreeMap;

use crate::http::QueryParams;
use crate::meta::tag::MetaTag;
use crate::responder::Responder;

/// Query parameter stripped from canonical URLs.
pub const PASS_THROUGH_PARAM: &str = "ra";

pub struct Meta {
    path: String,
    query: QueryParams,
    origin: String,
    url: String,
}

impl Meta {
    pub fn new(responder: &Responder) -> Self {
        let req = responder.req();
        Self::from_parts(
            req.path.clone(),
            req.query.clone(),
            responder.get_origin(),
            responder.get_url(),
        )
    }

    pub fn from_parts(
        path: impl Into<String>,
        query: QueryParams,
        origin: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            query,
            origin: origin.into(),
            url: url.into(),
        }
    }

    /// Full URL of the page the tags are generated for.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn get_meta_tags(&mut self) -> Vec<MetaTag> {
        let mut tags = Vec::new();
        let has_pass_through = self
            .query
            .get(PASS_THROUGH_PARAM)
            .is_some_and(|value| !value.is_empty());

        if has_pass_through {
            self.query.remove(PASS_THROUGH_PARAM);
            let href = format!("{}{}{}", self.origin, self.path, self.get_query_str());
            let mut props = BTreeMap::new();
            props.insert("href".to_string(), href);
            tags.push(MetaTag::with_properties("canonical", props));
        }
        tags
    }

    /// Serialize the remaining parameters as `?k=v&k=v`.
    ///
    /// Values are concatenated verbatim (no percent-encoding); deployed canonical
    /// URLs depend on this exact format.
    pub fn get_query_str(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.query.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(key);
            out.push('=');
            out.push_str(value);
        }
        out
    }
}
