use std::collections::BTreeMap;

use serde::Serialize;

/// A single `<meta>`/`<link>` style tag: a tag name plus its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    tag_name: String,
    properties: BTreeMap<String, String>,
}

impl MetaTag {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self::with_properties(tag_name, BTreeMap::new())
    }

    pub fn with_properties(
        tag_name: impl Into<String>,
        properties: BTreeMap<String, String>,
    ) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties,
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}
