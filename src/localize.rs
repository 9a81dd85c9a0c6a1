//! Translation hook.
//!
//! Translation itself is provided by the host; requests carry a [`Translator`] in
//! their extensions. Without one, the `[translations]` table from the config is used.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub trait Localize: Send + Sync {
    /// Translate `key`. Unknown keys are returned unchanged.
    fn translate(&self, key: &str) -> String;
}

#[derive(Clone)]
pub struct Translator(Arc<dyn Localize>);

impl Translator {
    pub fn new(localize: impl Localize + 'static) -> Self {
        Self(Arc::new(localize))
    }

    pub fn t(&self, key: &str) -> String {
        self.0.translate(key)
    }
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Translator")
    }
}

/// Fixed key → text table.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslations(HashMap<String, String>);

impl StaticTranslations {
    pub fn new(table: HashMap<String, String>) -> Self {
        Self(table)
    }
}

impl Localize for StaticTranslations {
    fn translate(&self, key: &str) -> String {
        self.0.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}
