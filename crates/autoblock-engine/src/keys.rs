use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key name to key code table used when normalizing triggers.
///
/// The names in this table are the reserved trigger words: a trigger of
/// `"space"` becomes a key-code test, any other string is compared against
/// the typed text. Hosts with different key-code conventions can override
/// entries or add new names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCodes(BTreeMap<String, u32>);

impl KeyCodes {
    pub const ENTER: u32 = 13;
    pub const SPACE: u32 = 32;
    pub const TAB: u32 = 9;

    /// An empty table: every trigger string is treated as literal text.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Add or replace the code for `name`.
    pub fn with(mut self, name: impl Into<String>, code: u32) -> Self {
        self.0.insert(name.into(), code);
        self
    }

    pub fn code(&self, name: &str) -> Option<u32> {
        self.0.get(name).copied()
    }

    /// Returns the reserved name `text` ends with, if any.
    pub fn name_suffix_of(&self, text: &str) -> Option<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|name| !name.is_empty() && text.ends_with(*name))
            .max_by_key(|name| name.len())
    }
}

impl Default for KeyCodes {
    fn default() -> Self {
        Self::empty()
            .with("enter", Self::ENTER)
            .with("space", Self::SPACE)
            .with("tab", Self::TAB)
    }
}
