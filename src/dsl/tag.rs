//! Field metadata in the `key:"value"` grammar.
//!
//! Tags are whitespace-separated tokens such as
//! `name:"user_id" identity:"true"`. Tokens that do not match the grammar
//! and unrecognised keys are kept but never interpreted.

use regex::Regex;
use std::sync::LazyLock;

static TAG_PAIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(\w+):"(.+)""#).unwrap());

/// Physical column name.
pub const KEY_NAME: &str = "name";
/// `"true"` marks an identity column.
pub const KEY_IDENTITY: &str = "identity";
/// Physical table name, on the table-name marker field.
pub const KEY_TABLE_NAME: &str = "tableName";

/// Parsed field tag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    pairs: Vec<(String, String)>,
}

impl Tag {
    pub fn parse(text: &str) -> Self {
        let pairs = text
            .split_whitespace()
            .filter_map(|token| TAG_PAIR.captures(token))
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect();
        Self { pairs }
    }

    /// Value of the first occurrence of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn name(&self) -> Option<&str> {
        self.get(KEY_NAME)
    }

    pub fn is_identity(&self) -> bool {
        self.get(KEY_IDENTITY) == Some("true")
    }

    pub fn table_name(&self) -> Option<&str> {
        self.get(KEY_TABLE_NAME)
    }
}
