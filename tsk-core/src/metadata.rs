//! Metadata records produced by front-matter blocks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl MetaValue {
    /// Parse a raw front-matter value.
    ///
    /// Comma-separated values with more than one token become a list; a single
    /// token becomes an integer when it parses as one, a string otherwise.
    pub fn parse(raw: &str) -> Self {
        let tokens: Vec<&str> = raw.trim().split(',').collect();
        if tokens.len() > 1 {
            return MetaValue::List(tokens.iter().map(|t| t.trim().to_string()).collect());
        }

        let scalar = tokens[0].trim();
        match scalar.parse::<i64>() {
            Ok(n) => MetaValue::Int(n),
            Err(_) => MetaValue::Str(scalar.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            MetaValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Int(n) => write!(f, "{}", n),
            MetaValue::Str(s) => f.write_str(s),
            MetaValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Str(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Str(value)
    }
}

/// Key/value metadata for one document
pub type Metadata = BTreeMap<String, MetaValue>;

/// Split a front-matter line into its key and parsed value.
///
/// Returns `None` when the line has no colon.
pub fn parse_meta_line(line: &str) -> Option<(String, MetaValue)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim().to_string(), MetaValue::parse(value)))
}
