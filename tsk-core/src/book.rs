//! Registry of processed documents, keyed by output file name.

use crate::metadata::Metadata;
use serde::Serialize;
use std::collections::BTreeMap;

/// Metadata of every processed document
///
/// Insert-only: a record can't be replaced once registered.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Book {
    pages: BTreeMap<String, Metadata>,
}

impl Book {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document; returns the metadata back if `output_file` is taken
    pub fn insert(&mut self, output_file: String, metadata: Metadata) -> Result<(), Metadata> {
        if self.pages.contains_key(&output_file) {
            return Err(metadata);
        }
        self.pages.insert(output_file, metadata);
        Ok(())
    }

    pub fn get(&self, output_file: &str) -> Option<&Metadata> {
        self.pages.get(output_file)
    }

    pub fn contains(&self, output_file: &str) -> bool {
        self.pages.contains_key(output_file)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages ordered by output file name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Metadata)> {
        self.pages.iter().map(|(k, v)| (k.as_str(), v))
    }
}
