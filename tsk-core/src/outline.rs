//! Outline (table of contents) builder.
//!
//! An outline document describes the site navigation either with heading
//! markers:
//!
//! ```text
//! # Chapter 1
//! ## Section 1.1
//! ```
//!
//! or with indentation (bullets optional):
//!
//! ```text
//! Chapter 1
//!     - Section 1.1
//! ```
//!
//! Each entry gets a slug, a hierarchy coordinate such as `[1, 2, 1, 0, 0]`
//! and a URL. Entries at or above `page_level` link to their own page when it
//! has been generated; deeper entries reuse the URL of their parent.

use crate::metadata::{MetaValue, Metadata};
use crate::preprocess::{absorb_meta_line, LineKind, LineModes};
use crate::slug::slugify;
use crate::storage::Storage;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Deepest supported nesting (levels 0 through 4)
pub const MAX_DEPTH: usize = 5;

/// Level of the synthetic root entry
pub const ROOT_LEVEL: i32 = -1;

/// Per-level counters, e.g. `[1, 2, 1, 0, 0]` for section 1.2.1
pub type Hierarchy = [u32; MAX_DEPTH];

#[derive(Error, Debug)]
pub enum OutlineError {
    #[error("Malformed TOC: {title:?} on line {line} is at level {level} but the level above it is missing")]
    MalformedHierarchy {
        line: usize,
        level: usize,
        title: String,
    },

    #[error("TOC entry on line {line} is at level {level}; at most {MAX_DEPTH} levels are supported")]
    DepthExceeded { line: usize, level: usize },

    #[error("Invalid TOC setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("No TOC entry at {0:?}")]
    IndexOutOfRange(Vec<usize>),

    #[error("{0} is not valid UTF-8")]
    Encoding(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source notation of an outline document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// Decided by the first entry line
    #[default]
    Auto,
    /// Depth is the number of leading `#` minus one
    Heading,
    /// Depth is the number of indent units
    Indent,
}

impl Notation {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Notation::Auto),
            "heading" => Some(Notation::Heading),
            "indent" => Some(Notation::Indent),
            _ => None,
        }
    }
}

/// Settings read from the outline's front matter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineSettings {
    pub indent_spacing: usize,
    pub bullet_characters: String,
    pub page_level: usize,
    pub notation: Notation,
}

impl Default for OutlineSettings {
    fn default() -> Self {
        Self {
            indent_spacing: 4,
            bullet_characters: "-*+".to_string(),
            page_level: 1,
            notation: Notation::Auto,
        }
    }
}

impl OutlineSettings {
    /// Apply a front-matter value; unknown keys are ignored
    pub fn apply(&mut self, key: &str, value: &MetaValue) -> Result<(), OutlineError> {
        let invalid = |reason: &str| OutlineError::InvalidSetting {
            key: key.to_string(),
            reason: reason.to_string(),
        };

        match key {
            "indent_spacing" => {
                self.indent_spacing = value
                    .as_int()
                    .and_then(|n| usize::try_from(n).ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| invalid("expected a positive integer"))?;
            }
            "page_level" => {
                self.page_level = value
                    .as_int()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| invalid("expected a non-negative integer"))?;
            }
            "bullet_characters" => {
                self.bullet_characters = match value {
                    MetaValue::Str(s) => s.clone(),
                    MetaValue::List(items) => items.concat(),
                    MetaValue::Int(_) => return Err(invalid("expected characters")),
                };
            }
            "notation" => {
                self.notation = value
                    .as_str()
                    .and_then(Notation::from_str)
                    .ok_or_else(|| invalid("expected auto, heading or indent"))?;
            }
            _ => tracing::debug!("Ignoring unknown TOC setting {}", key),
        }
        Ok(())
    }
}

/// Answers whether a page artifact exists for a slug
pub trait PageLookup {
    fn has_page(&self, slug: &str) -> bool;
}

impl<F> PageLookup for F
where
    F: Fn(&str) -> bool,
{
    fn has_page(&self, slug: &str) -> bool {
        self(slug)
    }
}

/// Looks for `<dir>/<slug>.html` through a [`Storage`]
pub struct PageDirectory<'a> {
    storage: &'a dyn Storage,
    dir: &'a Path,
}

impl<'a> PageDirectory<'a> {
    pub fn new(storage: &'a dyn Storage, dir: &'a Path) -> Self {
        Self { storage, dir }
    }
}

impl PageLookup for PageDirectory<'_> {
    fn has_page(&self, slug: &str) -> bool {
        self.storage.exists(&self.dir.join(page_file_name(slug)))
    }
}

fn page_file_name(slug: &str) -> String {
    format!("{}.html", slug)
}

/// A node of the outline tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub level: i32,
    pub title: String,
    pub slug: String,
    pub url: Option<String>,
    /// `url#slug` for entries that live inside an ancestor's page
    pub anchor: Option<String>,
    pub hierarchy: Hierarchy,
    children: Vec<usize>,
}

impl OutlineEntry {
    fn root() -> Self {
        Self {
            level: ROOT_LEVEL,
            title: String::new(),
            slug: String::new(),
            url: None,
            anchor: None,
            hierarchy: [0; MAX_DEPTH],
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.level == ROOT_LEVEL
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Dotted section number, e.g. "1.2.1"
    pub fn number(&self) -> String {
        let depth = usize::try_from(self.level + 1).unwrap_or(0);
        self.hierarchy[..depth]
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Parsed outline; entries are stored in document order with the root first
#[derive(Debug, Clone)]
pub struct OutlineTree {
    entries: Vec<OutlineEntry>,
    settings: OutlineSettings,
    meta: Metadata,
}

impl OutlineTree {
    pub fn root(&self) -> &OutlineEntry {
        &self.entries[0]
    }

    pub fn settings(&self) -> &OutlineSettings {
        &self.settings
    }

    pub fn page_level(&self) -> usize {
        self.settings.page_level
    }

    /// Raw front-matter values of the outline document
    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    /// Number of entries, not counting the root
    pub fn len(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in document order, root excluded
    pub fn iter(&self) -> impl Iterator<Item = &OutlineEntry> {
        self.entries[1..].iter()
    }

    pub fn children<'t>(&'t self, entry: &'t OutlineEntry) -> impl Iterator<Item = &'t OutlineEntry> {
        entry.children.iter().map(move |id| &self.entries[*id])
    }

    /// Walk child indices from the root; an empty path addresses the root
    ///
    /// ```
    /// let tree = tsk_core::outline::generate("# A\n## B\n", &|_: &str| false).unwrap();
    /// assert_eq!(tree.get(&[0, 0]).unwrap().title, "B");
    /// assert!(tree.get(&[1]).is_err());
    /// ```
    pub fn get(&self, path: &[usize]) -> Result<&OutlineEntry, OutlineError> {
        let mut current = self.root();
        for index in path {
            let id = current
                .children
                .get(*index)
                .ok_or_else(|| OutlineError::IndexOutOfRange(path.to_vec()))?;
            current = &self.entries[*id];
        }
        Ok(current)
    }
}

struct EntryView<'t> {
    tree: &'t OutlineTree,
    entry: &'t OutlineEntry,
}

struct ChildrenView<'t> {
    tree: &'t OutlineTree,
    ids: &'t [usize],
}

impl Serialize for EntryView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entry = self.entry;
        let mut state = serializer.serialize_struct("OutlineEntry", 8)?;
        state.serialize_field("level", &entry.level)?;
        state.serialize_field("title", &entry.title)?;
        state.serialize_field("slug", &entry.slug)?;
        state.serialize_field("url", &entry.url)?;
        state.serialize_field("anchor", &entry.anchor)?;
        state.serialize_field("hierarchy", &entry.hierarchy)?;
        state.serialize_field("number", &entry.number())?;
        state.serialize_field(
            "children",
            &ChildrenView {
                tree: self.tree,
                ids: &entry.children,
            },
        )?;
        state.end()
    }
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.ids.iter().map(|id| EntryView {
            tree: self.tree,
            entry: &self.tree.entries[*id],
        }))
    }
}

impl Serialize for OutlineTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OutlineTree", 3)?;
        state.serialize_field("page_level", &self.settings.page_level)?;
        state.serialize_field("meta", &self.meta)?;
        state.serialize_field(
            "children",
            &ChildrenView {
                tree: self,
                ids: &self.root().children,
            },
        )?;
        state.end()
    }
}

/// Parse an outline document into a tree
///
/// Fails without returning a partial tree when an entry skips a level.
pub fn generate(text: &str, pages: &dyn PageLookup) -> Result<OutlineTree, OutlineError> {
    let mut parser = OutlineParser::new(pages);
    let mut modes = LineModes::new();

    for (index, line) in text.lines().enumerate() {
        match modes.classify(line) {
            LineKind::Toggle | LineKind::Comment => {}
            LineKind::Meta(meta) => {
                if let Some(key) = absorb_meta_line(&mut parser.meta, meta) {
                    parser.settings.apply(&key, &parser.meta[&key])?;
                }
            }
            LineKind::Content(content) => parser.push_line(index + 1, content)?,
        }
    }

    tracing::debug!(
        "Generated TOC with {} entries (page level {})",
        parser.entries.len() - 1,
        parser.settings.page_level
    );

    Ok(OutlineTree {
        entries: parser.entries,
        settings: parser.settings,
        meta: parser.meta,
    })
}

/// Read an outline file and resolve URLs against the pages in `page_dir`
pub fn generate_file(
    storage: &dyn Storage,
    toc_file: &Path,
    page_dir: &Path,
) -> Result<OutlineTree, OutlineError> {
    let bytes = storage.read(toc_file)?;
    let text = String::from_utf8(bytes).map_err(|_| OutlineError::Encoding(toc_file.to_path_buf()))?;
    let pages = PageDirectory::new(storage, page_dir);
    generate(text.trim_start_matches('\u{feff}'), &pages)
}

struct OutlineParser<'p> {
    pages: &'p dyn PageLookup,
    settings: OutlineSettings,
    meta: Metadata,
    /// Resolved on the first entry line when the setting is `auto`
    notation: Option<Notation>,
    entries: Vec<OutlineEntry>,
    /// Most recent entry per level; slot 0 holds the root (level -1)
    parents: [Option<usize>; MAX_DEPTH + 1],
    hierarchy: Hierarchy,
}

impl<'p> OutlineParser<'p> {
    fn new(pages: &'p dyn PageLookup) -> Self {
        let mut parents = [None; MAX_DEPTH + 1];
        parents[0] = Some(0);
        Self {
            pages,
            settings: OutlineSettings::default(),
            meta: Metadata::new(),
            notation: None,
            entries: vec![OutlineEntry::root()],
            parents,
            hierarchy: [0; MAX_DEPTH],
        }
    }

    fn push_line(&mut self, line_no: usize, line: &str) -> Result<(), OutlineError> {
        let Some((level, title)) = self.parse_line(line) else {
            return Ok(());
        };

        if level >= MAX_DEPTH {
            return Err(OutlineError::DepthExceeded {
                line: line_no,
                level,
            });
        }
        let parent = self.parents[level].ok_or_else(|| OutlineError::MalformedHierarchy {
            line: line_no,
            level,
            title: title.clone(),
        })?;

        self.hierarchy[level] += 1;
        for deeper in level + 1..MAX_DEPTH {
            self.hierarchy[deeper] = 0;
            self.parents[deeper + 1] = None;
        }

        let slug = slugify(&title);
        let (url, anchor) = if level <= self.settings.page_level {
            let url = self
                .pages
                .has_page(&slug)
                .then(|| page_file_name(&slug));
            (url, None)
        } else {
            let url = self.entries[parent].url.clone();
            let anchor = url.as_ref().map(|u| format!("{}#{}", u, slug));
            (url, anchor)
        };

        let id = self.entries.len();
        self.entries.push(OutlineEntry {
            level: level as i32,
            title,
            slug,
            url,
            anchor,
            hierarchy: self.hierarchy,
            children: Vec::new(),
        });
        self.entries[parent].children.push(id);
        self.parents[level + 1] = Some(id);
        Ok(())
    }

    /// Depth and title of a content line, `None` when it has no title
    fn parse_line(&mut self, line: &str) -> Option<(usize, String)> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let notation = match self.notation {
            Some(notation) => notation,
            None => {
                let resolved = match self.settings.notation {
                    Notation::Auto if trimmed.starts_with('#') => Notation::Heading,
                    Notation::Auto => Notation::Indent,
                    explicit => explicit,
                };
                self.notation = Some(resolved);
                resolved
            }
        };

        let (level, title) = match notation {
            Notation::Heading => parse_heading(trimmed)?,
            _ => self.parse_indented(line)?,
        };
        if title.is_empty() {
            return None;
        }
        Some((level, title.to_string()))
    }

    fn parse_indented<'l>(&self, line: &'l str) -> Option<(usize, &'l str)> {
        let start = line.find(|c: char| !c.is_whitespace())?;
        let spacing = self.settings.indent_spacing;
        let width: usize = line[..start]
            .chars()
            .map(|c| if c == '\t' { spacing } else { 1 })
            .sum();

        let bullets = &self.settings.bullet_characters;
        let title = line[start..]
            .trim_start_matches(|c: char| bullets.contains(c))
            .trim();
        Some((width / spacing, title))
    }
}

fn parse_heading(trimmed: &str) -> Option<(usize, &str)> {
    let markers = trimmed.chars().take_while(|c| *c == '#').count();
    if markers == 0 {
        return None;
    }
    Some((markers - 1, trimmed[markers..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const INDENTED: &str = "
---
indent_spacing: 4
bullet_characters: -*+
page_level: 1
---

Chapter 1
    sublevel 1.1
    sublevel 1.2
        sub-sublevel 1.2.1
    sublevel 1.3

Chapter 2
    sublevel 2.1
        sub-sublevel 2.1.1
            sub-sub-sublevel 2.1.1.1
    sublevel 2.2";

    fn all_pages(_: &str) -> bool {
        true
    }

    fn no_pages(_: &str) -> bool {
        false
    }

    #[test]
    fn test_heading_hierarchy() {
        let text = "# Chapter 1\n## 1.1\n## 1.2\n### 1.2.1\n# Chapter 2\n";
        let tree = generate(text, &no_pages).unwrap();
        let hierarchies: Vec<Hierarchy> = tree.iter().map(|e| e.hierarchy).collect();
        assert_eq!(
            hierarchies,
            vec![
                [1, 0, 0, 0, 0],
                [1, 1, 0, 0, 0],
                [1, 2, 0, 0, 0],
                [1, 2, 1, 0, 0],
                [2, 0, 0, 0, 0],
            ]
        );
        assert_eq!(tree.get(&[0, 1, 0]).unwrap().title, "1.2.1");
        assert_eq!(tree.get(&[0, 1, 0]).unwrap().number(), "1.2.1");
    }

    #[test]
    fn test_indented_hierarchy() {
        let tree = generate(INDENTED, &no_pages).unwrap();
        assert_eq!(tree.root().level, ROOT_LEVEL);
        assert_eq!(tree.get(&[0]).unwrap().hierarchy, [1, 0, 0, 0, 0]);
        assert_eq!(tree.get(&[0, 0]).unwrap().hierarchy, [1, 1, 0, 0, 0]);
        assert_eq!(tree.get(&[0, 1]).unwrap().hierarchy, [1, 2, 0, 0, 0]);
        assert_eq!(tree.get(&[0, 1, 0]).unwrap().hierarchy, [1, 2, 1, 0, 0]);
        assert_eq!(tree.get(&[1]).unwrap().hierarchy, [2, 0, 0, 0, 0]);
        assert_eq!(tree.get(&[1, 0]).unwrap().hierarchy, [2, 1, 0, 0, 0]);
        assert_eq!(tree.get(&[1, 0, 0, 0]).unwrap().hierarchy, [2, 1, 1, 1, 0]);
        assert_eq!(tree.len(), 10);
    }

    #[test]
    fn test_tabs_count_as_indent_units() {
        let tree = generate("Top\n\tChild\n\t    Grandchild\n", &no_pages).unwrap();
        assert_eq!(tree.get(&[0, 0, 0]).unwrap().level, 2);
    }

    #[test]
    fn test_bullets_are_stripped() {
        let tree = generate("- Chapter 1\n    * Section & More\n", &no_pages).unwrap();
        let section = tree.get(&[0, 0]).unwrap();
        assert_eq!(section.title, "Section & More");
        assert_eq!(section.slug, "section-and-more");
    }

    #[test]
    fn test_url_present_if_page_exists() {
        let tree = generate(INDENTED, &all_pages).unwrap();
        assert_eq!(tree.get(&[0]).unwrap().url.as_deref(), Some("chapter-1.html"));
        assert_eq!(tree.get(&[0, 0]).unwrap().url.as_deref(), Some("sublevel-1-1.html"));
        assert_eq!(tree.get(&[1, 1]).unwrap().url.as_deref(), Some("sublevel-2-2.html"));
    }

    #[test]
    fn test_url_missing_if_page_missing() {
        let tree = generate(INDENTED, &no_pages).unwrap();
        assert!(tree.get(&[0]).unwrap().url.is_none());
        assert!(tree.get(&[1]).unwrap().url.is_none());
        assert!(tree.get(&[0, 1, 0]).unwrap().url.is_none());
        assert!(tree.get(&[0, 1, 0]).unwrap().anchor.is_none());
    }

    #[test]
    fn test_deeper_levels_inherit_page_url() {
        let tree = generate(INDENTED, &all_pages).unwrap();
        let entry = tree.get(&[0, 1, 0]).unwrap();
        assert_eq!(entry.url.as_deref(), Some("sublevel-1-2.html"));
        assert_eq!(entry.anchor.as_deref(), Some("sublevel-1-2.html#sub-sublevel-1-2-1"));
        assert_eq!(
            tree.get(&[1, 0, 0, 0]).unwrap().url.as_deref(),
            Some("sublevel-2-1.html")
        );
    }

    #[test]
    fn test_inherits_missing_parent_page() {
        let pages = |slug: &str| slug == "chapter-1";
        let tree = generate("# Chapter 1\n## Missing\n### Deep\n", &pages).unwrap();
        assert_eq!(tree.get(&[0]).unwrap().url.as_deref(), Some("chapter-1.html"));
        assert!(tree.get(&[0, 0]).unwrap().url.is_none());
        assert!(tree.get(&[0, 0, 0]).unwrap().url.is_none());
    }

    #[test]
    fn test_page_level_setting() {
        let text = "---\npage_level: 0\n---\n# Book\n## Part\n";
        let tree = generate(text, &all_pages).unwrap();
        assert_eq!(tree.page_level(), 0);
        assert_eq!(tree.get(&[0, 0]).unwrap().url.as_deref(), Some("book.html"));
    }

    #[test]
    fn test_skipped_level_is_malformed() {
        let err = generate("# A\n### C\n", &no_pages).unwrap_err();
        assert!(matches!(
            err,
            OutlineError::MalformedHierarchy { line: 2, level: 2, .. }
        ));
    }

    #[test]
    fn test_reset_parents_after_shallower_entry() {
        let err = generate("# A\n## B\n# C\n### D\n", &no_pages).unwrap_err();
        assert!(matches!(err, OutlineError::MalformedHierarchy { line: 4, .. }));
    }

    #[test]
    fn test_indented_first_line_is_malformed() {
        let err = generate("    orphan\n", &no_pages).unwrap_err();
        assert!(matches!(err, OutlineError::MalformedHierarchy { level: 1, .. }));
    }

    #[test]
    fn test_depth_exceeded() {
        let text = "# 1\n## 2\n### 3\n#### 4\n##### 5\n###### 6\n";
        let err = generate(text, &no_pages).unwrap_err();
        assert!(matches!(err, OutlineError::DepthExceeded { line: 6, level: 5 }));
    }

    #[test]
    fn test_empty_titles_are_skipped() {
        let tree = generate("# A\n##\n- \n## B\n", &no_pages).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(&[0, 0]).unwrap().hierarchy, [1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_heading_notation_ignores_plain_lines() {
        let tree = generate("# A\nsome prose\n## B\n", &no_pages).unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_comments_are_skipped() {
        let text = "# A\n-/-\n# Hidden\n### broken\n-/-\n# B\n";
        let tree = generate(text, &no_pages).unwrap();
        let titles: Vec<&str> = tree.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(tree.get(&[1]).unwrap().hierarchy, [2, 0, 0, 0, 0]);
    }

    #[test]
    fn test_invalid_settings() {
        let err = generate("---\nindent_spacing: 0\n---\n", &no_pages).unwrap_err();
        assert!(matches!(err, OutlineError::InvalidSetting { key, .. } if key == "indent_spacing"));

        let err = generate("---\npage_level: high\n---\n", &no_pages).unwrap_err();
        assert!(matches!(err, OutlineError::InvalidSetting { key, .. } if key == "page_level"));

        let err = generate("---\nnotation: outline\n---\n", &no_pages).unwrap_err();
        assert!(matches!(err, OutlineError::InvalidSetting { key, .. } if key == "notation"));
    }

    #[test]
    fn test_explicit_indent_notation() {
        let text = "---\nnotation: indent\nindent_spacing: 2\n---\n#hashtag\n  child\n";
        let tree = generate(text, &no_pages).unwrap();
        assert_eq!(tree.get(&[0]).unwrap().title, "#hashtag");
        assert_eq!(tree.get(&[0, 0]).unwrap().level, 1);
        assert_eq!(tree.meta()["notation"].as_str(), Some("indent"));
    }

    #[test]
    fn test_get_empty_path_is_root() {
        let tree = generate("# A\n", &no_pages).unwrap();
        assert!(tree.get(&[]).unwrap().is_root());
        assert!(matches!(
            tree.get(&[0, 3]),
            Err(OutlineError::IndexOutOfRange(path)) if path == vec![0, 3]
        ));
    }

    #[test]
    fn test_generate_file_checks_page_directory() {
        let storage = MemoryStorage::new()
            .with_file("toc.toc", "# Intro\n# Usage\n")
            .with_file("pages/intro.html", "<h1>Intro</h1>");
        let tree = generate_file(&storage, Path::new("toc.toc"), Path::new("pages")).unwrap();
        assert_eq!(tree.get(&[0]).unwrap().url.as_deref(), Some("intro.html"));
        assert!(tree.get(&[1]).unwrap().url.is_none());
    }

    #[test]
    fn test_generate_file_rejects_bad_encoding() {
        let storage = MemoryStorage::new().with_file("toc.toc", [0xffu8, 0xfe, 0x00]);
        let err = generate_file(&storage, Path::new("toc.toc"), Path::new("pages")).unwrap_err();
        assert!(matches!(err, OutlineError::Encoding(_)));
    }

    #[test]
    fn test_serializes_nested() {
        let tree = generate("# A\n## B\n", &all_pages).unwrap();
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(value["page_level"], 1);
        assert_eq!(value["children"][0]["url"], "a.html");
        assert_eq!(value["children"][0]["children"][0]["slug"], "b");
        assert_eq!(value["children"][0]["children"][0]["number"], "1.1");
        assert_eq!(
            value["children"][0]["children"][0]["hierarchy"],
            serde_json::json!([1, 1, 0, 0, 0])
        );
    }
}
