//! Line-oriented document preprocessor.
//!
//! Turns an extended markdown document into plain markdown plus a metadata
//! record. Three sentinels drive it, all matched against the trimmed line:
//!
//! - `-/-` toggles comment mode; everything inside is dropped
//! - `---` toggles front-matter mode; inner lines are `key: value` pairs
//! - `$$ name arg...` runs an inline command and splices its output in

use crate::commands::{CommandContext, CommandError, CommandRegistry};
use crate::metadata::{parse_meta_line, Metadata};
use serde::Serialize;

pub const FRONT_MATTER_MARKER: &str = "---";
pub const COMMENT_MARKER: &str = "-/-";
pub const COMMAND_MARKER: &str = "$$";

/// How a single line should be treated given the current modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A mode toggle, never emitted
    Toggle,
    /// Inside a comment block
    Comment,
    /// Inside a front-matter block
    Meta(&'a str),
    Content(&'a str),
}

/// Comment and front-matter mode tracking shared by the preprocessor and the
/// outline builder
#[derive(Debug, Default, Clone, Copy)]
pub struct LineModes {
    comment: bool,
    front_matter: bool,
}

impl LineModes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `line`, updating the modes when it is a toggle
    pub fn classify<'a>(&mut self, line: &'a str) -> LineKind<'a> {
        let trimmed = line.trim();

        // Comment toggles win regardless of the current mode
        if trimmed == COMMENT_MARKER {
            self.comment = !self.comment;
            return LineKind::Toggle;
        }
        if self.comment {
            return LineKind::Comment;
        }

        if trimmed == FRONT_MATTER_MARKER {
            self.front_matter = !self.front_matter;
            return LineKind::Toggle;
        }
        if self.front_matter {
            return LineKind::Meta(line);
        }

        LineKind::Content(line)
    }
}

/// Store a front-matter line into `metadata`, skipping blanks and lines
/// without a key. Returns the key that was written.
pub(crate) fn absorb_meta_line(metadata: &mut Metadata, line: &str) -> Option<String> {
    if line.trim().is_empty() {
        return None;
    }
    match parse_meta_line(line) {
        Some((key, value)) if !key.is_empty() => {
            metadata.insert(key.clone(), value);
            Some(key)
        }
        _ => {
            tracing::warn!("Skipping malformed front matter line: {:?}", line.trim_end());
            None
        }
    }
}

/// Split a command line (`$$ name arg...`) into name and arguments
///
/// The marker must be followed by whitespace, so `$$x^2$$` stays plain text.
pub fn parse_command(line: &str) -> Option<(String, Vec<String>)> {
    let rest = line.trim().strip_prefix(COMMAND_MARKER)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut tokens = rest.split_whitespace().map(str::to_string);
    let name = tokens.next()?;
    Some((name, tokens.collect()))
}

/// Result of preprocessing one document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub metadata: Metadata,
    pub body: String,
}

/// Preprocessor bound to a command registry and optional processing context
pub struct Preprocessor<'a> {
    registry: &'a CommandRegistry,
    context: Option<CommandContext<'a>>,
}

impl<'a> Preprocessor<'a> {
    pub fn new(registry: &'a CommandRegistry) -> Self {
        Self {
            registry,
            context: None,
        }
    }

    /// Attach the context bound commands receive
    pub fn with_context(mut self, context: CommandContext<'a>) -> Self {
        self.context = Some(context);
        self
    }

    /// Preprocess a raw document into metadata and a cleaned body
    ///
    /// # Example
    ///
    /// ```
    /// use tsk_core::{CommandRegistry, Preprocessor};
    ///
    /// let registry = CommandRegistry::new();
    /// let doc = Preprocessor::new(&registry)
    ///     .process("---\ntitle: Intro\n---\n-/-\ndraft notes\n-/-\n# Intro\n")
    ///     .unwrap();
    /// assert_eq!(doc.metadata["title"].as_str(), Some("Intro"));
    /// assert_eq!(doc.body, "# Intro\n");
    /// ```
    pub fn process(&self, text: &str) -> Result<Document, CommandError> {
        let mut modes = LineModes::new();
        let mut doc = Document::default();

        for line in text.split_inclusive('\n') {
            match modes.classify(line) {
                LineKind::Toggle | LineKind::Comment => {}
                LineKind::Meta(meta) => {
                    absorb_meta_line(&mut doc.metadata, meta);
                }
                LineKind::Content(content) => self.push_content(&mut doc.body, content)?,
            }
        }

        Ok(doc)
    }

    fn push_content(&self, body: &mut String, line: &str) -> Result<(), CommandError> {
        let Some((name, args)) = parse_command(line) else {
            body.push_str(line);
            return Ok(());
        };

        let output = self
            .registry
            .dispatch(&name, &args, self.context.as_ref())?;
        tracing::debug!("Command {} produced {} bytes", name, output.len());

        body.push_str(&output);
        if line.ends_with('\n') && !output.is_empty() && !output.ends_with('\n') {
            body.push('\n');
        }
        Ok(())
    }
}
