//! Markdown to HTML conversion for preprocessed document bodies.

use crate::slug::slugify;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Markdown converter with the extensions tsk documents rely on
pub struct MarkdownProcessor {
    options: Options,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Convert a cleaned markdown body to an HTML fragment
    ///
    /// Headings without an explicit `{#id}` get their slug as id, so outline
    /// anchors (`page.html#slug`) land on them.
    pub fn convert(&self, markdown: &str) -> String {
        let events: Vec<Event> = Parser::new_ext(markdown, self.options).collect();
        let ids = collect_heading_ids(&events);
        let events = attach_heading_ids(events, &ids);

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_heading_ids(events: &[Event]) -> Vec<String> {
    let mut ids = Vec::new();
    let mut current: Option<String> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading { .. }) => current = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(title) = current.as_mut() {
                    title.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(title) = current.take() {
                    ids.push(slugify(&title));
                }
            }
            _ => {}
        }
    }

    ids
}

fn attach_heading_ids<'a>(events: Vec<Event<'a>>, ids: &[String]) -> Vec<Event<'a>> {
    let mut ids = ids.iter();
    events
        .into_iter()
        .map(|event| match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                let generated = ids.next();
                let id = id.or_else(|| {
                    generated
                        .filter(|s| !s.is_empty())
                        .map(|s| CowStr::Boxed(s.clone().into_boxed_str()))
                });
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                })
            }
            other => other,
        })
        .collect()
}
