//! Restricted rich text for bot messages: plain runs, bold runs, line breaks
//! and links. Catalogue text only ever enters as a run, so HTML output escapes
//! it; markup comes from the segment kinds alone.

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Bold(String),
    LineBreak,
    Link { label: String, href: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    segments: Vec<Segment>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Text(text.into()));
        self
    }

    pub fn bold(mut self, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Bold(text.into()));
        self
    }

    pub fn line_break(mut self) -> Self {
        self.segments.push(Segment::LineBreak);
        self
    }

    /// Two breaks, the paragraph gap used between reply sections.
    pub fn paragraph(self) -> Self {
        self.line_break().line_break()
    }

    pub fn link(mut self, label: impl Into<String>, href: impl Into<String>) -> Self {
        self.segments.push(Segment::Link {
            label: label.into(),
            href: href.into(),
        });
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// HTML for a transcript sink. All text is escaped; links open in a new tab.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => out.push_str(&escape_html(t)),
                Segment::Bold(t) => {
                    let _ = write!(out, "<b>{}</b>", escape_html(t));
                }
                Segment::LineBreak => out.push_str("<br>"),
                Segment::Link { label, href } => {
                    let _ = write!(
                        out,
                        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                        escape_html(&safe_href(href)),
                        escape_html(label)
                    );
                }
            }
        }
        out
    }

    /// Plain text for terminals and tests. Links render as `label <href>`.
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(t) | Segment::Bold(t) => out.push_str(t),
                Segment::LineBreak => out.push('\n'),
                Segment::Link { label, href } => {
                    let _ = write!(out, "{label} <{href}>");
                }
            }
        }
        out
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        RichText::new().text(text)
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Only http(s) and relative links survive; anything else becomes `#`.
fn safe_href(href: &str) -> String {
    let trimmed = href.trim();
    let lower = trimmed.to_ascii_lowercase();
    let has_scheme = lower
        .split_once(':')
        .is_some_and(|(scheme, _)| !scheme.contains('/'));
    if !has_scheme || lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        "#".to_string()
    }
}
