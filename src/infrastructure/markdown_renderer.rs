use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, html};
use regex::{Captures, Regex};

use crate::domain::{error::DomainError, services::content_renderer::ContentRenderer};

static ANCHOR_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a(\s[^>]*)?>").expect("anchor pattern is valid"));

static ANCHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?a(\s[^>]*)?>").expect("anchor pattern is valid"));

static REL_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\srel="([^"]*)""#).expect("rel pattern is valid"));

/// CommonMark renderer for user-written content.
#[derive(Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES,
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRenderer for MarkdownRenderer {
    fn render_markdown(&self, text: &str) -> Result<String, DomainError> {
        // raw HTML is shown as text
        let events = Parser::new_ext(text, self.options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, events);
        Ok(out)
    }

    fn add_nofollow(&self, html: &str) -> String {
        ANCHOR_OPEN
            .replace_all(html, |caps: &Captures| {
                let attrs = caps.get(1).map_or("", |m| m.as_str());
                match REL_ATTR.captures(attrs) {
                    Some(rel) if rel[1].split_whitespace().any(|v| v.eq_ignore_ascii_case("nofollow")) => {
                        caps[0].to_string()
                    }
                    Some(rel) => {
                        let merged = format!(r#" rel="{} nofollow""#, &rel[1]);
                        format!("<a{}>", attrs.replacen(&rel[0], &merged, 1))
                    }
                    None => format!(r#"<a{} rel="nofollow">"#, attrs),
                }
            })
            .into_owned()
    }

    fn strip_anchors(&self, html: &str) -> String {
        ANCHOR_TAG.replace_all(html, "").into_owned()
    }
}
