use crate::domain::error::DomainError;

/// Turns user-written markdown into HTML that is safe to embed in a page.
pub trait ContentRenderer: Send + Sync {
    /// Render markdown. Raw HTML in the source is escaped, not passed through.
    fn render_markdown(&self, text: &str) -> Result<String, DomainError>;

    /// Mark every anchor `rel="nofollow"`.
    fn add_nofollow(&self, html: &str) -> String;

    /// Remove anchor tags, keeping their text.
    fn strip_anchors(&self, html: &str) -> String;
}
