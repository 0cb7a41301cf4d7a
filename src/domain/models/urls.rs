/// Builds absolute URLs under the site's public base address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    base: String,
}

impl SiteUrls {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { base }
    }

    pub fn profile(&self, username: &str) -> String {
        format!("{}/u/{}", self.base, urlencoding::encode(username))
    }

    /// Public URL of a file in object storage.
    pub fn upload(&self, path: &str) -> String {
        format!("{}/uploads/{}", self.base, path.trim_start_matches('/'))
    }
}
