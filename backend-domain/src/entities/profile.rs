// Scraped profile metadata
// Produced fresh per enrichment call, merged into an event at write time,
// never stored on its own. All fields stay empty when scraping fails.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMetadata {
    pub avatar_url: Option<String>,
    pub organization_name: Option<String>,
    pub organization_url: Option<String>,
}

impl ProfileMetadata {
    pub fn is_empty(&self) -> bool {
        self.avatar_url.is_none()
            && self.organization_name.is_none()
            && self.organization_url.is_none()
    }
}
