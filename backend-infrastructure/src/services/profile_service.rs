use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use backend_domain::ports::ProfileSource;
use backend_domain::{ProfileMetadata, RuntimeConfig};

/// Scrapes the public citizen page for avatar and organization metadata.
/// The page markup is an unversioned external dependency, so every
/// extraction is best-effort: whatever cannot be found stays `None`.
pub struct RsiProfileService {
    http: reqwest::Client,
    base_url: String,
}

impl RsiProfileService {
    pub fn new(config: &RuntimeConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.profile_timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: config.profile_base_url.clone(),
        })
    }

    async fn fetch_body(&self, url: &str) -> anyhow::Result<String> {
        debug!(url, "fetching profile page");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("unexpected status {} for {}", status, url);
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ProfileSource for RsiProfileService {
    async fn fetch_profile(&self, handle: &str) -> ProfileMetadata {
        let url = format!("{}/citizens/{}", self.base_url, handle);
        match self.fetch_body(&url).await {
            Ok(body) => parse_profile(&body, &self.base_url),
            Err(err) => {
                warn!(handle, error = %err, "profile fetch failed");
                ProfileMetadata::default()
            }
        }
    }
}

pub(crate) fn parse_profile(body: &str, base_url: &str) -> ProfileMetadata {
    let document = Html::parse_document(body);
    let avatar_url = parse_avatar(&document);
    let (organization_name, organization_url) = parse_organization(&document, base_url);
    ProfileMetadata {
        avatar_url,
        organization_name,
        organization_url,
    }
}

/// Avatar comes from the page's OpenGraph image, checked under both
/// property names the site has used. First match wins.
fn parse_avatar(document: &Html) -> Option<String> {
    for css in [
        "meta[property=\"og:image\"]",
        "meta[property=\"og:image:url\"]",
    ] {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        let content = document
            .select(&selector)
            .next()
            .and_then(|tag| tag.value().attr("content"))
            .filter(|content| !content.is_empty());
        if let Some(content) = content {
            return Some(content.to_string());
        }
    }
    None
}

/// The first link into an organization page names the citizen's org.
/// Link text wins; a bare link falls back to the URL's last path segment.
fn parse_organization(document: &Html, base_url: &str) -> (Option<String>, Option<String>) {
    let Ok(selector) = Selector::parse("a[href*=\"/orgs/\"]") else {
        return (None, None);
    };
    let Some(link) = document.select(&selector).next() else {
        return (None, None);
    };
    let Some(href) = link.value().attr("href") else {
        return (None, None);
    };

    let url = normalize_profile_url(href, base_url);
    let text: String = link
        .text()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let name = if text.is_empty() {
        org_name_from_url(&url)
    } else {
        text
    };
    (Some(name), Some(url))
}

fn normalize_profile_url(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{}{}", base_url, href)
    } else {
        format!("{}/{}", base_url, href)
    }
}

fn org_name_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
