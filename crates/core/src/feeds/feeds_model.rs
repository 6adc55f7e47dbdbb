use serde::{Deserialize, Serialize};

use crate::posts::slugify;

/// Site identity shared by every generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Absolute origin without a trailing slash, e.g. `https://brokerdeck.example`.
    pub site_url: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
}

impl SiteConfig {
    pub fn new(site_url: impl Into<String>) -> Self {
        let site_url: String = site_url.into();
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            title: "BrokerDeck".to_string(),
            description: "Broker and prop firm comparisons, reviews and guides".to_string(),
            author: crate::constants::DEFAULT_AUTHOR.to_string(),
            language: "en-us".to_string(),
        }
    }

    /// `path` must start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.site_url, path)
    }

    pub fn post_url(&self, slug: &str) -> String {
        self.url(&format!("/blog/{}", slug))
    }

    pub fn category_url(&self, category: &str) -> String {
        self.url(&format!("/blog/category/{}", slugify(category)))
    }

    pub fn tag_url(&self, tag: &str) -> String {
        self.url(&format!("/blog/tag/{}", slugify(tag)))
    }
}

/// JSON Feed version 1 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFeed {
    pub version: String,
    pub title: String,
    pub home_page_url: String,
    pub feed_url: String,
    pub description: String,
    pub language: String,
    pub author: JsonFeedAuthor,
    pub items: Vec<JsonFeedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFeedAuthor {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFeedItem {
    pub id: String,
    pub url: String,
    pub title: String,
    pub content_html: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub date_published: String,
    pub date_modified: String,
    pub author: JsonFeedAuthor,
    pub tags: Vec<String>,
}
