//! Blog post domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A blog post materialized from a content file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub publish_date: NaiveDate,
    pub last_updated: Option<NaiveDate>,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub read_time: u32,
    pub featured: bool,
    pub image: Option<String>,
    pub content: String,
    pub excerpt: String,
    pub cta_broker: Option<String>,
    pub cta_link: Option<String>,
    pub cta_highlight: Option<String>,
}

impl Post {
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            publish_date: self.publish_date,
            last_updated: self.last_updated,
            category: self.category.clone(),
            tags: self.tags.clone(),
            author: self.author.clone(),
            read_time: self.read_time,
            featured: self.featured,
            image: self.image.clone(),
            excerpt: self.excerpt.clone(),
        }
    }

    /// Date the post last changed, for feeds and sitemaps.
    pub fn modified_date(&self) -> NaiveDate {
        self.last_updated.unwrap_or(self.publish_date)
    }
}

/// A post without its body, used by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub publish_date: NaiveDate,
    pub last_updated: Option<NaiveDate>,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub read_time: u32,
    pub featured: bool,
    pub image: Option<String>,
    pub excerpt: String,
}

/// Metadata block at the top of a content file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FrontMatter {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "date")]
    pub publish_date: String,
    #[serde(default, alias = "updatedDate")]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub read_time: Option<u32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub cta_broker: Option<String>,
    #[serde(default)]
    pub cta_link: Option<String>,
    #[serde(default)]
    pub cta_highlight: Option<String>,
}
