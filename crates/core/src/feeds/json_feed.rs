use super::feeds_model::{JsonFeed, JsonFeedAuthor, JsonFeedItem, SiteConfig};
use crate::markdown::render_markdown;
use crate::posts::Post;
use crate::utils::time_utils::iso8601;

pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1";

/// JSON Feed v1 with items keyed by their canonical post URL.
pub fn json_feed(site: &SiteConfig, posts: &[Post]) -> JsonFeed {
    JsonFeed {
        version: JSON_FEED_VERSION.to_string(),
        title: site.title.clone(),
        home_page_url: site.url("/"),
        feed_url: site.url("/feed.json"),
        description: site.description.clone(),
        language: site.language.clone(),
        author: JsonFeedAuthor {
            name: site.author.clone(),
        },
        items: posts.iter().map(|p| item(site, p)).collect(),
    }
}

fn item(site: &SiteConfig, post: &Post) -> JsonFeedItem {
    let url = site.post_url(&post.slug);
    JsonFeedItem {
        id: url.clone(),
        url,
        title: post.title.clone(),
        content_html: render_markdown(&post.content),
        summary: post.description.clone(),
        image: post.image.as_ref().map(|image| {
            if image.starts_with('/') {
                site.url(image)
            } else {
                image.clone()
            }
        }),
        date_published: iso8601(post.publish_date),
        date_modified: iso8601(post.modified_date()),
        author: JsonFeedAuthor {
            name: post.author.clone(),
        },
        tags: post.tags.clone(),
    }
}
