//! Syndication and crawler documents built from the post corpus.

mod feeds_model;
mod json_feed;
mod rss;
mod sitemap;

pub use feeds_model::{JsonFeed, JsonFeedAuthor, JsonFeedItem, SiteConfig};
pub use json_feed::json_feed;
pub use rss::rss_feed;
pub use sitemap::{robots_txt, sitemap, DISALLOWED_PREFIXES, STATIC_ROUTES};
