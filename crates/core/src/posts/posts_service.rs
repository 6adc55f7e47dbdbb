use log::error;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::posts_model::Post;
use super::posts_traits::{PostServiceTrait, PostStoreTrait};

pub struct PostService {
    store: Arc<dyn PostStoreTrait>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStoreTrait>) -> Self {
        Self { store }
    }
}

impl PostServiceTrait for PostService {
    fn get_all_posts(&self) -> Vec<Post> {
        match self.store.list_posts() {
            Ok(mut posts) => {
                posts.sort_by(|a, b| {
                    b.publish_date
                        .cmp(&a.publish_date)
                        .then_with(|| a.slug.cmp(&b.slug))
                });
                posts
            }
            Err(e) => {
                error!("Error loading blog posts: {}", e);
                Vec::new()
            }
        }
    }

    fn get_post_by_slug(&self, slug: &str) -> Option<Post> {
        self.store.get_post(slug).unwrap_or_else(|e| {
            error!("Error loading blog post {}: {}", slug, e);
            None
        })
    }

    fn get_featured_posts(&self) -> Vec<Post> {
        self.get_all_posts()
            .into_iter()
            .filter(|p| p.featured)
            .collect()
    }

    fn get_categories(&self) -> Vec<String> {
        self.get_all_posts()
            .into_iter()
            .map(|p| p.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn get_tags(&self) -> Vec<String> {
        self.get_all_posts()
            .into_iter()
            .flat_map(|p| p.tags)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn get_posts_by_category(&self, category: &str) -> Vec<Post> {
        self.get_all_posts()
            .into_iter()
            .filter(|p| same_term(&p.category, category))
            .collect()
    }

    fn get_posts_by_tag(&self, tag: &str) -> Vec<Post> {
        self.get_all_posts()
            .into_iter()
            .filter(|p| p.tags.iter().any(|t| same_term(t, tag)))
            .collect()
    }

    fn get_related_posts(&self, slug: &str, limit: usize) -> Vec<Post> {
        let posts = self.get_all_posts();
        let Some(current) = posts.iter().find(|p| p.slug == slug).cloned() else {
            return Vec::new();
        };

        let mut scored: Vec<(usize, Post)> = posts
            .into_iter()
            .filter(|p| p.slug != current.slug)
            .filter_map(|p| {
                let shared = p.tags.iter().filter(|t| current.tags.contains(t)).count();
                let related = shared > 0 || p.category == current.category;
                related.then_some((shared, p))
            })
            .collect();
        // Stable: ties keep newest-first order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().take(limit).map(|(_, p)| p).collect()
    }
}

/// Lowercases and joins runs of non-alphanumerics with `-`, for category and
/// tag URLs.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn same_term(value: &str, wanted: &str) -> bool {
    value.eq_ignore_ascii_case(wanted) || slugify(value) == slugify(wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use chrono::NaiveDate;
    use std::io;

    struct MockPostStore {
        posts: Vec<Post>,
        fail: bool,
    }

    impl PostStoreTrait for MockPostStore {
        fn list_posts(&self) -> Result<Vec<Post>> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::Other, "disk unavailable").into());
            }
            Ok(self.posts.clone())
        }

        fn get_post(&self, slug: &str) -> Result<Option<Post>> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::Other, "disk unavailable").into());
            }
            Ok(self.posts.iter().find(|p| p.slug == slug).cloned())
        }
    }

    fn post(slug: &str, day: u32, category: &str, tags: &[&str]) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            description: String::new(),
            publish_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            last_updated: None,
            category: category.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            author: "Staff".to_string(),
            read_time: 3,
            featured: day % 2 == 0,
            image: None,
            content: "Body".to_string(),
            excerpt: "Body".to_string(),
            cta_broker: None,
            cta_link: None,
            cta_highlight: None,
        }
    }

    fn service() -> PostService {
        PostService::new(Arc::new(MockPostStore {
            posts: vec![
                post("older", 1, "Guides", &["beginners", "mt5"]),
                post("newest", 20, "Prop Trading", &["funding"]),
                post("middle", 10, "Guides", &["mt5"]),
                post("other", 5, "News", &["Funding"]),
            ],
            fail: false,
        }))
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_posts_sorted_newest_first() {
        assert_eq!(
            slugs(&service().get_all_posts()),
            vec!["newest", "middle", "other", "older"]
        );
    }

    #[test]
    fn test_categories_and_tags_are_deduplicated() {
        let svc = service();
        assert_eq!(svc.get_categories(), vec!["Guides", "News", "Prop Trading"]);
        assert_eq!(svc.get_tags(), vec!["Funding", "beginners", "funding", "mt5"]);
    }

    #[test]
    fn test_lookup_by_category_and_tag_accepts_slugs() {
        let svc = service();
        assert_eq!(
            slugs(&svc.get_posts_by_category("prop-trading")),
            vec!["newest"]
        );
        assert_eq!(slugs(&svc.get_posts_by_category("guides")), vec!["middle", "older"]);
        assert_eq!(slugs(&svc.get_posts_by_tag("funding")), vec!["newest", "other"]);
        assert!(svc.get_posts_by_tag("unknown").is_empty());
    }

    #[test]
    fn test_featured_posts() {
        assert_eq!(slugs(&service().get_featured_posts()), vec!["newest", "middle"]);
    }

    #[test]
    fn test_related_posts_prefer_shared_tags() {
        let svc = service();
        assert_eq!(slugs(&svc.get_related_posts("older", 3)), vec!["middle"]);
        assert_eq!(slugs(&svc.get_related_posts("middle", 3)), vec!["older"]);
        assert!(svc.get_related_posts("missing", 3).is_empty());
    }

    #[test]
    fn test_store_failure_degrades_to_empty() {
        let svc = PostService::new(Arc::new(MockPostStore {
            posts: vec![],
            fail: true,
        }));
        assert!(svc.get_all_posts().is_empty());
        assert!(svc.get_post_by_slug("anything").is_none());
        assert!(svc.get_categories().is_empty());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Prop Trading"), "prop-trading");
        assert_eq!(slugify("  MT5 & cTrader!  "), "mt5-ctrader");
        assert_eq!(slugify("already-slugged"), "already-slugged");
    }
}
