//! Filesystem-backed post store.
//!
//! Every content file is a `---` delimited YAML front matter block followed
//! by the Markdown body. The file name without extension is the slug.

use chrono::{DateTime, NaiveDate};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::posts_model::{FrontMatter, Post};
use super::posts_traits::PostStoreTrait;
use crate::constants::{
    CONTENT_EXTENSIONS, DEFAULT_AUTHOR, DEFAULT_CATEGORY, EXCERPT_LENGTH, WORDS_PER_MINUTE,
};
use crate::errors::{ContentError, Result, ValidationError};

const DELIMITER: &str = "---";

pub struct FsPostStore {
    content_dir: PathBuf,
}

impl FsPostStore {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    fn read_post(&self, path: &Path, slug: &str) -> Result<Post> {
        let raw = fs::read_to_string(path)?;
        parse_post(slug, &raw)
    }
}

impl PostStoreTrait for FsPostStore {
    fn list_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        for entry in fs::read_dir(&self.content_dir)? {
            let path = entry?.path();
            if !path.is_file() || !has_content_extension(&path) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_valid_slug(slug) {
                warn!("Skipping {}: file name is not a valid slug", path.display());
                continue;
            }
            posts.push(self.read_post(&path, slug)?);
        }
        debug!(
            "Loaded {} posts from {}",
            posts.len(),
            self.content_dir.display()
        );
        Ok(posts)
    }

    fn get_post(&self, slug: &str) -> Result<Option<Post>> {
        if !is_valid_slug(slug) {
            return Ok(None);
        }
        for extension in CONTENT_EXTENSIONS {
            let path = self.content_dir.join(format!("{}.{}", slug, extension));
            if path.is_file() {
                return self.read_post(&path, slug).map(Some);
            }
        }
        Ok(None)
    }
}

fn has_content_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CONTENT_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Slugs name files directly and appear verbatim in URLs, so only ASCII
/// letters, digits, `-`, `_` and interior `.` are allowed.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.ends_with('.')
        && !slug.contains("..")
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Splits a content file into its front matter text and body.
fn split_front_matter<'a>(slug: &str, raw: &'a str) -> Result<(&'a str, &'a str)> {
    let raw = raw.trim_start_matches('\u{feff}');
    let missing = || ContentError::MissingFrontMatter(slug.to_string());

    let mut lines = raw.split_inclusive('\n');
    let first = lines.next().ok_or_else(missing)?;
    if first.trim_end() != DELIMITER {
        return Err(missing().into());
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let meta = &raw[start..offset];
            let body = &raw[offset + line.len()..];
            return Ok((meta, body));
        }
        offset += line.len();
    }
    Err(missing().into())
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_| ValidationError::unknown(field, value).into())
}

/// Minutes to read `text` at the configured pace, rounded up, at least one.
pub fn estimate_read_time(text: &str) -> u32 {
    let words = text.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// The first characters of the body, used when no excerpt is given.
pub fn default_excerpt(body: &str) -> String {
    body.trim().chars().take(EXCERPT_LENGTH).collect()
}

/// Parses one content file into a [`Post`], applying defaults for the
/// optional front matter keys.
pub fn parse_post(slug: &str, raw: &str) -> Result<Post> {
    let (meta, body) = split_front_matter(slug, raw)?;
    let front: FrontMatter =
        serde_yaml::from_str(meta).map_err(|e| ContentError::InvalidFrontMatter {
            file: slug.to_string(),
            message: e.to_string(),
        })?;

    let content = body.trim_start_matches(['\r', '\n']).to_string();
    let publish_date = parse_date("publishDate", &front.publish_date)?;
    let last_updated = front
        .last_updated
        .as_deref()
        .map(|d| parse_date("lastUpdated", d))
        .transpose()?;

    Ok(Post {
        slug: slug.to_string(),
        title: front.title,
        description: front.description,
        publish_date,
        last_updated,
        category: front
            .category
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        tags: front.tags,
        author: front.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        read_time: front
            .read_time
            .unwrap_or_else(|| estimate_read_time(&content)),
        featured: front.featured,
        image: front.image,
        excerpt: front.excerpt.unwrap_or_else(|| default_excerpt(&content)),
        cta_broker: front.cta_broker,
        cta_link: front.cta_link,
        cta_highlight: front.cta_highlight,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use tempfile::tempdir;

    const FULL: &str = r#"---
title: "Best Brokers for Beginners"
description: Low deposits & friendly platforms
publishDate: 2024-03-10
lastUpdated: 2024-04-01
category: Guides
tags: [beginners, "low deposit"]
author: Jane Doe
readTime: 7
featured: true
image: /images/beginners.png
excerpt: Start small.
ctaBroker: Example Markets
ctaLink: https://example.com/go
ctaHighlight: $10 minimum deposit
---

## Why it matters

Body text here.
"#;

    #[test]
    fn test_parse_full_front_matter() {
        let post = parse_post("best-brokers", FULL).unwrap();
        assert_eq!(post.slug, "best-brokers");
        assert_eq!(post.title, "Best Brokers for Beginners");
        assert_eq!(post.description, "Low deposits & friendly platforms");
        assert_eq!(post.publish_date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(post.last_updated, NaiveDate::from_ymd_opt(2024, 4, 1));
        assert_eq!(post.category, "Guides");
        assert_eq!(post.tags, vec!["beginners", "low deposit"]);
        assert_eq!(post.author, "Jane Doe");
        assert_eq!(post.read_time, 7);
        assert!(post.featured);
        assert_eq!(post.image.as_deref(), Some("/images/beginners.png"));
        assert_eq!(post.excerpt, "Start small.");
        assert_eq!(post.cta_broker.as_deref(), Some("Example Markets"));
        assert_eq!(post.cta_link.as_deref(), Some("https://example.com/go"));
        assert_eq!(post.cta_highlight.as_deref(), Some("$10 minimum deposit"));
        assert!(post.content.starts_with("## Why it matters"));
    }

    #[test]
    fn test_defaults_for_missing_optional_fields() {
        let words = vec!["word"; 401].join(" ");
        let raw = format!(
            "---\ntitle: Minimal\npublishDate: 2024-01-02T09:30:00Z\n---\n{}\n",
            words
        );
        let post = parse_post("minimal", &raw).unwrap();
        assert_eq!(post.author, DEFAULT_AUTHOR);
        assert_eq!(post.category, DEFAULT_CATEGORY);
        assert_eq!(post.read_time, 3);
        assert!(!post.featured);
        assert!(post.tags.is_empty());
        assert_eq!(post.description, "");
        assert_eq!(post.excerpt.chars().count(), EXCERPT_LENGTH);
        assert_eq!(post.publish_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }

    #[test]
    fn test_read_time_rounds_up() {
        assert_eq!(estimate_read_time(""), 1);
        assert_eq!(estimate_read_time(&vec!["w"; 200].join(" ")), 1);
        assert_eq!(estimate_read_time(&vec!["w"; 201].join(" ")), 2);
    }

    #[test]
    fn test_missing_front_matter_is_an_error() {
        let err = parse_post("plain", "# Just markdown\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Content(ContentError::MissingFrontMatter(_))
        ));

        let unterminated = parse_post("open", "---\ntitle: x\n");
        assert!(unterminated.is_err());
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let err = parse_post("untitled", "---\npublishDate: 2024-01-01\n---\nbody").unwrap_err();
        assert!(matches!(
            err,
            Error::Content(ContentError::InvalidFrontMatter { .. })
        ));
    }

    #[test]
    fn test_store_round_trip_by_slug() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("best-brokers.md"), FULL).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let store = FsPostStore::new(dir.path());

        let listed = store.list_posts().unwrap();
        assert_eq!(listed.len(), 1);

        let post = store.get_post("best-brokers").unwrap().unwrap();
        assert_eq!(post, listed[0]);
        assert_eq!(post, parse_post("best-brokers", FULL).unwrap());
    }

    #[test]
    fn test_store_lookup_of_unknown_or_unsafe_slug() {
        let dir = tempdir().unwrap();
        let store = FsPostStore::new(dir.path());
        assert!(store.get_post("missing").unwrap().is_none());
        assert!(store.get_post("../etc/passwd").unwrap().is_none());
        assert!(store.get_post("").unwrap().is_none());
    }

    #[test]
    fn test_every_listed_slug_can_be_fetched() {
        let dir = tempdir().unwrap();
        let body = "---\ntitle: T\npublishDate: 2024-01-01\n---\nBody\n";
        fs::write(dir.path().join("mt5-build-4.0-review.md"), body).unwrap();
        fs::write(dir.path().join("prop firms 2024.md"), body).unwrap();
        fs::write(dir.path().join(".draft.md"), body).unwrap();
        fs::write(dir.path().join("funded_accounts.mdx"), body).unwrap();
        let store = FsPostStore::new(dir.path());

        let mut slugs: Vec<String> = store
            .list_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        slugs.sort();
        assert_eq!(slugs, vec!["funded_accounts", "mt5-build-4.0-review"]);

        for slug in &slugs {
            let post = store.get_post(slug).unwrap();
            assert_eq!(post.map(|p| p.slug).as_deref(), Some(slug.as_str()));
        }
        assert!(store.get_post("prop firms 2024").unwrap().is_none());
    }

    #[test]
    fn test_slug_rules() {
        assert!(is_valid_slug("mt5-build-4.0-review"));
        assert!(is_valid_slug("funded_accounts"));
        assert!(!is_valid_slug("prop firms 2024"));
        assert!(!is_valid_slug(".draft"));
        assert!(!is_valid_slug("a..b"));
        assert!(!is_valid_slug("a/b"));
        assert!(!is_valid_slug("trailing."));
    }

    #[test]
    fn test_store_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let store = FsPostStore::new(dir.path().join("nope"));
        assert!(store.list_posts().is_err());
    }
}
