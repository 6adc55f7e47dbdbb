use std::collections::BTreeSet;
use std::fmt::Write;

use super::feeds_model::SiteConfig;
use crate::constants::SITEMAP_TAG_LIMIT;
use crate::posts::Post;
use crate::utils::escape::escape_xml;

/// Pages that exist regardless of content, with their change frequency and
/// priority.
pub const STATIC_ROUTES: [(&str, &str, &str); 5] = [
    ("/", "daily", "1.0"),
    ("/brokers", "daily", "0.9"),
    ("/prop-firms", "daily", "0.9"),
    ("/blog", "daily", "0.8"),
    ("/compare", "weekly", "0.7"),
];

pub const DISALLOWED_PREFIXES: [&str; 3] = ["/api/", "/admin/", "/_internal/"];

/// Sitemap of static routes, every post, every category and the first tags
/// in name order.
pub fn sitemap(site: &SiteConfig, posts: &[Post]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for (path, changefreq, priority) in STATIC_ROUTES {
        write_url(&mut xml, &site.url(path), None, changefreq, priority);
    }

    for post in posts {
        let lastmod = post.modified_date().format("%Y-%m-%d").to_string();
        write_url(
            &mut xml,
            &site.post_url(&post.slug),
            Some(&lastmod),
            "monthly",
            "0.7",
        );
    }

    let categories: BTreeSet<&str> = posts.iter().map(|p| p.category.as_str()).collect();
    for category in categories {
        write_url(&mut xml, &site.category_url(category), None, "weekly", "0.5");
    }

    let tags: BTreeSet<&str> = posts
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .collect();
    for tag in tags.into_iter().take(SITEMAP_TAG_LIMIT) {
        write_url(&mut xml, &site.tag_url(tag), None, "weekly", "0.4");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn write_url(xml: &mut String, loc: &str, lastmod: Option<&str>, changefreq: &str, priority: &str) {
    xml.push_str("<url>\n");
    let _ = writeln!(xml, "<loc>{}</loc>", escape_xml(loc));
    if let Some(lastmod) = lastmod {
        let _ = writeln!(xml, "<lastmod>{}</lastmod>", lastmod);
    }
    let _ = writeln!(xml, "<changefreq>{}</changefreq>", changefreq);
    let _ = writeln!(xml, "<priority>{}</priority>", priority);
    xml.push_str("</url>\n");
}

/// Crawler directives: keep internal prefixes out, let the feeds in.
pub fn robots_txt(site: &SiteConfig) -> String {
    let mut txt = String::from("User-agent: *\nAllow: /\n");
    for prefix in DISALLOWED_PREFIXES {
        let _ = writeln!(txt, "Disallow: {}", prefix);
    }
    txt.push_str("Allow: /feed.xml\nAllow: /feed.json\n\n");
    let _ = writeln!(txt, "Sitemap: {}", site.url("/sitemap.xml"));
    txt
}
