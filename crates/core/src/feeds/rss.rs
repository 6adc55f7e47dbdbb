use std::fmt::Write;

use super::feeds_model::SiteConfig;
use crate::markdown::render_markdown;
use crate::posts::Post;
use crate::utils::escape::{cdata, escape_xml};
use crate::utils::time_utils::rfc822;

/// RSS 2.0 document with one `<item>` per post, in the order given.
pub fn rss_feed(site: &SiteConfig, posts: &[Post]) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(
        "<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\" \
         xmlns:content=\"http://purl.org/rss/1.0/modules/content/\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n",
    );
    xml.push_str("<channel>\n");
    let _ = writeln!(xml, "<title>{}</title>", escape_xml(&site.title));
    let _ = writeln!(xml, "<link>{}</link>", escape_xml(&site.url("/")));
    let _ = writeln!(
        xml,
        "<description>{}</description>",
        escape_xml(&site.description)
    );
    let _ = writeln!(xml, "<language>{}</language>", escape_xml(&site.language));
    if let Some(latest) = posts.iter().map(Post::modified_date).max() {
        let _ = writeln!(xml, "<lastBuildDate>{}</lastBuildDate>", rfc822(latest));
    }
    let _ = writeln!(
        xml,
        "<atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>",
        escape_xml(&site.url("/feed.xml"))
    );

    for post in posts {
        write_item(&mut xml, site, post);
    }

    xml.push_str("</channel>\n</rss>\n");
    xml
}

fn write_item(xml: &mut String, site: &SiteConfig, post: &Post) {
    let link = escape_xml(&site.post_url(&post.slug));
    xml.push_str("<item>\n");
    let _ = writeln!(xml, "<title>{}</title>", escape_xml(&post.title));
    let _ = writeln!(xml, "<link>{}</link>", link);
    let _ = writeln!(xml, "<guid isPermaLink=\"true\">{}</guid>", link);
    let _ = writeln!(
        xml,
        "<description>{}</description>",
        escape_xml(&post.description)
    );
    let _ = writeln!(xml, "<pubDate>{}</pubDate>", rfc822(post.publish_date));
    let _ = writeln!(xml, "<category>{}</category>", escape_xml(&post.category));
    // `<author>` must be an email address; names go in `dc:creator`.
    let _ = writeln!(xml, "<dc:creator>{}</dc:creator>", escape_xml(&post.author));
    let _ = writeln!(
        xml,
        "<content:encoded>{}</content:encoded>",
        cdata(&render_markdown(&post.content))
    );
    xml.push_str("</item>\n");
}
