use super::blocks::{render_blocks, Block, Inline};
use crate::utils::escape::escape_xml;

#[derive(PartialEq, Clone, Copy)]
enum ListKind {
    Bullet,
    Numbered,
}

/// Renders blocks as an HTML fragment. Consecutive items share one list
/// element; numbered items keep their source number via `value`.
pub fn render_html(blocks: &[Block]) -> String {
    let mut html = String::new();
    let mut open: Option<ListKind> = None;

    for block in blocks {
        let kind = match block {
            Block::BulletItem { .. } => Some(ListKind::Bullet),
            Block::NumberedItem { .. } => Some(ListKind::Numbered),
            _ => None,
        };
        if open != kind {
            close_list(&mut html, open);
            match kind {
                Some(ListKind::Bullet) => html.push_str("<ul>"),
                Some(ListKind::Numbered) => html.push_str("<ol>"),
                None => {}
            }
            open = kind;
        }

        match block {
            Block::Heading { level, content } => {
                html.push_str(&format!("<h{0}>{1}</h{0}>", level, inline_html(content)));
            }
            Block::BulletItem { content } => {
                html.push_str(&format!("<li>{}</li>", inline_html(content)));
            }
            Block::NumberedItem { number, content } => {
                html.push_str(&format!(
                    "<li value=\"{}\">{}</li>",
                    escape_xml(number),
                    inline_html(content)
                ));
            }
            Block::Paragraph { content } => {
                html.push_str(&format!("<p>{}</p>", inline_html(content)));
            }
        }
    }
    close_list(&mut html, open);
    html
}

/// Body text straight to HTML.
pub fn render_markdown(body: &str) -> String {
    render_html(&render_blocks(body))
}

fn close_list(html: &mut String, open: Option<ListKind>) {
    match open {
        Some(ListKind::Bullet) => html.push_str("</ul>"),
        Some(ListKind::Numbered) => html.push_str("</ol>"),
        None => {}
    }
}

fn inline_html(spans: &[Inline]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Inline::Text { text } => escape_xml(text),
            Inline::Bold { text } => format!("<strong>{}</strong>", escape_xml(text)),
            Inline::Link { label, url } if is_safe_url(url) => format!(
                "<a href=\"{}\">{}</a>",
                escape_xml(url),
                escape_xml(label)
            ),
            // Links with any other scheme keep only their label.
            Inline::Link { label, .. } => escape_xml(label),
        })
        .collect()
}

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Relative URLs and `http`, `https` or `mailto` links.
fn is_safe_url(url: &str) -> bool {
    let Some(colon) = url.find(':') else {
        return true;
    };
    // A `:` after the first path, query or fragment delimiter is not a scheme.
    if url[..colon].contains(|c| matches!(c, '/' | '?' | '#')) {
        return true;
    }
    let scheme = url[..colon].to_ascii_lowercase();
    ALLOWED_SCHEMES.contains(&scheme.as_str())
}
