use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\.\s+(.*)$").expect("valid numbered item pattern"));

// Bold and link alternatives are scanned together left to right. Neither
// nests: `**[a](u)**` is bold with literal link text, and `[**a**](u)` loses
// the link because the bold span is claimed first.
static INLINE_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*(.+?)\*\*|\[([^\]]+)\]\(([^)\s]+)\)").expect("valid inline span pattern")
});

/// Inline content of a block, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text { text: String },
    Bold { text: String },
    Link { label: String, url: String },
}

/// One rendered line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    BulletItem { content: Vec<Inline> },
    NumberedItem { number: String, content: Vec<Inline> },
    Paragraph { content: Vec<Inline> },
}

/// Converts a body into blocks, one per non-blank line.
pub fn render_blocks(body: &str) -> Vec<Block> {
    body.lines().filter_map(render_line).collect()
}

fn render_line(line: &str) -> Option<Block> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    // Longest heading marker first.
    for (marker, level) in [("### ", 3u8), ("## ", 2), ("# ", 1)] {
        if let Some(text) = line.strip_prefix(marker) {
            return Some(Block::Heading {
                level,
                content: render_inline(text),
            });
        }
    }

    if let Some(text) = line.strip_prefix("- ") {
        return Some(Block::BulletItem {
            content: render_inline(text),
        });
    }

    if let Some(caps) = NUMBERED_ITEM.captures(line) {
        return Some(Block::NumberedItem {
            number: caps[1].to_string(),
            content: render_inline(&caps[2]),
        });
    }

    Some(Block::Paragraph {
        content: render_inline(line),
    })
}

/// Splits a line into text, bold and link spans.
pub fn render_inline(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in INLINE_SPAN.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            spans.push(Inline::Text {
                text: text[last..whole.start()].to_string(),
            });
        }
        if let Some(bold) = caps.get(1) {
            spans.push(Inline::Bold {
                text: bold.as_str().to_string(),
            });
        } else if let (Some(label), Some(url)) = (caps.get(2), caps.get(3)) {
            spans.push(Inline::Link {
                label: label.as_str().to_string(),
                url: url.as_str().to_string(),
            });
        }
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Inline::Text {
            text: text[last..].to_string(),
        });
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text {
            text: s.to_string(),
        }
    }

    #[test]
    fn test_heading_levels() {
        let blocks = render_blocks("# One\n## Title\n### Three\n#### Four");
        assert_eq!(
            blocks[1],
            Block::Heading {
                level: 2,
                content: vec![text("Title")],
            }
        );
        assert!(matches!(blocks[0], Block::Heading { level: 1, .. }));
        assert!(matches!(blocks[2], Block::Heading { level: 3, .. }));
        // Four hashes is not a heading marker.
        assert!(matches!(blocks[3], Block::Paragraph { .. }));
    }

    #[test]
    fn test_bullet_with_bold_and_link() {
        let blocks = render_blocks("- **Bold** item [text](http://x)");
        assert_eq!(
            blocks,
            vec![Block::BulletItem {
                content: vec![
                    Inline::Bold {
                        text: "Bold".to_string()
                    },
                    text(" item "),
                    Inline::Link {
                        label: "text".to_string(),
                        url: "http://x".to_string()
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_numbered_items_keep_source_numbers() {
        let blocks = render_blocks("1. First\n7. Seventh\n10.No space");
        assert_eq!(
            blocks[1],
            Block::NumberedItem {
                number: "7".to_string(),
                content: vec![text("Seventh")],
            }
        );
        assert!(matches!(blocks[2], Block::Paragraph { .. }));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let blocks = render_blocks("First paragraph\n\n   \nSecond paragraph\n");
        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| matches!(b, Block::Paragraph { .. })));
    }

    #[test]
    fn test_spans_do_not_nest() {
        assert_eq!(
            render_inline("**[a](http://u)**"),
            vec![Inline::Bold {
                text: "[a](http://u)".to_string()
            }]
        );
        assert_eq!(
            render_inline("[**a**](http://u)"),
            vec![
                text("["),
                Inline::Bold {
                    text: "a".to_string()
                },
                text("](http://u)"),
            ]
        );
    }

    #[test]
    fn test_unclosed_markers_stay_text() {
        assert_eq!(render_inline("2 ** 3 [x]"), vec![text("2 ** 3 [x]")]);
    }
}
