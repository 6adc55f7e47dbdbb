//! Minimal Markdown renderer for blog bodies.
//!
//! Handles headings, bullet and numbered items, paragraphs, bold spans and
//! links, one line at a time. It is not CommonMark.

mod blocks;
mod html;

pub use blocks::{render_blocks, render_inline, Block, Inline};
pub use html::{render_html, render_markdown};
