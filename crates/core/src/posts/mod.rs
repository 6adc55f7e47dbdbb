//! Posts module - blog content files, their metadata and lookups.

mod posts_loader;
mod posts_model;
mod posts_service;
mod posts_traits;

pub use posts_loader::{default_excerpt, estimate_read_time, is_valid_slug, parse_post, FsPostStore};
pub use posts_model::{Post, PostSummary};
pub use posts_service::{slugify, PostService};
pub use posts_traits::{PostServiceTrait, PostStoreTrait};
