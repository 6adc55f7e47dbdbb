use crate::errors::Result;
use crate::posts::posts_model::Post;

/// Trait for reading posts from wherever content lives.
pub trait PostStoreTrait: Send + Sync {
    /// Every post, in no particular order. Fails if any file fails.
    fn list_posts(&self) -> Result<Vec<Post>>;
    /// A single post, `None` when no file carries that slug.
    fn get_post(&self, slug: &str) -> Result<Option<Post>>;
}

/// Trait for post service operations. Failures are logged and answered with
/// empty results.
pub trait PostServiceTrait: Send + Sync {
    fn get_all_posts(&self) -> Vec<Post>;
    fn get_post_by_slug(&self, slug: &str) -> Option<Post>;
    fn get_featured_posts(&self) -> Vec<Post>;
    fn get_categories(&self) -> Vec<String>;
    fn get_tags(&self) -> Vec<String>;
    fn get_posts_by_category(&self, category: &str) -> Vec<Post>;
    fn get_posts_by_tag(&self, tag: &str) -> Vec<Post>;
    fn get_related_posts(&self, slug: &str, limit: usize) -> Vec<Post>;
}
