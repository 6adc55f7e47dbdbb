/// Fee descriptor meaning the broker charges nothing
pub const NO_FEE: &str = "None";

/// Words per minute used to estimate read time
pub const WORDS_PER_MINUTE: usize = 200;

/// Length of the generated post excerpt, in characters
pub const EXCERPT_LENGTH: usize = 160;

/// Author used when a post does not name one
pub const DEFAULT_AUTHOR: &str = "BrokerDeck Team";

/// Category used when a post does not name one
pub const DEFAULT_CATEGORY: &str = "General";

/// Number of tags listed in the sitemap
pub const SITEMAP_TAG_LIMIT: usize = 20;

/// Content file extensions recognised by the post loader
pub const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];
