//! BrokerDeck Core - Domain entities, services, and traits.
//!
//! This crate contains the listing, blog and syndication logic for BrokerDeck.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod feeds;
pub mod listings;
pub mod markdown;
pub mod posts;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
