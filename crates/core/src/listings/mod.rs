//! Listings module - brokers and prop firms, their filters and ordering.

mod listings_filters;
mod listings_model;
mod listings_service;
mod listings_traits;
mod shuffle;

pub use listings_filters::*;
pub use listings_model::*;
pub use listings_service::ListingService;
pub use listings_traits::{ListingRepositoryTrait, ListingServiceTrait};
pub use shuffle::{fisher_yates, SeededShuffle, ShuffleSource, ThreadRngShuffle};
