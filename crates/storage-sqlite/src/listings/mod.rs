//! SQLite storage implementation for brokers and prop firms.

mod model;
mod repository;

pub use model::{BrokerDB, PropFirmDB};
pub use repository::ListingRepository;
