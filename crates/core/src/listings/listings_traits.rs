use crate::errors::Result;
use crate::listings::listings_filters::{BrokerFilters, PropFirmFilters};
use crate::listings::listings_model::{Broker, FilterOptions, ListingKind, PropFirm};

/// Trait for listing repository operations.
///
/// Search results come back featured rows first, then ordered by the
/// requested sort column, or by name when the filters carry no sort.
pub trait ListingRepositoryTrait: Send + Sync {
    fn search_brokers(&self, filters: &BrokerFilters) -> Result<Vec<Broker>>;
    fn search_prop_firms(&self, filters: &PropFirmFilters) -> Result<Vec<PropFirm>>;
    fn get_broker(&self, broker_id: &str) -> Result<Option<Broker>>;
    fn get_prop_firm(&self, prop_firm_id: &str) -> Result<Option<PropFirm>>;
    fn list_brokers(&self) -> Result<Vec<Broker>>;
    fn list_prop_firms(&self) -> Result<Vec<PropFirm>>;
}

/// Trait for listing service operations.
///
/// The `try_` methods surface data store failures; the others log them and
/// answer with an empty result.
pub trait ListingServiceTrait: Send + Sync {
    fn try_search_brokers(&self, filters: &BrokerFilters) -> Result<Vec<Broker>>;
    fn try_search_prop_firms(&self, filters: &PropFirmFilters) -> Result<Vec<PropFirm>>;
    fn search_brokers(&self, filters: &BrokerFilters) -> Vec<Broker>;
    fn search_prop_firms(&self, filters: &PropFirmFilters) -> Vec<PropFirm>;
    fn get_broker(&self, broker_id: &str) -> Option<Broker>;
    fn get_prop_firm(&self, prop_firm_id: &str) -> Option<PropFirm>;
    fn get_filter_options(&self, kind: ListingKind) -> FilterOptions;
}
