use log::{debug, error};
use std::collections::BTreeSet;
use std::sync::Arc;

use super::listings_filters::{BrokerFilters, PropFirmFilters};
use super::listings_model::{Broker, FilterOptions, Listing, ListingKind, PropFirm};
use super::listings_traits::{ListingRepositoryTrait, ListingServiceTrait};
use super::shuffle::{fisher_yates, ShuffleSource};
use crate::errors::Result;

pub struct ListingService {
    repository: Arc<dyn ListingRepositoryTrait>,
    shuffle: Arc<dyn ShuffleSource>,
}

impl ListingService {
    pub fn new(
        repository: Arc<dyn ListingRepositoryTrait>,
        shuffle: Arc<dyn ShuffleSource>,
    ) -> Self {
        Self {
            repository,
            shuffle,
        }
    }

    /// Moves featured rows to the front, keeping the incoming relative order.
    /// Without an explicit sort the remaining rows are shuffled.
    fn arrange<T: Listing>(&self, rows: Vec<T>, sorted: bool) -> Vec<T> {
        let (mut featured, mut rest): (Vec<T>, Vec<T>) =
            rows.into_iter().partition(|row| row.featured());
        if !sorted {
            fisher_yates(&mut rest, self.shuffle.as_ref());
        }
        featured.append(&mut rest);
        featured
    }
}

impl ListingServiceTrait for ListingService {
    fn try_search_brokers(&self, filters: &BrokerFilters) -> Result<Vec<Broker>> {
        let rows = self.repository.search_brokers(filters)?;
        debug!("Broker search matched {} rows", rows.len());
        Ok(self.arrange(rows, filters.sort.is_some()))
    }

    fn try_search_prop_firms(&self, filters: &PropFirmFilters) -> Result<Vec<PropFirm>> {
        let rows = self.repository.search_prop_firms(filters)?;
        debug!("Prop firm search matched {} rows", rows.len());
        Ok(self.arrange(rows, filters.sort.is_some()))
    }

    fn search_brokers(&self, filters: &BrokerFilters) -> Vec<Broker> {
        self.try_search_brokers(filters).unwrap_or_else(|e| {
            error!("Error fetching brokers: {}", e);
            Vec::new()
        })
    }

    fn search_prop_firms(&self, filters: &PropFirmFilters) -> Vec<PropFirm> {
        self.try_search_prop_firms(filters).unwrap_or_else(|e| {
            error!("Error fetching prop firms: {}", e);
            Vec::new()
        })
    }

    fn get_broker(&self, broker_id: &str) -> Option<Broker> {
        self.repository.get_broker(broker_id).unwrap_or_else(|e| {
            error!("Error fetching broker {}: {}", broker_id, e);
            None
        })
    }

    fn get_prop_firm(&self, prop_firm_id: &str) -> Option<PropFirm> {
        self.repository
            .get_prop_firm(prop_firm_id)
            .unwrap_or_else(|e| {
                error!("Error fetching prop firm {}: {}", prop_firm_id, e);
                None
            })
    }

    fn get_filter_options(&self, kind: ListingKind) -> FilterOptions {
        let options = match kind {
            ListingKind::Broker => self
                .repository
                .list_brokers()
                .map(|rows| collect_common_options(&rows)),
            ListingKind::PropFirm => self.repository.list_prop_firms().map(|rows| {
                let mut options = collect_common_options(&rows);
                options.challenge_types = Some(sorted_distinct(
                    rows.iter().map(|r| r.challenge_type.as_str()),
                ));
                options.payout_frequencies = Some(sorted_distinct(
                    rows.iter().map(|r| r.payout_frequency.as_str()),
                ));
                options
            }),
        };
        options.unwrap_or_else(|e| {
            error!("Error fetching filter options for {:?}: {}", kind, e);
            FilterOptions::default()
        })
    }
}

fn collect_common_options<T: Listing>(rows: &[T]) -> FilterOptions {
    FilterOptions {
        asset_types: sorted_distinct(
            rows.iter()
                .flat_map(|r| r.asset_types().iter().map(|a| a.as_str())),
        ),
        countries: sorted_distinct(rows.iter().map(|r| r.country())),
        tags: sorted_distinct(rows.iter().flat_map(|r| r.tags().iter().map(String::as_str))),
        challenge_types: None,
        payout_frequencies: None,
    }
}

fn sorted_distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
