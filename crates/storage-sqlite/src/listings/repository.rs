use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;
use diesel::SqliteConnection;
use log::debug;

use brokerdeck_core::constants::NO_FEE;
use brokerdeck_core::listings::{
    Broker, BrokerFilters, BrokerSortField, DepositRange, ListingRepositoryTrait, PropFirm,
    PropFirmFilters, PropFirmSortField, SortDirection,
};
use brokerdeck_core::Result;

use super::model::{BrokerDB, PropFirmDB};
use crate::db::get_connection;
use crate::errors::IntoCore;
use crate::schema::{brokers, prop_firms};

type BrokerPredicate = Box<dyn BoxableExpression<brokers::table, Sqlite, SqlType = Bool>>;

/// Read-only repository over the `brokers` and `prop_firms` tables.
pub struct ListingRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl ListingRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        ListingRepository { pool }
    }

    fn load_brokers(&self, filters: Option<&BrokerFilters>) -> Result<Vec<Broker>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = brokers::table.into_boxed();

        if let Some(filters) = filters {
            if !filters.countries.is_empty() {
                query = query.filter(brokers::country.eq_any(&filters.countries));
            }

            let mut ranges = filters.deposit_ranges.iter().map(deposit_range_predicate);
            if let Some(first) = ranges.next() {
                let any_range =
                    ranges.fold(first, |acc, next| -> BrokerPredicate { Box::new(acc.or(next)) });
                query = query.filter(any_range);
            }

            if filters.no_deposit_fee {
                query = query.filter(brokers::deposit_fee.eq(NO_FEE));
            }
            if filters.no_withdrawal_fee {
                query = query.filter(brokers::withdrawal_fee.eq(NO_FEE));
            }
            if filters.no_inactivity_fee {
                query = query.filter(brokers::inactivity_fee.eq(NO_FEE));
            }
        }

        // Featured rows always lead.
        query = query.order(brokers::featured.desc());
        query = match filters.and_then(|f| f.sort) {
            Some(sort) => match (sort.field, sort.direction) {
                (BrokerSortField::Name, SortDirection::Asc) => {
                    query.then_order_by(brokers::name.asc())
                }
                (BrokerSortField::Name, SortDirection::Desc) => {
                    query.then_order_by(brokers::name.desc())
                }
                (BrokerSortField::MinDeposit, SortDirection::Asc) => {
                    query.then_order_by(brokers::min_deposit.asc())
                }
                (BrokerSortField::MinDeposit, SortDirection::Desc) => {
                    query.then_order_by(brokers::min_deposit.desc())
                }
                (BrokerSortField::YearEstablished, SortDirection::Asc) => {
                    query.then_order_by(brokers::year_established.asc())
                }
                (BrokerSortField::YearEstablished, SortDirection::Desc) => {
                    query.then_order_by(brokers::year_established.desc())
                }
            },
            None => query.then_order_by(brokers::name.asc()),
        };
        // Stable output for equal sort keys.
        query = query.then_order_by(brokers::id.asc());

        let rows = query
            .select(BrokerDB::as_select())
            .load::<BrokerDB>(&mut conn)
            .into_core()?;
        debug!("Loaded {} broker rows", rows.len());

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let broker = Broker::try_from(row).into_core()?;
            // Array columns are matched after decoding.
            if filters.map_or(true, |f| f.matches(&broker)) {
                result.push(broker);
            }
        }
        Ok(result)
    }

    fn load_prop_firms(&self, filters: Option<&PropFirmFilters>) -> Result<Vec<PropFirm>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = prop_firms::table.into_boxed();

        if let Some(filters) = filters {
            if !filters.countries.is_empty() {
                query = query.filter(prop_firms::country.eq_any(&filters.countries));
            }
            if !filters.challenge_types.is_empty() {
                query = query.filter(prop_firms::challenge_type.eq_any(&filters.challenge_types));
            }
            if !filters.payout_frequencies.is_empty() {
                query = query
                    .filter(prop_firms::payout_frequency.eq_any(&filters.payout_frequencies));
            }
            if let Some(min) = filters.profit_split_min {
                query = query.filter(prop_firms::profit_split.ge(min));
            }
            if let Some(min) = filters.max_funding_min {
                query = query.filter(prop_firms::max_funding.ge(min));
            }
            if filters.ea_allowed {
                query = query.filter(prop_firms::ea_allowed.eq(true));
            }
            if filters.news_trading_allowed {
                query = query.filter(prop_firms::news_trading_allowed.eq(true));
            }
            if filters.weekend_holding_allowed {
                query = query.filter(prop_firms::weekend_holding_allowed.eq(true));
            }
            if filters.copy_trading_allowed {
                query = query.filter(prop_firms::copy_trading_allowed.eq(true));
            }
            if filters.swap_free {
                query = query.filter(prop_firms::swap_free.eq(true));
            }
        }

        query = query.order(prop_firms::featured.desc());
        query = match filters.and_then(|f| f.sort) {
            Some(sort) => match (sort.field, sort.direction) {
                (PropFirmSortField::Name, SortDirection::Asc) => {
                    query.then_order_by(prop_firms::name.asc())
                }
                (PropFirmSortField::Name, SortDirection::Desc) => {
                    query.then_order_by(prop_firms::name.desc())
                }
                (PropFirmSortField::YearEstablished, SortDirection::Asc) => {
                    query.then_order_by(prop_firms::year_established.asc())
                }
                (PropFirmSortField::YearEstablished, SortDirection::Desc) => {
                    query.then_order_by(prop_firms::year_established.desc())
                }
                (PropFirmSortField::ProfitSplit, SortDirection::Asc) => {
                    query.then_order_by(prop_firms::profit_split.asc())
                }
                (PropFirmSortField::ProfitSplit, SortDirection::Desc) => {
                    query.then_order_by(prop_firms::profit_split.desc())
                }
                (PropFirmSortField::MaxFunding, SortDirection::Asc) => {
                    query.then_order_by(prop_firms::max_funding.asc())
                }
                (PropFirmSortField::MaxFunding, SortDirection::Desc) => {
                    query.then_order_by(prop_firms::max_funding.desc())
                }
            },
            None => query.then_order_by(prop_firms::name.asc()),
        };
        query = query.then_order_by(prop_firms::id.asc());

        let rows = query
            .select(PropFirmDB::as_select())
            .load::<PropFirmDB>(&mut conn)
            .into_core()?;
        debug!("Loaded {} prop firm rows", rows.len());

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let firm = PropFirm::try_from(row).into_core()?;
            if filters.map_or(true, |f| f.matches(&firm)) {
                result.push(firm);
            }
        }
        Ok(result)
    }
}

/// SQL form of one deposit bucket.
fn deposit_range_predicate(range: &DepositRange) -> BrokerPredicate {
    let bounds = range.bounds();
    let lower: BrokerPredicate = if bounds.lower_inclusive {
        Box::new(brokers::min_deposit.ge(bounds.lower))
    } else {
        Box::new(brokers::min_deposit.gt(bounds.lower))
    };
    match bounds.upper {
        Some(upper) => Box::new(lower.and(brokers::min_deposit.le(upper))),
        None => lower,
    }
}

impl ListingRepositoryTrait for ListingRepository {
    fn search_brokers(&self, filters: &BrokerFilters) -> Result<Vec<Broker>> {
        self.load_brokers(Some(filters))
    }

    fn search_prop_firms(&self, filters: &PropFirmFilters) -> Result<Vec<PropFirm>> {
        self.load_prop_firms(Some(filters))
    }

    fn get_broker(&self, broker_id: &str) -> Result<Option<Broker>> {
        let mut conn = get_connection(&self.pool)?;
        let row = brokers::table
            .find(broker_id)
            .select(BrokerDB::as_select())
            .first::<BrokerDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(Broker::try_from)
            .transpose()
            .into_core()
    }

    fn get_prop_firm(&self, prop_firm_id: &str) -> Result<Option<PropFirm>> {
        let mut conn = get_connection(&self.pool)?;
        let row = prop_firms::table
            .find(prop_firm_id)
            .select(PropFirmDB::as_select())
            .first::<PropFirmDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(PropFirm::try_from)
            .transpose()
            .into_core()
    }

    fn list_brokers(&self) -> Result<Vec<Broker>> {
        self.load_brokers(None)
    }

    fn list_prop_firms(&self) -> Result<Vec<PropFirm>> {
        self.load_prop_firms(None)
    }
}
