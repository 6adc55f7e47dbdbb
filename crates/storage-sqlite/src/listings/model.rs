//! Database models for listings.

use diesel::prelude::*;
use serde::de::DeserializeOwned;

use brokerdeck_core::listings::{Broker, PropFirm};

use crate::errors::StorageError;

/// Database model for brokers
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::brokers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BrokerDB {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub description: String,
    pub tags: String,
    pub asset_types: String,
    pub affiliate_url: String,
    pub country: String,
    pub country_code: String,
    pub year_established: i32,
    pub featured: bool,
    pub video_url: Option<String>,
    pub min_deposit: f64,
    pub deposit_fee: String,
    pub withdrawal_fee: String,
    pub inactivity_fee: String,
    pub leverage: String,
    pub regulation: String,
}

/// Database model for prop firms
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::prop_firms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PropFirmDB {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub description: String,
    pub tags: String,
    pub asset_types: String,
    pub affiliate_url: String,
    pub country: String,
    pub country_code: String,
    pub year_established: i32,
    pub featured: bool,
    pub video_url: Option<String>,
    pub challenge_type: String,
    pub challenge_fee: f64,
    pub challenge_fee_refundable: bool,
    pub phase1_profit_target: f64,
    pub phase2_profit_target: Option<f64>,
    pub max_funding: f64,
    pub profit_split: f64,
    pub scaled_profit_split: Option<f64>,
    pub max_daily_drawdown: f64,
    pub max_total_drawdown: f64,
    pub drawdown_type: String,
    pub min_trading_days: i32,
    pub max_trading_days: Option<i32>,
    pub payout_frequency: String,
    pub ea_allowed: bool,
    pub news_trading_allowed: bool,
    pub weekend_holding_allowed: bool,
    pub copy_trading_allowed: bool,
    pub swap_free: bool,
    pub consistency_rule: bool,
}

/// Array columns are JSON text.
fn decode_array<T: DeserializeOwned>(
    table: &str,
    column: &str,
    raw: &str,
) -> Result<Vec<T>, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::decode(&format!("{}.{}", table, column), e))
}

// Conversion to domain models
impl TryFrom<BrokerDB> for Broker {
    type Error = StorageError;

    fn try_from(db: BrokerDB) -> Result<Self, Self::Error> {
        Ok(Self {
            tags: decode_array("brokers", "tags", &db.tags)?,
            asset_types: decode_array("brokers", "asset_types", &db.asset_types)?,
            id: db.id,
            name: db.name,
            logo_url: db.logo_url,
            description: db.description,
            affiliate_url: db.affiliate_url,
            country: db.country,
            country_code: db.country_code,
            year_established: db.year_established,
            featured: db.featured,
            video_url: db.video_url,
            min_deposit: db.min_deposit,
            deposit_fee: db.deposit_fee,
            withdrawal_fee: db.withdrawal_fee,
            inactivity_fee: db.inactivity_fee,
            leverage: db.leverage,
            regulation: db.regulation,
        })
    }
}

impl TryFrom<PropFirmDB> for PropFirm {
    type Error = StorageError;

    fn try_from(db: PropFirmDB) -> Result<Self, Self::Error> {
        Ok(Self {
            tags: decode_array("prop_firms", "tags", &db.tags)?,
            asset_types: decode_array("prop_firms", "asset_types", &db.asset_types)?,
            id: db.id,
            name: db.name,
            logo_url: db.logo_url,
            description: db.description,
            affiliate_url: db.affiliate_url,
            country: db.country,
            country_code: db.country_code,
            year_established: db.year_established,
            featured: db.featured,
            video_url: db.video_url,
            challenge_type: db.challenge_type,
            challenge_fee: db.challenge_fee,
            challenge_fee_refundable: db.challenge_fee_refundable,
            phase1_profit_target: db.phase1_profit_target,
            phase2_profit_target: db.phase2_profit_target,
            max_funding: db.max_funding,
            profit_split: db.profit_split,
            scaled_profit_split: db.scaled_profit_split,
            max_daily_drawdown: db.max_daily_drawdown,
            max_total_drawdown: db.max_total_drawdown,
            drawdown_type: db.drawdown_type,
            min_trading_days: db.min_trading_days,
            max_trading_days: db.max_trading_days,
            payout_frequency: db.payout_frequency,
            ea_allowed: db.ea_allowed,
            news_trading_allowed: db.news_trading_allowed,
            weekend_holding_allowed: db.weekend_holding_allowed,
            copy_trading_allowed: db.copy_trading_allowed,
            swap_free: db.swap_free,
            consistency_rule: db.consistency_rule,
        })
    }
}
