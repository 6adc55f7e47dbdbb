//! Listing domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::NO_FEE;
use crate::errors::ValidationError;

/// Market a listing lets clients trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Forex,
    Crypto,
    Stocks,
    Commodities,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Forex => "forex",
            AssetType::Crypto => "crypto",
            AssetType::Stocks => "stocks",
            AssetType::Commodities => "commodities",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forex" => Ok(AssetType::Forex),
            "crypto" => Ok(AssetType::Crypto),
            "stocks" => Ok(AssetType::Stocks),
            "commodities" => Ok(AssetType::Commodities),
            other => Err(ValidationError::unknown("assetTypes", other)),
        }
    }
}

/// Which table a request is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListingKind {
    Broker,
    PropFirm,
}

/// Domain model representing a forex broker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub asset_types: Vec<AssetType>,
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

impl Broker {
    pub fn has_no_deposit_fee(&self) -> bool {
        self.deposit_fee == NO_FEE
    }

    pub fn has_no_withdrawal_fee(&self) -> bool {
        self.withdrawal_fee == NO_FEE
    }

    pub fn has_no_inactivity_fee(&self) -> bool {
        self.inactivity_fee == NO_FEE
    }
}

/// Domain model representing a proprietary trading firm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropFirm {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub asset_types: Vec<AssetType>,
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

/// Fields shared by every listing, used by ordering and option building.
pub trait Listing {
    fn featured(&self) -> bool;
    fn country(&self) -> &str;
    fn tags(&self) -> &[String];
    fn asset_types(&self) -> &[AssetType];
}

macro_rules! impl_listing {
    ($ty:ty) => {
        impl Listing for $ty {
            fn featured(&self) -> bool {
                self.featured
            }
            fn country(&self) -> &str {
                &self.country
            }
            fn tags(&self) -> &[String] {
                &self.tags
            }
            fn asset_types(&self) -> &[AssetType] {
                &self.asset_types
            }
        }
    };
}

impl_listing!(Broker);
impl_listing!(PropFirm);

/// Distinct values present across a listing table, for building filter widgets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub asset_types: Vec<String>,
    pub countries: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_frequencies: Option<Vec<String>>,
}
