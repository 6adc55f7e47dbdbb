//! Typed filters for the listing endpoints.
//!
//! Query strings arrive as loose comma-joined strings. They are parsed exactly
//! once, here, into [`BrokerFilters`] / [`PropFirmFilters`]; everything past
//! this point works with validated values only.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::listings_model::{AssetType, Broker, PropFirm};
use crate::errors::{Result, ValidationError};

/// Raw query parameters as they arrive on a listing request.
///
/// Multi-valued parameters are comma-joined (`assetTypes=forex,crypto`) and
/// boolean flags are only set by the literal `"true"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    pub asset_types: Option<String>,
    pub min_deposit_ranges: Option<String>,
    pub countries: Option<String>,
    pub tags: Option<String>,
    pub no_deposit_fee: Option<String>,
    pub no_withdrawal_fee: Option<String>,
    pub no_inactivity_fee: Option<String>,
    pub challenge_types: Option<String>,
    pub payout_frequencies: Option<String>,
    pub profit_split_min: Option<String>,
    pub max_funding_min: Option<String>,
    pub ea_allowed: Option<String>,
    pub news_trading: Option<String>,
    pub weekend_holding: Option<String>,
    pub copy_trading: Option<String>,
    pub swap_free: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Named minimum-deposit bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepositRange {
    /// `0-50`: 0 ≤ x ≤ 50
    #[serde(rename = "0-50")]
    UpTo50,
    /// `50-100`: 50 < x ≤ 100
    #[serde(rename = "50-100")]
    From50To100,
    /// `100-500`: 100 < x ≤ 500
    #[serde(rename = "100-500")]
    From100To500,
    /// `500+`: x > 500
    #[serde(rename = "500+")]
    Over500,
}

/// Numeric interval a [`DepositRange`] stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositBounds {
    pub lower: f64,
    pub lower_inclusive: bool,
    pub upper: Option<f64>,
}

impl DepositRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositRange::UpTo50 => "0-50",
            DepositRange::From50To100 => "50-100",
            DepositRange::From100To500 => "100-500",
            DepositRange::Over500 => "500+",
        }
    }

    pub fn bounds(&self) -> DepositBounds {
        match self {
            DepositRange::UpTo50 => DepositBounds {
                lower: 0.0,
                lower_inclusive: true,
                upper: Some(50.0),
            },
            DepositRange::From50To100 => DepositBounds {
                lower: 50.0,
                lower_inclusive: false,
                upper: Some(100.0),
            },
            DepositRange::From100To500 => DepositBounds {
                lower: 100.0,
                lower_inclusive: false,
                upper: Some(500.0),
            },
            DepositRange::Over500 => DepositBounds {
                lower: 500.0,
                lower_inclusive: false,
                upper: None,
            },
        }
    }

    pub fn contains(&self, amount: f64) -> bool {
        let b = self.bounds();
        let above = if b.lower_inclusive {
            amount >= b.lower
        } else {
            amount > b.lower
        };
        above && b.upper.map_or(true, |upper| amount <= upper)
    }
}

impl FromStr for DepositRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "0-50" => Ok(DepositRange::UpTo50),
            "50-100" => Ok(DepositRange::From50To100),
            "100-500" => Ok(DepositRange::From100To500),
            "500+" => Ok(DepositRange::Over500),
            other => Err(ValidationError::unknown("minDepositRanges", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(ValidationError::unknown("sortOrder", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrokerSortField {
    Name,
    MinDeposit,
    YearEstablished,
}

impl FromStr for BrokerSortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(BrokerSortField::Name),
            "minDeposit" => Ok(BrokerSortField::MinDeposit),
            "yearEstablished" => Ok(BrokerSortField::YearEstablished),
            other => Err(ValidationError::unknown("sortBy", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropFirmSortField {
    Name,
    YearEstablished,
    ProfitSplit,
    MaxFunding,
}

impl FromStr for PropFirmSortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(PropFirmSortField::Name),
            "yearEstablished" => Ok(PropFirmSortField::YearEstablished),
            "profitSplit" => Ok(PropFirmSortField::ProfitSplit),
            "maxFunding" => Ok(PropFirmSortField::MaxFunding),
            other => Err(ValidationError::unknown("sortBy", other)),
        }
    }
}

/// An explicit single-column ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Filters for the broker table. `Default` selects everything in random order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrokerFilters {
    pub asset_types: Vec<AssetType>,
    pub deposit_ranges: Vec<DepositRange>,
    pub countries: Vec<String>,
    pub tags: Vec<String>,
    pub no_deposit_fee: bool,
    pub no_withdrawal_fee: bool,
    pub no_inactivity_fee: bool,
    pub sort: Option<Sort<BrokerSortField>>,
}

impl BrokerFilters {
    pub fn from_query(query: &ListingQuery) -> Result<Self> {
        Ok(Self {
            asset_types: parse_each(&query.asset_types)?,
            deposit_ranges: parse_each(&query.min_deposit_ranges)?,
            countries: split_list(&query.countries),
            tags: split_list(&query.tags),
            no_deposit_fee: flag(&query.no_deposit_fee),
            no_withdrawal_fee: flag(&query.no_withdrawal_fee),
            no_inactivity_fee: flag(&query.no_inactivity_fee),
            sort: parse_sort(&query.sort_by, &query.sort_order)?,
        })
    }

    /// Whether `broker` satisfies every selected dimension.
    pub fn matches(&self, broker: &Broker) -> bool {
        any_selected(&self.asset_types, &broker.asset_types)
            && any_selected(&self.tags, &broker.tags)
            && member(&self.countries, &broker.country)
            && (self.deposit_ranges.is_empty()
                || self
                    .deposit_ranges
                    .iter()
                    .any(|range| range.contains(broker.min_deposit)))
            && (!self.no_deposit_fee || broker.has_no_deposit_fee())
            && (!self.no_withdrawal_fee || broker.has_no_withdrawal_fee())
            && (!self.no_inactivity_fee || broker.has_no_inactivity_fee())
    }
}

/// Filters for the prop firm table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropFirmFilters {
    pub asset_types: Vec<AssetType>,
    pub countries: Vec<String>,
    pub tags: Vec<String>,
    pub challenge_types: Vec<String>,
    pub payout_frequencies: Vec<String>,
    pub profit_split_min: Option<f64>,
    pub max_funding_min: Option<f64>,
    pub ea_allowed: bool,
    pub news_trading_allowed: bool,
    pub weekend_holding_allowed: bool,
    pub copy_trading_allowed: bool,
    pub swap_free: bool,
    pub sort: Option<Sort<PropFirmSortField>>,
}

impl PropFirmFilters {
    pub fn from_query(query: &ListingQuery) -> Result<Self> {
        Ok(Self {
            asset_types: parse_each(&query.asset_types)?,
            countries: split_list(&query.countries),
            tags: split_list(&query.tags),
            challenge_types: split_list(&query.challenge_types),
            payout_frequencies: split_list(&query.payout_frequencies),
            profit_split_min: parse_min("profitSplitMin", &query.profit_split_min)?,
            max_funding_min: parse_min("maxFundingMin", &query.max_funding_min)?,
            ea_allowed: flag(&query.ea_allowed),
            news_trading_allowed: flag(&query.news_trading),
            weekend_holding_allowed: flag(&query.weekend_holding),
            copy_trading_allowed: flag(&query.copy_trading),
            swap_free: flag(&query.swap_free),
            sort: parse_sort(&query.sort_by, &query.sort_order)?,
        })
    }

    pub fn matches(&self, firm: &PropFirm) -> bool {
        any_selected(&self.asset_types, &firm.asset_types)
            && any_selected(&self.tags, &firm.tags)
            && member(&self.countries, &firm.country)
            && member(&self.challenge_types, &firm.challenge_type)
            && member(&self.payout_frequencies, &firm.payout_frequency)
            && self.profit_split_min.map_or(true, |min| firm.profit_split >= min)
            && self.max_funding_min.map_or(true, |min| firm.max_funding >= min)
            && (!self.ea_allowed || firm.ea_allowed)
            && (!self.news_trading_allowed || firm.news_trading_allowed)
            && (!self.weekend_holding_allowed || firm.weekend_holding_allowed)
            && (!self.copy_trading_allowed || firm.copy_trading_allowed)
            && (!self.swap_free || firm.swap_free)
    }
}

/// Splits a comma-joined parameter, dropping blanks and repeats.
fn split_list(raw: &Option<String>) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for part in raw.as_deref().unwrap_or("").split(',') {
        let part = part.trim();
        if !part.is_empty() && !values.iter().any(|v| v == part) {
            values.push(part.to_string());
        }
    }
    values
}

fn parse_each<T>(raw: &Option<String>) -> Result<Vec<T>>
where
    T: FromStr<Err = ValidationError> + PartialEq,
{
    let mut parsed: Vec<T> = Vec::new();
    for value in split_list(raw) {
        let item = value.parse::<T>()?;
        if !parsed.contains(&item) {
            parsed.push(item);
        }
    }
    Ok(parsed)
}

fn flag(raw: &Option<String>) -> bool {
    raw.as_deref() == Some("true")
}

fn parse_min(field: &str, raw: &Option<String>) -> Result<Option<f64>> {
    let Some(value) = raw.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let parsed: f64 = value
        .parse()
        .map_err(|_| ValidationError::unknown(field, value))?;
    if !parsed.is_finite() {
        return Err(ValidationError::unknown(field, value).into());
    }
    Ok(Some(parsed))
}

fn parse_sort<F>(sort_by: &Option<String>, sort_order: &Option<String>) -> Result<Option<Sort<F>>>
where
    F: FromStr<Err = ValidationError>,
{
    let Some(field) = sort_by.as_deref().map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let direction = match sort_order.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(order) => order.parse()?,
        None => SortDirection::default(),
    };
    Ok(Some(Sort {
        field: field.parse()?,
        direction,
    }))
}

fn any_selected<T: PartialEq>(selected: &[T], values: &[T]) -> bool {
    selected.is_empty() || values.iter().any(|v| selected.contains(v))
}

fn member(selected: &[String], value: &str) -> bool {
    selected.is_empty() || selected.iter().any(|s| s == value)
}
