//! Market data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bond from the built-in catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BondListing {
    pub isin: String,
    pub name: String,
    pub company: String,
    pub coupon_rate: Decimal,
    pub face_value: Decimal,
    pub maturity_date: NaiveDate,
    pub credit_rating: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundSearchResult {
    pub scheme_code: String,
    pub scheme_name: String,
}

/// Latest NAV of a mutual fund scheme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundQuote {
    pub scheme_code: String,
    pub scheme_name: String,
    pub fund_house: Option<String>,
    pub nav: Decimal,
    /// NAV of the preceding published day, when there is one.
    pub previous_nav: Option<Decimal>,
    pub nav_date: NaiveDate,
}
