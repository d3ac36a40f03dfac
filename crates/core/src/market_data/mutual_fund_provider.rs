//! Mutual fund search and NAV quotes.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::market_data_errors::MarketDataError;
use super::market_data_model::{FundQuote, FundSearchResult};

pub const DEFAULT_MFAPI_BASE_URL: &str = "https://api.mfapi.in";
const PROVIDER: &str = "mfapi";
const NAV_DATE_FORMAT: &str = "%d-%m-%Y";

#[async_trait]
pub trait MutualFundProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<FundSearchResult>, MarketDataError>;

    async fn latest_quote(&self, scheme_code: &str) -> Result<FundQuote, MarketDataError>;
}

/// Client for the public mfapi.in API.
pub struct MfApiProvider {
    client: Client,
    base_url: String,
}

impl MfApiProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("mfapi request to {} failed with {}", url, status);
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}", status),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl MutualFundProvider for MfApiProvider {
    async fn search(&self, query: &str) -> Result<Vec<FundSearchResult>, MarketDataError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/mf/search", self.base_url);
        let body = self.get_text(&url, &[("q", query)]).await?;
        parse_search_response(&body)
    }

    async fn latest_quote(&self, scheme_code: &str) -> Result<FundQuote, MarketDataError> {
        let url = format!("{}/mf/{}", self.base_url, scheme_code.trim());
        debug!("Fetching NAV for scheme {}", scheme_code);
        let body = self.get_text(&url, &[]).await?;
        parse_scheme_response(scheme_code, &body)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    scheme_code: serde_json::Value,
    scheme_name: String,
}

#[derive(Deserialize)]
struct SchemeResponse {
    #[serde(default)]
    meta: Option<SchemeMeta>,
    #[serde(default)]
    data: Vec<NavPoint>,
}

#[derive(Deserialize)]
struct SchemeMeta {
    fund_house: Option<String>,
    scheme_name: Option<String>,
}

#[derive(Deserialize)]
struct NavPoint {
    date: String,
    nav: String,
}

fn parse_error(e: impl std::fmt::Display) -> MarketDataError {
    MarketDataError::ParseError(e.to_string())
}

/// Scheme codes arrive as numbers but are handled as strings.
fn scheme_code_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn parse_search_response(body: &str) -> Result<Vec<FundSearchResult>, MarketDataError> {
    let hits: Vec<SearchHit> = serde_json::from_str(body).map_err(parse_error)?;
    Ok(hits
        .into_iter()
        .map(|hit| FundSearchResult {
            scheme_code: scheme_code_text(&hit.scheme_code),
            scheme_name: hit.scheme_name,
        })
        .collect())
}

/// NAV history is newest first; the second point is the previous NAV.
pub(crate) fn parse_scheme_response(
    scheme_code: &str,
    body: &str,
) -> Result<FundQuote, MarketDataError> {
    let response: SchemeResponse = serde_json::from_str(body).map_err(parse_error)?;
    let mut points = response.data.iter();
    let latest = points
        .next()
        .ok_or_else(|| MarketDataError::SymbolNotFound(scheme_code.to_string()))?;
    let previous_nav = points
        .next()
        .map(|p| Decimal::from_str(p.nav.trim()))
        .transpose()
        .map_err(parse_error)?;

    let meta = response.meta;
    Ok(FundQuote {
        scheme_code: scheme_code.trim().to_string(),
        scheme_name: meta
            .as_ref()
            .and_then(|m| m.scheme_name.clone())
            .unwrap_or_else(|| scheme_code.to_string()),
        fund_house: meta.and_then(|m| m.fund_house),
        nav: Decimal::from_str(latest.nav.trim()).map_err(parse_error)?,
        previous_nav,
        nav_date: NaiveDate::parse_from_str(&latest.date, NAV_DATE_FORMAT).map_err(parse_error)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_search_response() {
        let body = r#"[{"schemeCode":120503,"schemeName":"Axis ELSS Tax Saver Fund - Direct Growth"}]"#;
        let results = parse_search_response(body).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scheme_code, "120503");
    }

    #[test]
    fn test_parse_scheme_response_takes_latest_and_previous_nav() {
        let body = r#"{
            "meta": {"fund_house": "Axis Mutual Fund", "scheme_name": "Axis ELSS", "scheme_code": 120503},
            "data": [
                {"date": "25-10-2024", "nav": "95.12340"},
                {"date": "24-10-2024", "nav": "94.80000"}
            ],
            "status": "SUCCESS"
        }"#;
        let quote = parse_scheme_response("120503", body).unwrap();
        assert_eq!(quote.nav, dec!(95.12340));
        assert_eq!(quote.previous_nav, Some(dec!(94.80000)));
        assert_eq!(quote.nav_date, NaiveDate::from_ymd_opt(2024, 10, 25).unwrap());
        assert_eq!(quote.fund_house.as_deref(), Some("Axis Mutual Fund"));
    }

    #[test]
    fn test_empty_history_is_not_found() {
        let body = r#"{"meta": {}, "data": []}"#;
        assert!(matches!(
            parse_scheme_response("999999", body),
            Err(MarketDataError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_malformed_nav_is_a_parse_error() {
        let body = r#"{"data": [{"date": "25-10-2024", "nav": "N.A."}]}"#;
        assert!(matches!(
            parse_scheme_response("1", body),
            Err(MarketDataError::ParseError(_))
        ));
    }
}
