//! Application settings persisted as key/value pairs.

use serde::{Deserialize, Serialize};

use crate::accounts::Currency;
use crate::errors::ValidationError;
use crate::investments::AssetClass;
use crate::{Error, Result};

pub const BASE_CURRENCY_KEY: &str = "base_currency";
pub const STOCKS_ENABLED_KEY: &str = "stocks_enabled";
pub const MUTUAL_FUNDS_ENABLED_KEY: &str = "mutual_funds_enabled";
pub const BONDS_ENABLED_KEY: &str = "bonds_enabled";
pub const FNO_ENABLED_KEY: &str = "fno_enabled";
pub const PRICE_REFRESH_INTERVAL_KEY: &str = "price_refresh_interval_secs";

pub const DEFAULT_PRICE_REFRESH_SECS: u64 = 300;
const MIN_PRICE_REFRESH_SECS: u64 = 30;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub base_currency: Currency,
    pub stocks_enabled: bool,
    pub mutual_funds_enabled: bool,
    pub bonds_enabled: bool,
    pub fno_enabled: bool,
    pub price_refresh_interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_currency: Currency::Inr,
            stocks_enabled: true,
            mutual_funds_enabled: true,
            bonds_enabled: true,
            fno_enabled: true,
            price_refresh_interval_secs: DEFAULT_PRICE_REFRESH_SECS,
        }
    }
}

impl Settings {
    pub fn is_enabled(&self, asset_class: AssetClass) -> bool {
        match asset_class {
            AssetClass::Stock => self.stocks_enabled,
            AssetClass::MutualFund => self.mutual_funds_enabled,
            AssetClass::Bond => self.bonds_enabled,
            AssetClass::Fno => self.fno_enabled,
        }
    }

    /// Builds settings from stored pairs; unknown keys are ignored and
    /// missing keys keep their defaults.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut settings = Settings::default();
        for (key, value) in pairs {
            settings.apply(key, value)?;
        }
        Ok(settings)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            BASE_CURRENCY_KEY => self.base_currency = value.parse()?,
            STOCKS_ENABLED_KEY => self.stocks_enabled = parse_flag(key, value)?,
            MUTUAL_FUNDS_ENABLED_KEY => self.mutual_funds_enabled = parse_flag(key, value)?,
            BONDS_ENABLED_KEY => self.bonds_enabled = parse_flag(key, value)?,
            FNO_ENABLED_KEY => self.fno_enabled = parse_flag(key, value)?,
            PRICE_REFRESH_INTERVAL_KEY => {
                self.price_refresh_interval_secs = value.trim().parse().map_err(|_| {
                    Error::InvalidConfigValue(format!("{} = '{}'", key, value))
                })?
            }
            _ => {}
        }
        Ok(())
    }

    /// The settings as stored key/value pairs.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (BASE_CURRENCY_KEY, self.base_currency.to_string()),
            (STOCKS_ENABLED_KEY, self.stocks_enabled.to_string()),
            (MUTUAL_FUNDS_ENABLED_KEY, self.mutual_funds_enabled.to_string()),
            (BONDS_ENABLED_KEY, self.bonds_enabled.to_string()),
            (FNO_ENABLED_KEY, self.fno_enabled.to_string()),
            (
                PRICE_REFRESH_INTERVAL_KEY,
                self.price_refresh_interval_secs.to_string(),
            ),
        ]
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidConfigValue(format!("{} = '{}'", key, value)))
}

/// Partial settings update; absent fields keep their value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub base_currency: Option<Currency>,
    pub stocks_enabled: Option<bool>,
    pub mutual_funds_enabled: Option<bool>,
    pub bonds_enabled: Option<bool>,
    pub fno_enabled: Option<bool>,
    pub price_refresh_interval_secs: Option<u64>,
}

impl SettingsUpdate {
    pub fn validate(&self) -> Result<()> {
        if matches!(self.price_refresh_interval_secs, Some(secs) if secs < MIN_PRICE_REFRESH_SECS)
        {
            return Err(Error::Validation(ValidationError::invalid(format!(
                "Price refresh interval must be at least {} seconds",
                MIN_PRICE_REFRESH_SECS
            ))));
        }
        Ok(())
    }

    pub fn apply_to(&self, settings: &Settings) -> Settings {
        Settings {
            base_currency: self.base_currency.unwrap_or(settings.base_currency),
            stocks_enabled: self.stocks_enabled.unwrap_or(settings.stocks_enabled),
            mutual_funds_enabled: self
                .mutual_funds_enabled
                .unwrap_or(settings.mutual_funds_enabled),
            bonds_enabled: self.bonds_enabled.unwrap_or(settings.bonds_enabled),
            fno_enabled: self.fno_enabled.unwrap_or(settings.fno_enabled),
            price_refresh_interval_secs: self
                .price_refresh_interval_secs
                .unwrap_or(settings.price_refresh_interval_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let settings = Settings::from_pairs([(FNO_ENABLED_KEY, "false")]).unwrap();
        assert!(!settings.fno_enabled);
        assert!(settings.stocks_enabled);
        assert_eq!(settings.base_currency, Currency::Inr);
        assert_eq!(settings.price_refresh_interval_secs, DEFAULT_PRICE_REFRESH_SECS);
    }

    #[test]
    fn test_malformed_flag_is_rejected() {
        assert!(Settings::from_pairs([(BONDS_ENABLED_KEY, "maybe")]).is_err());
    }

    #[test]
    fn test_pairs_round_trip() {
        let settings = Settings {
            base_currency: Currency::Usd,
            mutual_funds_enabled: false,
            ..Settings::default()
        };
        let pairs = settings.to_pairs();
        let restored =
            Settings::from_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str()))).unwrap();
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let update = SettingsUpdate {
            fno_enabled: Some(false),
            ..SettingsUpdate::default()
        };
        let updated = update.apply_to(&Settings::default());
        assert!(!updated.fno_enabled);
        assert!(updated.bonds_enabled);
    }
}
