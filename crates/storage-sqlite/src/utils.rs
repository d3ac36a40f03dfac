//! Column codecs shared by the row models.
//!
//! Money and quantities are stored as TEXT and enums by name; reading them
//! back is strict so a corrupt row surfaces as an error instead of a zero.

use std::str::FromStr;

use chrono::{NaiveDateTime, Utc};
use finboard_core::errors::{DatabaseError, Error, Result};
use rust_decimal::Decimal;
use uuid::Uuid;

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn malformed(table: &str, reason: impl Into<String>) -> Error {
    Error::Database(DatabaseError::MalformedRow {
        table: table.to_string(),
        reason: reason.into(),
    })
}

pub(crate) fn parse_decimal(table: &str, field: &str, value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|e| malformed(table, format!("{} '{}' is not a decimal: {}", field, value, e)))
}

pub(crate) fn parse_optional_decimal(
    table: &str,
    field: &str,
    value: Option<&str>,
) -> Result<Option<Decimal>> {
    value.map(|v| parse_decimal(table, field, v)).transpose()
}

/// Parses an enum column through the domain `FromStr`, reporting failures
/// as malformed rows.
pub(crate) fn parse_enum<T>(table: &str, field: &str, value: &str) -> Result<T>
where
    T: FromStr<Err = Error>,
{
    value
        .parse()
        .map_err(|e: Error| malformed(table, format!("{}: {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use finboard_core::investments::AssetClass;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_accepts_stored_text() {
        assert_eq!(parse_decimal("lots", "quantity", "12.5000").unwrap(), dec!(12.5));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        let err = parse_decimal("lots", "quantity", "abc").unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::MalformedRow { .. })
        ));
    }

    #[test]
    fn test_parse_enum_rejects_unknown_names() {
        assert_eq!(
            parse_enum::<AssetClass>("lots", "asset_class", "BOND").unwrap(),
            AssetClass::Bond
        );
        assert!(parse_enum::<AssetClass>("lots", "asset_class", "CRYPTO").is_err());
    }
}
