//! Tests for account domain models.

#[cfg(test)]
mod tests {
    use crate::accounts::{AccountUpdate, Currency, NewAccount};
    use crate::Error;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    // ==================== Currency Tests ====================

    #[test]
    fn test_currency_serialization() {
        assert_eq!(serde_json::to_string(&Currency::Inr).unwrap(), "\"INR\"");
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
    }

    #[test]
    fn test_currency_deserialization() {
        assert_eq!(
            serde_json::from_str::<Currency>("\"USD\"").unwrap(),
            Currency::Usd
        );
        assert!(serde_json::from_str::<Currency>("\"EUR\"").is_err());
    }

    #[test]
    fn test_currency_from_str_is_case_insensitive() {
        assert_eq!(Currency::from_str("inr").unwrap(), Currency::Inr);
        assert_eq!(Currency::from_str(" usd ").unwrap(), Currency::Usd);
    }

    #[test]
    fn test_currency_from_str_rejects_unknown() {
        match Currency::from_str("GBP") {
            Err(Error::UnsupportedCurrency(code)) => assert_eq!(code, "GBP"),
            other => panic!("expected UnsupportedCurrency, got {:?}", other),
        }
    }

    #[test]
    fn test_currency_default_is_inr() {
        assert_eq!(Currency::default(), Currency::Inr);
    }

    // ==================== Validation Tests ====================

    fn new_account(name: &str, account_type: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            account_type: account_type.to_string(),
            bank_name: None,
            currency: Currency::Inr,
            opening_balance: dec!(1000),
            is_active: true,
        }
    }

    #[test]
    fn test_new_account_validation() {
        assert!(new_account("Savings", "SAVINGS").validate().is_ok());
        assert!(new_account("  ", "SAVINGS").validate().is_err());
        assert!(new_account("Savings", "").validate().is_err());
    }

    #[test]
    fn test_new_account_deserializes_with_defaults() {
        let json = r#"{"name":"Wallet","accountType":"CASH","bankName":null}"#;
        let account: NewAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.currency, Currency::Inr);
        assert_eq!(account.opening_balance, dec!(0));
        assert!(account.is_active);
    }

    #[test]
    fn test_account_update_requires_id() {
        let update = AccountUpdate {
            id: 0,
            name: "Savings".to_string(),
            account_type: "SAVINGS".to_string(),
            bank_name: None,
            is_active: true,
        };
        assert!(update.validate().is_err());

        let update = AccountUpdate { id: 7, ..update };
        assert!(update.validate().is_ok());
    }
}
