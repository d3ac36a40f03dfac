#[cfg(test)]
mod tests {
    use crate::accounts::{AccountService, AccountServiceTrait};
    use crate::constants::ledger_categories;
    use crate::ledger::{
        reconcile, LedgerEntryType, LedgerService, LedgerServiceTrait, NewLedgerEntry,
    };
    use crate::test_support::{sample_account, test_date, InMemoryStore};
    use crate::Error;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn services(store: &Arc<InMemoryStore>) -> (Arc<LedgerService>, AccountService) {
        let ledger = Arc::new(LedgerService::new(store.clone(), store.clone()));
        let accounts = AccountService::new(store.clone(), ledger.clone());
        (ledger, accounts)
    }

    #[tokio::test]
    async fn test_positive_delta_is_income() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(100))]);
        let (ledger, _) = services(&store);

        let entry = ledger
            .record_balance_change(1, dec!(250), "Salary", ledger_categories::DEPOSIT, test_date())
            .await
            .unwrap();

        assert_eq!(entry.entry_type, LedgerEntryType::Income);
        assert_eq!(entry.amount, dec!(250));
        assert_eq!(store.account(1).balance, dec!(350));
    }

    #[tokio::test]
    async fn test_negative_delta_is_expense_and_may_overdraw() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(100))]);
        let (ledger, _) = services(&store);

        let entry = ledger
            .record_balance_change(1, dec!(-150), "Rent", "Housing", test_date())
            .await
            .unwrap();

        assert_eq!(entry.entry_type, LedgerEntryType::Expense);
        assert_eq!(entry.amount, dec!(150));
        assert_eq!(store.account(1).balance, dec!(-50));
    }

    #[tokio::test]
    async fn test_zero_delta_is_rejected() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(100))]);
        let (ledger, _) = services(&store);
        let result = ledger
            .record_balance_change(1, Decimal::ZERO, "Nothing", "Misc", test_date())
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(store.ledger_entries().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_account_is_not_found() {
        let store = InMemoryStore::new();
        let (ledger, _) = services(&store);
        let result = ledger
            .record_balance_change(42, dec!(10), "Gift", "Misc", test_date())
            .await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn test_set_balance_logs_adjustment_and_skips_no_change() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(1000))]);
        let (_, accounts) = services(&store);

        let entry = accounts.set_balance(1, dec!(800)).await.unwrap().unwrap();
        assert_eq!(entry.category, ledger_categories::ADJUSTMENT);
        assert_eq!(entry.entry_type, LedgerEntryType::Expense);
        assert_eq!(entry.amount, dec!(200));

        assert!(accounts.set_balance(1, dec!(800)).await.unwrap().is_none());
        assert_eq!(store.ledger_entries().len(), 1);
    }

    #[tokio::test]
    async fn test_manual_entries_keep_account_reconciled() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(500))]);
        let (ledger, accounts) = services(&store);

        accounts.add_funds(1, dec!(1500), None).await.unwrap();
        ledger
            .record_entry(NewLedgerEntry {
                account_id: Some(1),
                entry_date: test_date(),
                description: "Groceries".to_string(),
                category: "Food".to_string(),
                entry_type: LedgerEntryType::Expense,
                amount: dec!(320.50),
            })
            .await
            .unwrap();
        accounts.set_balance(1, dec!(2000)).await.unwrap();

        let report = ledger.reconcile_account(1).unwrap();
        assert!(report.is_consistent);
        assert_eq!(report.entry_count, 3);
        assert_eq!(report.actual_balance, dec!(2000));
    }

    #[test]
    fn test_reconcile_reports_drift() {
        let mut account = sample_account(7, dec!(100));
        account.balance = dec!(130);
        let report = reconcile(&account, &[]);
        assert!(!report.is_consistent);
        assert_eq!(report.difference, dec!(30));
    }

    #[tokio::test]
    async fn test_deleting_an_entry_leaves_balance_untouched() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(0))]);
        let (ledger, accounts) = services(&store);
        let entry = accounts.add_funds(1, dec!(75), None).await.unwrap();

        ledger.delete_entry(&entry.id).await.unwrap();

        assert_eq!(store.account(1).balance, dec!(75));
        assert!(!ledger.reconcile_account(1).unwrap().is_consistent);
    }
}
