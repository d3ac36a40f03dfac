#[cfg(test)]
mod tests {
    use crate::constants::ledger_categories;
    use crate::investments::{
        allocate_sale, AssetClass, BuyRequest, IncomeKind, IncomeRequest, InvestmentService,
        InvestmentServiceTrait, LotPriceUpdate, SellRequest, TransactionType,
    };
    use crate::ledger::{reconcile, LedgerEntryType};
    use crate::portfolio::aggregate_lots;
    use crate::test_support::{lot, sample_account, test_date, InMemoryStore};
    use crate::errors::CalculatorError;
    use crate::Error;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service(store: &Arc<InMemoryStore>) -> InvestmentService {
        InvestmentService::new(store.clone(), store.clone())
    }

    fn buy(symbol: &str, quantity: Decimal, price: Decimal, account_id: Option<i64>) -> BuyRequest {
        BuyRequest {
            asset_class: AssetClass::Stock,
            symbol: symbol.to_string(),
            name: None,
            venue: Some("NSE".to_string()),
            quantity,
            price,
            current_price: None,
            previous_price: None,
            brokerage: dec!(20),
            taxes: dec!(5),
            transaction_type: None,
            account_id,
            transaction_date: test_date(),
        }
    }

    fn sell(symbol: &str, quantity: Decimal, price: Decimal, account_id: Option<i64>) -> SellRequest {
        SellRequest {
            asset_class: AssetClass::Stock,
            symbol: symbol.to_string(),
            venue: Some("nse".to_string()),
            quantity,
            price,
            brokerage: dec!(20),
            taxes: dec!(5),
            account_id,
            transaction_date: test_date(),
        }
    }

    #[tokio::test]
    async fn test_buy_debits_total_cost_and_creates_lot() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(100000))]);
        let outcome = service(&store)
            .buy(buy("TCS", dec!(10), dec!(3500), Some(1)))
            .await
            .unwrap();

        let lot = &outcome.lots[0];
        assert_eq!(lot.cost_basis, dec!(35000));
        assert_eq!(lot.current_value, dec!(35000));
        assert_eq!(outcome.transaction.transaction_type, TransactionType::Buy);
        assert_eq!(outcome.transaction.charges(), dec!(25));

        let entry = outcome.ledger_entry.unwrap();
        assert_eq!(entry.entry_type, LedgerEntryType::Expense);
        assert_eq!(entry.amount, dec!(35025));
        assert_eq!(entry.category, ledger_categories::INVESTMENT);
        assert_eq!(store.account(1).balance, dec!(64975));
    }

    #[tokio::test]
    async fn test_buy_with_insufficient_funds_changes_nothing() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(1000))]);
        let result = service(&store)
            .buy(buy("TCS", dec!(10), dec!(3500), Some(1)))
            .await;

        assert!(matches!(result, Err(Error::InsufficientFunds { .. })));
        assert_eq!(store.account(1).balance, dec!(1000));
        assert!(store.all_lots().is_empty());
        assert!(store.ledger_entries().is_empty());
    }

    #[tokio::test]
    async fn test_mutual_fund_sip_carries_no_per_transaction_charges() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(10000))]);
        let mut request = buy("120503", dec!(100), dec!(50), Some(1));
        request.asset_class = AssetClass::MutualFund;
        request.venue = None;
        request.transaction_type = Some(TransactionType::Sip);

        let outcome = service(&store).buy(request).await.unwrap();
        assert_eq!(outcome.lots[0].venue, "MF");
        assert_eq!(outcome.transaction.charges(), Decimal::ZERO);
        assert_eq!(store.account(1).balance, dec!(5000));
    }

    #[tokio::test]
    async fn test_sip_is_rejected_for_stocks() {
        let store = InMemoryStore::new();
        let mut request = buy("TCS", dec!(1), dec!(1), None);
        request.transaction_type = Some(TransactionType::Sip);
        assert!(matches!(
            service(&store).buy(request).await,
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_partial_sell_keeps_average_cost_and_credits_net_proceeds() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(100000))]);
        let service = service(&store);
        service.buy(buy("INFY", dec!(10), dec!(1000), Some(1))).await.unwrap();
        service.buy(buy("INFY", dec!(30), dec!(1400), Some(1))).await.unwrap();

        let outcome = service
            .sell(sell("INFY", dec!(20), dec!(1500), Some(1)))
            .await
            .unwrap();

        // Average cost 1300: half the position leaves with 26000 of cost.
        assert_eq!(outcome.transaction.realized_pnl, Some(dec!(3975)));
        let position = &aggregate_lots(&store.all_lots())[0];
        assert_eq!(position.quantity, dec!(20));
        assert_eq!(position.avg_cost, dec!(1300));

        let account = store.account(1);
        // 100000 - 10025 - 42025 + 29975
        assert_eq!(account.balance, dec!(77925));
        assert!(reconcile(&account, &store.ledger_entries()).is_consistent);
    }

    #[tokio::test]
    async fn test_full_exit_leaves_zero_quantity_lots() {
        let store = InMemoryStore::new();
        let service = service(&store);
        service.buy(buy("SBIN", dec!(5), dec!(600), None)).await.unwrap();
        service.sell(sell("SBIN", dec!(5), dec!(650), None)).await.unwrap();

        let lots = store.all_lots();
        assert_eq!(lots.len(), 1);
        assert_eq!(lots[0].quantity, Decimal::ZERO);
        assert!(aggregate_lots(&lots).is_empty());
    }

    #[tokio::test]
    async fn test_overselling_is_rejected() {
        let store = InMemoryStore::new();
        let service = service(&store);
        service.buy(buy("SBIN", dec!(5), dec!(600), None)).await.unwrap();

        let result = service.sell(sell("SBIN", dec!(6), dec!(650), None)).await;
        assert!(matches!(
            result,
            Err(Error::Calculation(CalculatorError::InsufficientQuantity { .. }))
        ));
    }

    #[tokio::test]
    async fn test_selling_unknown_position_is_rejected() {
        let store = InMemoryStore::new();
        let result = service(&store).sell(sell("NOPE", dec!(1), dec!(1), None)).await;
        assert!(matches!(
            result,
            Err(Error::Calculation(CalculatorError::PositionNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_bond_interest_and_maturity() {
        let store = InMemoryStore::with_accounts(vec![sample_account(1, dec!(200000))]);
        let service = service(&store);
        let mut request = buy("GOI2033", dec!(100), dec!(1000), Some(1));
        request.asset_class = AssetClass::Bond;
        request.brokerage = Decimal::ZERO;
        request.taxes = Decimal::ZERO;
        service.buy(request).await.unwrap();

        let income = |kind, amount| IncomeRequest {
            symbol: "GOI2033".to_string(),
            venue: Some("NSE".to_string()),
            kind,
            amount,
            account_id: Some(1),
            transaction_date: test_date(),
        };
        let interest = service
            .record_income(income(IncomeKind::Interest, dec!(3590)))
            .await
            .unwrap();
        assert_eq!(interest.transaction.transaction_type, TransactionType::Interest);
        assert!(interest.lots.is_empty());

        let maturity = service
            .record_income(income(IncomeKind::Maturity, dec!(100000)))
            .await
            .unwrap();
        assert_eq!(maturity.transaction.realized_pnl, Some(Decimal::ZERO));
        assert!(maturity.lots.iter().all(|l| l.quantity.is_zero()));
        assert_eq!(
            maturity.ledger_entry.unwrap().category,
            ledger_categories::INVESTMENT_INCOME
        );

        assert_eq!(store.account(1).balance, dec!(203590));
    }

    #[tokio::test]
    async fn test_price_update_moves_current_to_previous() {
        let store = InMemoryStore::new();
        let service = service(&store);
        let outcome = service.buy(buy("TCS", dec!(2), dec!(3500), None)).await.unwrap();

        let lots = service
            .update_prices(vec![LotPriceUpdate {
                lot_id: outcome.lots[0].id.clone(),
                current_price: dec!(3600),
                previous_price: None,
            }])
            .await
            .unwrap();

        assert_eq!(lots[0].previous_price, Some(dec!(3500)));
        assert_eq!(lots[0].current_value, dec!(7200));
        assert_eq!(lots[0].unrealized_pnl, dec!(200));
    }

    #[tokio::test]
    async fn test_delete_unknown_lot_is_not_found() {
        let store = InMemoryStore::new();
        assert!(service(&store).delete_lot("missing").await.is_err());
    }

    #[test]
    fn test_allocate_sale_is_pro_rata() {
        let lots = vec![
            lot(AssetClass::Stock, "X", "NSE", dec!(10), dec!(1000), dec!(100), None),
            lot(AssetClass::Stock, "X", "NSE", dec!(30), dec!(4200), dec!(100), None),
        ];
        let (lots, cost_removed) = allocate_sale(lots, dec!(20));

        assert_eq!(lots[0].quantity, dec!(5));
        assert_eq!(lots[1].quantity, dec!(15));
        assert_eq!(cost_removed, dec!(2600));
        let remaining_cost: Decimal = lots.iter().map(|l| l.cost_basis).sum();
        assert_eq!(remaining_cost, dec!(2600));
    }

    #[test]
    fn test_allocate_sale_removes_exact_quantity_below_rounding_precision() {
        let lots = vec![
            lot(AssetClass::MutualFund, "120503", "MF", dec!(0.0000004), dec!(4), dec!(10), None),
            lot(AssetClass::MutualFund, "120503", "MF", dec!(0.0000001), dec!(1), dec!(10), None),
        ];
        let (lots, cost_removed) = allocate_sale(lots, dec!(0.0000004));

        let held: Decimal = lots.iter().map(|l| l.quantity).sum();
        assert_eq!(held, dec!(0.0000001));
        assert_eq!(cost_removed, dec!(4));
        let remaining_cost: Decimal = lots.iter().map(|l| l.cost_basis).sum();
        assert_eq!(remaining_cost, dec!(1));
    }
}
