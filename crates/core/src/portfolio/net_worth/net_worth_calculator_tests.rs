#[cfg(test)]
mod tests {
    use crate::accounts::Currency;
    use crate::fno::FnoStatus;
    use crate::goals::goal_progress;
    use crate::investments::{AssetClass, TransactionType};
    use crate::portfolio::net_worth::{
        build_dashboard, compose_net_worth, liquidity, DashboardInputs, GoalProgressSummary,
    };
    use crate::portfolio::valuation::{summarize_positions, PortfolioValuation};
    use crate::portfolio::aggregate_lots;
    use crate::settings::Settings;
    use crate::test_support::{fno_trade, goal, lot, sample_account, transaction};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_liquidity_counts_base_currency_only() {
        let mut usd = sample_account(2, dec!(1000));
        usd.currency = Currency::Usd;
        let accounts = vec![sample_account(1, dec!(30000)), usd];
        assert_eq!(liquidity(&accounts, Currency::Inr), dec!(30000));
        assert_eq!(liquidity(&accounts, Currency::Usd), dec!(1000));
    }

    #[test]
    fn test_disabled_class_contributes_nothing() {
        let lots = vec![
            lot(AssetClass::Stock, "TCS", "NSE", dec!(1), dec!(3000), dec!(4000), None),
            lot(AssetClass::Bond, "GOI", "NSE", dec!(1), dec!(1000), dec!(1000), None),
        ];
        let positions = aggregate_lots(&lots);
        let valuation = PortfolioValuation::from_summaries(vec![
            summarize_positions(AssetClass::Stock, &positions),
            summarize_positions(AssetClass::Bond, &positions),
        ]);
        let settings = Settings {
            bonds_enabled: false,
            ..Settings::default()
        };

        let net_worth = compose_net_worth(&[sample_account(1, dec!(500))], &settings, &valuation);
        assert_eq!(net_worth.investments, dec!(4000));
        assert_eq!(net_worth.net_worth, dec!(4500));
        assert!(net_worth.allocation.iter().all(|s| s.category != "BOND"));
    }

    #[test]
    fn test_allocation_skips_empty_slices_and_sums_to_hundred() {
        let lots = vec![lot(AssetClass::Stock, "TCS", "NSE", dec!(1), dec!(3000), dec!(3000), None)];
        let positions = aggregate_lots(&lots);
        let valuation =
            PortfolioValuation::from_summaries(vec![summarize_positions(AssetClass::Stock, &positions)]);

        let net_worth =
            compose_net_worth(&[sample_account(1, dec!(1000))], &Settings::default(), &valuation);
        let categories: Vec<_> = net_worth.allocation.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["CASH", "STOCK"]);
        assert_eq!(net_worth.allocation[0].percentage, dec!(25));
        assert_eq!(net_worth.allocation[1].percentage, dec!(75));
    }

    #[test]
    fn test_goal_progress_is_capped_and_safe_on_zero_target() {
        assert_eq!(goal_progress(dec!(150), dec!(100)), dec!(100));
        assert_eq!(goal_progress(dec!(50), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(goal_progress(dec!(25), dec!(100)), dec!(25));

        let summary = GoalProgressSummary::from_goals(&[
            goal("House", dec!(100), dec!(150)),
            goal("Car", dec!(100), dec!(10)),
        ]);
        assert_eq!(summary.achieved_count, 1);
        assert_eq!(summary.overall_progress, dec!(80));
    }

    #[test]
    fn test_dashboard_combines_all_engines() {
        let accounts = vec![sample_account(1, dec!(10000))];
        let lots = vec![lot(
            AssetClass::Stock,
            "TCS",
            "NSE",
            dec!(2),
            dec!(6000),
            dec!(3500),
            Some(dec!(3400)),
        )];
        let transactions = vec![transaction(
            AssetClass::Stock,
            TransactionType::Buy,
            dec!(6000),
            dec!(20),
            Decimal::ZERO,
        )];
        let trades = vec![
            fno_trade(FnoStatus::Closed, dec!(3000)),
            fno_trade(FnoStatus::Open, dec!(-400)),
        ];
        let settings = Settings::default();

        let metrics = build_dashboard(
            DashboardInputs {
                accounts: &accounts,
                lots: &lots,
                transactions: &transactions,
                fno_trades: &trades,
                goals: &[],
                settings: &settings,
            },
            today(),
        );

        assert_eq!(metrics.liquidity, dec!(10000));
        assert_eq!(metrics.investments, dec!(7000));
        assert_eq!(metrics.net_worth, dec!(17000));
        assert_eq!(metrics.total_day_change, dec!(200));
        // 1000 held + (-400) open F&O
        assert_eq!(metrics.total_unrealized_pnl, dec!(600));
        // stocks: 7000 - 6020; F&O: 3000
        assert_eq!(metrics.lifetime.of(AssetClass::Stock), dec!(980));
        assert_eq!(metrics.lifetime.of(AssetClass::Fno), dec!(3000));
        assert_eq!(metrics.lifetime.total, dec!(3980));
    }

    #[test]
    fn test_dashboard_without_fno_omits_it() {
        let settings = Settings {
            fno_enabled: false,
            ..Settings::default()
        };
        let trades = vec![fno_trade(FnoStatus::Closed, dec!(3000))];
        let metrics = build_dashboard(
            DashboardInputs {
                accounts: &[],
                lots: &[],
                transactions: &[],
                fno_trades: &trades,
                goals: &[],
                settings: &settings,
            },
            today(),
        );
        assert!(metrics.fno.is_none());
        assert_eq!(metrics.lifetime.total, Decimal::ZERO);
        assert!(metrics.allocation.is_empty());
    }
}
