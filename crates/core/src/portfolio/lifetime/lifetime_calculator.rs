use rust_decimal::Decimal;

use super::lifetime_model::LifetimeBreakdown;
use crate::constants::MUTUAL_FUND_STAMP_DUTY_RATE;
use crate::fno::FnoTrade;
use crate::investments::{AssetClass, InvestmentTransaction};

/// Lifetime wealth created under the per-transaction charge model:
/// `sells + current_value - (buys + Σ(brokerage + taxes))`.
pub fn calc_lifetime_earned(
    transactions: &[InvestmentTransaction],
    current_value: Decimal,
) -> Decimal {
    let (buys, sells) = cash_flows(transactions);
    let charges: Decimal = transactions.iter().map(InvestmentTransaction::charges).sum();
    sells + current_value - (buys + charges)
}

fn cash_flows(transactions: &[InvestmentTransaction]) -> (Decimal, Decimal) {
    transactions
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(buys, sells), t| {
            if t.transaction_type.is_outflow() {
                (buys + t.amount, sells)
            } else if t.transaction_type.is_inflow(t.asset_class) {
                (buys, sells + t.amount)
            } else {
                (buys, sells)
            }
        })
}

/// Lifetime figure for one held asset class. Transactions of other classes
/// are ignored.
///
/// Stocks and bonds are charged what each transaction recorded; mutual
/// funds pay a flat stamp-duty levy on purchases instead.
pub fn lifetime_breakdown(
    asset_class: AssetClass,
    transactions: &[InvestmentTransaction],
    current_value: Decimal,
) -> LifetimeBreakdown {
    let own: Vec<InvestmentTransaction> = transactions
        .iter()
        .filter(|t| t.asset_class == asset_class)
        .cloned()
        .collect();
    let (buys, sells) = cash_flows(&own);
    let charges = if asset_class.tracks_transaction_charges() {
        own.iter().map(InvestmentTransaction::charges).sum()
    } else {
        buys * MUTUAL_FUND_STAMP_DUTY_RATE
    };

    LifetimeBreakdown {
        asset_class,
        buys,
        sells,
        charges,
        current_value,
        lifetime: sells + current_value - (buys + charges),
    }
}

/// F&O lifetime is the settled P&L of closed trades; open trades are
/// still provisional.
pub fn fno_lifetime(trades: &[FnoTrade]) -> LifetimeBreakdown {
    let lifetime = trades
        .iter()
        .filter(|t| t.is_closed())
        .map(|t| t.pnl)
        .sum();
    LifetimeBreakdown {
        asset_class: AssetClass::Fno,
        buys: Decimal::ZERO,
        sells: Decimal::ZERO,
        charges: Decimal::ZERO,
        current_value: Decimal::ZERO,
        lifetime,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fno::FnoStatus;
    use crate::investments::TransactionType;
    use crate::test_support::{fno_trade, transaction};
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_transactions_and_no_value_is_zero() {
        assert_eq!(calc_lifetime_earned(&[], Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_buy_held_at_a_loss() {
        let txns = vec![transaction(
            AssetClass::Stock,
            TransactionType::Buy,
            dec!(10000),
            Decimal::ZERO,
            Decimal::ZERO,
        )];
        assert_eq!(calc_lifetime_earned(&txns, dec!(8000)), dec!(-2000));
    }

    #[test]
    fn test_charges_of_every_transaction_are_deducted() {
        let txns = vec![
            transaction(AssetClass::Stock, TransactionType::Buy, dec!(10000), dec!(50), dec!(10)),
            transaction(AssetClass::Stock, TransactionType::Sell, dec!(8000), dec!(40), dec!(8)),
        ];
        assert_eq!(calc_lifetime_earned(&txns, dec!(12000)), dec!(9892));
        assert_eq!(
            lifetime_breakdown(AssetClass::Stock, &txns, dec!(12000)).lifetime,
            dec!(9892)
        );
    }

    #[test]
    fn test_mutual_fund_pays_flat_levy_on_buys() {
        let txns = vec![
            transaction(AssetClass::MutualFund, TransactionType::Sip, dec!(10000), dec!(99), dec!(99)),
            transaction(AssetClass::MutualFund, TransactionType::Buy, dec!(10000), Decimal::ZERO, Decimal::ZERO),
        ];
        let breakdown = lifetime_breakdown(AssetClass::MutualFund, &txns, dec!(21000));
        assert_eq!(breakdown.buys, dec!(20000));
        assert_eq!(breakdown.charges, dec!(1));
        assert_eq!(breakdown.lifetime, dec!(999));
    }

    #[test]
    fn test_bond_interest_and_maturity_count_as_inflows() {
        let txns = vec![
            transaction(AssetClass::Bond, TransactionType::Buy, dec!(100000), Decimal::ZERO, Decimal::ZERO),
            transaction(AssetClass::Bond, TransactionType::Interest, dec!(7000), Decimal::ZERO, Decimal::ZERO),
            transaction(AssetClass::Bond, TransactionType::Maturity, dec!(100000), Decimal::ZERO, Decimal::ZERO),
        ];
        let breakdown = lifetime_breakdown(AssetClass::Bond, &txns, Decimal::ZERO);
        assert_eq!(breakdown.sells, dec!(107000));
        assert_eq!(breakdown.lifetime, dec!(7000));
    }

    #[test]
    fn test_other_classes_are_ignored() {
        let txns = vec![
            transaction(AssetClass::Stock, TransactionType::Buy, dec!(500), Decimal::ZERO, Decimal::ZERO),
            transaction(AssetClass::Bond, TransactionType::Buy, dec!(900), Decimal::ZERO, Decimal::ZERO),
        ];
        assert_eq!(
            lifetime_breakdown(AssetClass::Stock, &txns, Decimal::ZERO).lifetime,
            dec!(-500)
        );
    }

    #[test]
    fn test_fno_counts_closed_trades_only() {
        let trades = vec![
            fno_trade(FnoStatus::Closed, dec!(3000)),
            fno_trade(FnoStatus::Open, dec!(9999)),
        ];
        assert_eq!(fno_lifetime(&trades).lifetime, dec!(3000));
    }
}
