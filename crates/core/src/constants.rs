use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Venue assigned to instruments that trade without an exchange (mutual funds).
pub const DEFAULT_FUND_VENUE: &str = "MF";

/// Default venue for listed instruments when the caller gives none.
pub const DEFAULT_EXCHANGE_VENUE: &str = "NSE";

/// Flat stamp-duty approximation applied to mutual fund purchases.
pub const MUTUAL_FUND_STAMP_DUTY_RATE: Decimal = dec!(0.00005);

/// Decimal precision for valuation calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Ledger categories written by domain actions.
pub mod ledger_categories {
    pub const INVESTMENT: &str = "Investment";
    pub const INVESTMENT_INCOME: &str = "Investment Income";
    pub const TRADING: &str = "Trading";
    pub const GOAL: &str = "Goal";
    pub const FAMILY_TRANSFER: &str = "Family Transfer";
    pub const DEPOSIT: &str = "Deposit";
    pub const ADJUSTMENT: &str = "Balance Adjustment";
}
