//! Net worth calculation module.
//!
//! Combines account liquidity with the valuation of enabled asset classes,
//! and composes the dashboard metrics.

mod net_worth_calculator;
mod net_worth_model;

pub use net_worth_calculator::*;
pub use net_worth_model::*;

#[cfg(test)]
mod net_worth_calculator_tests;
