//! Position aggregation - merges raw lots into per-instrument positions.

mod aggregation_calculator;
mod positions_model;

pub use aggregation_calculator::aggregate_lots;
pub use positions_model::{average_cost, pnl_percentage, Position, PositionKey};

#[cfg(test)]
mod aggregation_calculator_tests;
