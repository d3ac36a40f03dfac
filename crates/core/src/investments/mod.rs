//! Investments module - lots, trades and income for stocks, mutual funds and bonds.

mod investments_model;
mod investments_service;
mod investments_traits;

pub use investments_model::*;
pub use investments_service::{allocate_sale, InvestmentService};
pub use investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};

#[cfg(test)]
mod investments_service_tests;
