//! Finboard Core - Domain entities, services, and traits.
//!
//! This crate contains the ledger, portfolio aggregation and valuation
//! logic for Finboard. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod export;
pub mod fno;
pub mod goals;
pub mod investments;
pub mod ledger;
pub mod market_data;
pub mod portfolio;
pub mod settings;
pub mod state;
pub mod transfers;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
