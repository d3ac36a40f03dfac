//! SQLite storage implementation for lots and investment transactions.

mod model;
mod repository;

pub use model::{InvestmentTransactionDB, LotDB};
pub use repository::InvestmentRepository;
