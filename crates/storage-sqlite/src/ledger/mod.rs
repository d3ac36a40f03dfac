//! SQLite storage implementation for the ledger.

mod model;
mod repository;

pub use model::LedgerEntryDB;
pub use repository::LedgerRepository;
pub(crate) use repository::record_in_tx;
