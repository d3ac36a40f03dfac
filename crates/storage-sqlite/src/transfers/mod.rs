//! SQLite storage implementation for family transfers.

mod model;
mod repository;

pub use model::FamilyTransferDB;
pub use repository::TransferRepository;
