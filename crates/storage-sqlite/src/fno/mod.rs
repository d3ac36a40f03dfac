//! SQLite storage implementation for F&O trades.

mod model;
mod repository;

pub use model::FnoTradeDB;
pub use repository::FnoRepository;
