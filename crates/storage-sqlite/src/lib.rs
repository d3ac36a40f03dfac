//! SQLite storage implementation for Finboard.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `finboard-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! All writes go through a single writer actor that runs each job inside an
//! `IMMEDIATE` transaction, so a balance change and the rows that caused it
//! commit together. Reads use the connection pool directly.
//!
//! ```text
//!   core (domain, traits)
//!            │
//!            ▼
//!   storage-sqlite (this crate)
//!            │
//!            ▼
//!        SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

// Repository implementations
pub mod accounts;
pub mod fno;
pub mod goals;
pub mod investments;
pub mod ledger;
pub mod settings;
pub mod transfers;

use std::sync::Arc;

use finboard_core::state::FinanceRepositories;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from finboard-core for convenience
pub use finboard_core::errors::{DatabaseError, Error, Result};

/// Builds every repository over one pool and writer.
pub fn repositories(pool: Arc<DbPool>, writer: WriteHandle) -> FinanceRepositories {
    FinanceRepositories {
        accounts: Arc::new(accounts::AccountRepository::new(pool.clone(), writer.clone())),
        ledger: Arc::new(ledger::LedgerRepository::new(pool.clone(), writer.clone())),
        investments: Arc::new(investments::InvestmentRepository::new(
            pool.clone(),
            writer.clone(),
        )),
        fno: Arc::new(fno::FnoRepository::new(pool.clone(), writer.clone())),
        goals: Arc::new(goals::GoalRepository::new(pool.clone(), writer.clone())),
        transfers: Arc::new(transfers::TransferRepository::new(pool.clone(), writer.clone())),
        settings: Arc::new(settings::SettingsRepository::new(pool, writer)),
    }
}

/// Opens (creating if needed) and migrates the database at `db_path`, then
/// starts the writer. Must be called inside a Tokio runtime.
pub fn open(db_path: &str) -> Result<(Arc<DbPool>, WriteHandle)> {
    let db_path = init(db_path)?;
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(pool.clone());
    Ok((pool, writer))
}
