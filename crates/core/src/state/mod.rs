//! Application state - the composition root wiring services to stores and
//! caching every collection in memory.

mod finance_state;
mod state_model;

pub use finance_state::{FinanceRepositories, FinanceServices, FinanceState};
pub use state_model::{Collection, FinanceData, LoadFailure, LoadReport};
