//! Family transfers - money sent out of tracked accounts.

mod transfers_model;
mod transfers_service;
mod transfers_traits;

pub use transfers_model::{FamilyTransfer, NewFamilyTransfer};
pub use transfers_service::TransferService;
pub use transfers_traits::{TransferRepositoryTrait, TransferServiceTrait};
