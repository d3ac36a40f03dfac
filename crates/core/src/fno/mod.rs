//! F&O module - futures and options trades.

mod fno_model;
mod fno_service;
mod fno_traits;

pub use fno_model::*;
pub use fno_service::FnoService;
pub use fno_traits::{FnoRepositoryTrait, FnoServiceTrait};
