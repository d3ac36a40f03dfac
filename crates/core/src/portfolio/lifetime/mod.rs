//! Lifetime wealth created per asset class.

mod lifetime_calculator;
mod lifetime_model;

pub use lifetime_calculator::{calc_lifetime_earned, fno_lifetime, lifetime_breakdown};
pub use lifetime_model::{LifetimeBreakdown, LifetimeEarnings};
