#![deny(clippy::pedantic)]
#![no_std]

mod closed_open_unit_f64;
mod non_negative_f64;
mod positive_f64;

pub use closed_open_unit_f64::{ClosedOpenUnitF64, ClosedOpenUnitF64Error};
pub use non_negative_f64::{NonNegativeF64, NonNegativeF64Error};
pub use positive_f64::{PositiveF64, PositiveF64Error};
