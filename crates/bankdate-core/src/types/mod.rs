//! Domain types for banking date arithmetic.
//!
//! - [`Period`]: signed count of days, weeks, months or years
//! - [`TimeUnit`]: the unit of a period
//! - [`BankDate`]: calendar date with period arithmetic

mod date;
mod period;

pub use date::BankDate;
pub use period::{Period, TimeUnit};
