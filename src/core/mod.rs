//! Core business logic - framework-agnostic operations on customers, items, users and orders.
//!
//! Every function takes a database connection and typed input, validates before
//! writing, and reports missing records as explicit `*NotFound` errors.

/// Customer create/read/update/delete
pub mod customer;
/// Catalog item management
pub mod item;
/// Orders and their line items
pub mod order;
/// Staff accounts
pub mod user;

use crate::errors::{Error, Result};
use sea_orm::prelude::Decimal;

/// Largest money value that fits a `DECIMAL(10, 2)` column (8 integer digits).
const MONEY_LIMIT: i64 = 100_000_000;

/// Checks that `amount` is a storable, non-negative money value with at most two
/// fractional digits.
pub(crate) fn check_money(amount: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(Error::InvalidAmount { amount });
    }
    if amount.normalize().scale() > 2 || amount >= Decimal::from(MONEY_LIMIT) {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount.round_dp(2))
}
