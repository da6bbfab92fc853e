//! Remaining-time arithmetic: how many seconds are left, and how they split into calendar units.

pub(crate) mod remaining;
pub(crate) mod units;
