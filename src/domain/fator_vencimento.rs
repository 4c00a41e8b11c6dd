//! Fator de vencimento
//!
//! The due-date factor is a 4-digit day count from a fixed FEBRABAN epoch.
//! The counter ran out in February 2025 and restarted at 1000, so factors
//! that land before the reset date belong to the new cycle.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// FEBRABAN day-count origin: factor 0 is 1997-10-07.
pub const DATA_BASE: (i32, u32, u32) = (1997, 10, 7);

/// First day of the post-reset cycle (factor 1000 of the new cycle).
pub const DATA_REINICIO: (i32, u32, u32) = (2025, 2, 22);

/// Days added to move a pre-reset date into the current cycle.
pub const DIAS_CICLO: u64 = 9000;

/// Largest value the 4-digit field can hold
pub const FATOR_MAX: u16 = 9999;

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    // constants above are valid calendar dates
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// Epoch of the due-date factor.
pub fn data_base() -> NaiveDate {
    ymd(DATA_BASE)
}

/// Start of the post-reset cycle.
pub fn data_reinicio() -> NaiveDate {
    ymd(DATA_REINICIO)
}

/// Move a date computed against the 1997 epoch into the current cycle.
///
/// Dates before the reset are shifted forward by one full cycle; dates on
/// or after it are returned unchanged.
pub fn apply_cycle_reset(date: NaiveDate) -> NaiveDate {
    if date < data_reinicio() {
        date + Days::new(DIAS_CICLO)
    } else {
        date
    }
}

/// A 4-digit due-date factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FatorVencimento(u16);

/// Factor outside the 4-digit range
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Fator de vencimento must be at most {FATOR_MAX} (got {0})")]
pub struct FatorOutOfRange(pub u16);

impl FatorVencimento {
    /// Returns `None` when the value does not fit in four digits.
    pub fn new(value: u16) -> Option<Self> {
        (value <= FATOR_MAX).then_some(Self(value))
    }

    /// Caller guarantees the value came from four digits.
    pub(crate) fn from_digits_unchecked(value: u16) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Date counted from the 1997 epoch, before the cycle reset is applied.
    pub fn naive_date(&self) -> NaiveDate {
        data_base() + Days::new(u64::from(self.0))
    }

    /// Due date in the current cycle.
    pub fn data_vencimento(&self) -> NaiveDate {
        apply_cycle_reset(self.naive_date())
    }
}

impl TryFrom<u16> for FatorVencimento {
    type Error = FatorOutOfRange;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(FatorOutOfRange(value))
    }
}

impl From<FatorVencimento> for u16 {
    fn from(fator: FatorVencimento) -> Self {
        fator.0
    }
}

impl fmt::Display for FatorVencimento {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}
