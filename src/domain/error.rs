//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::linha_digitavel::LINHA_DIGITAVEL_LEN;

/// Rejections produced while decoding a digit line.
///
/// Each variant maps to a field-level validation message in the expense
/// form; nothing is ever filled in with a half-decoded value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoletoError {
    /// Cleaned digit string is not exactly 47 digits long
    #[error("Digit line must have {LINHA_DIGITAVEL_LEN} digits (got {found})")]
    InvalidLength { found: usize },

    /// Input has no digits at all
    #[error("Digit line contains no digits")]
    NoDigits,
}

impl BoletoError {
    /// Stable code used by the API and the batch CLI
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidLength { .. } => "invalid_length",
            Self::NoDigits => "no_digits",
        }
    }
}

/// Domain-specific errors surfaced to the service layer
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error(transparent)]
    Boleto(#[from] BoletoError),
}

impl DomainError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Boleto(e) => e.code(),
        }
    }
}
