//! Valor type
//!
//! Domain primitive for boleto amounts in BRL.
//! Amounts are validated at construction time, so a decoded boleto can
//! never carry a negative or over-precise value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest amount a digit line can carry: ten digits of centavos.
const MAX_CENTAVOS: i64 = 9_999_999_999;

/// Decimal places of a BRL amount
const SCALE: u32 = 2;

/// Valor represents a validated BRL amount.
///
/// # Invariants
/// - Value is zero or positive
/// - At most 2 decimal places
/// - At most 99 999 999.99
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use boleto_intake::domain::Valor;
///
/// let valor = Valor::from_centavos(12345).unwrap();
/// assert_eq!(valor.value(), Decimal::new(12345, 2));
/// assert_eq!(valor.to_string(), "123.45");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Valor(Decimal);

/// Errors that can occur when creating a Valor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValorError {
    #[error("Valor must not be negative (got {0})")]
    Negative(Decimal),

    #[error("Valor has too many decimal places (max {SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("Valor exceeds the digit line maximum")]
    Overflow,

    #[error("Invalid valor format: {0}")]
    ParseError(String),
}

impl Valor {
    /// Create a new Valor with validation.
    ///
    /// # Errors
    /// - `ValorError::Negative` if value < 0
    /// - `ValorError::TooManyDecimals` if more than 2 decimal places
    /// - `ValorError::Overflow` if value > 99 999 999.99
    pub fn new(value: Decimal) -> Result<Self, ValorError> {
        if value < Decimal::ZERO {
            return Err(ValorError::Negative(value));
        }

        let mut value = value.normalize();
        if value.scale() > SCALE {
            return Err(ValorError::TooManyDecimals(value.scale()));
        }

        if value > Decimal::new(MAX_CENTAVOS, SCALE) {
            return Err(ValorError::Overflow);
        }

        value.rescale(SCALE);
        Ok(Self(value))
    }

    /// Create a Valor from an integer count of centavos.
    pub fn from_centavos(centavos: i64) -> Result<Self, ValorError> {
        Self::new(Decimal::new(centavos, SCALE))
    }

    /// Caller guarantees `0 <= centavos <= MAX_CENTAVOS`.
    pub(crate) fn from_centavos_unchecked(centavos: i64) -> Self {
        Self(Decimal::new(centavos, SCALE))
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Amount in centavos.
    pub fn centavos(&self) -> i64 {
        // scale is always 2, so the mantissa is the centavo count
        self.0.mantissa() as i64
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Valor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Valor {
    type Err = ValorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s).map_err(|e| ValorError::ParseError(e.to_string()))?;
        Valor::new(decimal)
    }
}

impl TryFrom<String> for Valor {
    type Error = ValorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Valor::from_str(&value)
    }
}

impl From<Valor> for String {
    fn from(valor: Valor) -> Self {
        valor.to_string()
    }
}
