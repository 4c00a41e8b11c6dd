//! Boleto decoder
//!
//! Turns a pasted digit line into the two values the expense form needs:
//! the amount and the due date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::BoletoError;
use super::linha_digitavel::LinhaDigitavel;
use super::valor::Valor;

/// Amount and due date read from a digit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedBoleto {
    pub valor: Valor,
    pub data_vencimento: NaiveDate,
}

impl DecodedBoleto {
    /// Decode an already cleaned digit line.
    pub fn from_linha(linha: &LinhaDigitavel) -> Self {
        Self {
            valor: linha.valor(),
            data_vencimento: linha.fator_vencimento().data_vencimento(),
        }
    }
}

/// Decode a raw digit line.
///
/// Non-digit characters are stripped first. The result depends only on
/// the input; the current date plays no part.
///
/// # Errors
/// - `BoletoError::NoDigits` if the input has no digits
/// - `BoletoError::InvalidLength` if it does not have exactly 47
pub fn decode(linha_digitavel: &str) -> Result<DecodedBoleto, BoletoError> {
    let linha = LinhaDigitavel::parse(linha_digitavel)?;
    Ok(DecodedBoleto::from_linha(&linha))
}
