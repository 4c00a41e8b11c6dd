//! Domain module
//!
//! Core domain types and the boleto decoding rules.

pub mod boleto;
pub mod context;
pub mod error;
pub mod fator_vencimento;
pub mod linha_digitavel;
pub mod valor;

pub use boleto::{decode, DecodedBoleto};
pub use context::OperationContext;
pub use error::{BoletoError, DomainError};
pub use fator_vencimento::{FatorOutOfRange, FatorVencimento};
pub use linha_digitavel::LinhaDigitavel;
pub use valor::{Valor, ValorError};
