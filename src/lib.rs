//! boleto_intake Library
//!
//! Boleto digit-line decoding for expense-entry pre-fill, plus the HTTP
//! service and batch tooling around it.

pub mod api;
pub mod config;
pub mod domain;
mod error;
pub mod handlers;
pub mod jobs;

pub use config::Config;
pub use domain::{decode, BoletoError, DecodedBoleto, DomainError, LinhaDigitavel, Valor};
pub use error::{AppError, AppResult, ErrorResponse};
