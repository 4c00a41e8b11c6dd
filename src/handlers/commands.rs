//! Command definitions
//!
//! Commands carry what the expense form submitted; results carry what it
//! gets pre-filled with.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{FatorVencimento, Valor};

// =========================================================================
// DecodeBoletoCommand
// =========================================================================

/// Command to decode one pasted digit line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeBoletoCommand {
    /// Digit line as typed or pasted, separators included
    pub linha_digitavel: String,
}

impl DecodeBoletoCommand {
    pub fn new(linha_digitavel: impl Into<String>) -> Self {
        Self {
            linha_digitavel: linha_digitavel.into(),
        }
    }
}

// =========================================================================
// DecodeBatchCommand
// =========================================================================

/// Command to decode several digit lines at once
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeBatchCommand {
    pub linhas: Vec<String>,
}

impl DecodeBatchCommand {
    pub fn new(linhas: Vec<String>) -> Self {
        Self { linhas }
    }
}

/// Result of a successful decode, ready to pre-fill an expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeBoletoResult {
    pub valor: Valor,
    pub data_vencimento: NaiveDate,
    pub fator_vencimento: FatorVencimento,
    pub codigo_banco: String,
    pub codigo_moeda: String,
}

/// Outcome for one line of a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchEntry {
    Decoded {
        index: usize,
        boleto: DecodeBoletoResult,
    },
    Rejected {
        index: usize,
        error_code: String,
        error: String,
    },
}

impl BatchEntry {
    pub fn index(&self) -> usize {
        match self {
            Self::Decoded { index, .. } | Self::Rejected { index, .. } => *index,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Self::Decoded { .. })
    }
}

/// Result of a batch decode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeBatchResult {
    pub results: Vec<BatchEntry>,
    pub decoded: usize,
    pub rejected: usize,
}
