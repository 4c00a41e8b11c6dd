//! Decode Handlers
//!
//! Decode digit lines for the expense form, one at a time or in batches.

use crate::domain::{DecodedBoleto, LinhaDigitavel, OperationContext};
use crate::error::{AppError, AppResult};

use super::{
    BatchEntry, DecodeBatchCommand, DecodeBatchResult, DecodeBoletoCommand, DecodeBoletoResult,
};

// =========================================================================
// DecodeBoletoHandler
// =========================================================================

/// Handler for single digit-line decoding
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeBoletoHandler;

impl DecodeBoletoHandler {
    pub fn new() -> Self {
        Self
    }

    /// Execute the decode command
    pub fn execute(
        &self,
        command: DecodeBoletoCommand,
        context: &OperationContext,
    ) -> AppResult<DecodeBoletoResult> {
        match decode_linha(&command.linha_digitavel) {
            Ok(result) => {
                tracing::debug!(
                    correlation_id = ?context.correlation_id,
                    fator_vencimento = %result.fator_vencimento,
                    data_vencimento = %result.data_vencimento,
                    valor = %result.valor,
                    "Boleto decoded"
                );
                Ok(result)
            }
            Err(e) => {
                // the raw line is not logged, only its digit count
                tracing::warn!(
                    correlation_id = ?context.correlation_id,
                    digits = digit_count(&command.linha_digitavel),
                    error = %e,
                    "Rejected digit line"
                );
                Err(e)
            }
        }
    }
}

// =========================================================================
// DecodeBatchHandler
// =========================================================================

/// Handler for batch decoding
#[derive(Debug, Clone, Copy)]
pub struct DecodeBatchHandler {
    max_batch_size: usize,
}

impl DecodeBatchHandler {
    pub fn new(max_batch_size: usize) -> Self {
        Self { max_batch_size }
    }

    /// Execute the batch command
    ///
    /// Rejected lines do not fail the batch; only an empty or oversized
    /// batch does.
    pub fn execute(
        &self,
        command: DecodeBatchCommand,
        context: &OperationContext,
    ) -> AppResult<DecodeBatchResult> {
        if command.linhas.is_empty() {
            return Err(AppError::InvalidRequest("linhas must not be empty".to_string()));
        }
        if command.linhas.len() > self.max_batch_size {
            return Err(AppError::InvalidRequest(format!(
                "at most {} linhas per batch (got {})",
                self.max_batch_size,
                command.linhas.len()
            )));
        }

        let results: Vec<BatchEntry> = command
            .linhas
            .iter()
            .enumerate()
            .map(|(index, linha)| decode_entry(index, linha))
            .collect();

        let decoded = results.iter().filter(|e| e.is_decoded()).count();
        let rejected = results.len() - decoded;

        tracing::info!(
            correlation_id = ?context.correlation_id,
            decoded,
            rejected,
            "Batch decoded"
        );

        Ok(DecodeBatchResult {
            results,
            decoded,
            rejected,
        })
    }
}

/// Decode one line into a batch entry; used by the API and the CLI.
pub fn decode_entry(index: usize, linha: &str) -> BatchEntry {
    match decode_linha(linha) {
        Ok(boleto) => BatchEntry::Decoded { index, boleto },
        Err(AppError::Domain(e)) => BatchEntry::Rejected {
            index,
            error_code: e.code().to_string(),
            error: e.to_string(),
        },
        Err(e) => BatchEntry::Rejected {
            index,
            error_code: e.status_and_code().1.to_string(),
            error: e.to_string(),
        },
    }
}

fn decode_linha(raw: &str) -> AppResult<DecodeBoletoResult> {
    let linha = LinhaDigitavel::parse(raw)?;
    let decoded = DecodedBoleto::from_linha(&linha);

    Ok(DecodeBoletoResult {
        valor: decoded.valor,
        data_vencimento: decoded.data_vencimento,
        fator_vencimento: linha.fator_vencimento(),
        codigo_banco: linha.codigo_banco().to_string(),
        codigo_moeda: linha.codigo_moeda().to_string(),
    })
}

fn digit_count(raw: &str) -> usize {
    raw.chars().filter(char::is_ascii_digit).count()
}
