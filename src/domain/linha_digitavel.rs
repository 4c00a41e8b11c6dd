//! Linha digitável
//!
//! The typable form of a bank boleto barcode. Presenting UIs group the
//! digits with spaces and dots; only the digits carry meaning.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use super::error::BoletoError;
use super::fator_vencimento::FatorVencimento;
use super::valor::Valor;

/// Digits in a bank boleto digit line
pub const LINHA_DIGITAVEL_LEN: usize = 47;

const BANCO: Range<usize> = 0..3;
const MOEDA: usize = 3;
const FATOR: Range<usize> = 33..37;
const VALOR: Range<usize> = 37..47;

/// A cleaned, length-checked digit line.
///
/// Check digits are not verified.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinhaDigitavel(String);

impl LinhaDigitavel {
    /// Strip separators and check the digit count.
    pub fn parse(raw: &str) -> Result<Self, BoletoError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

        if digits.is_empty() {
            return Err(BoletoError::NoDigits);
        }
        if digits.len() != LINHA_DIGITAVEL_LEN {
            return Err(BoletoError::InvalidLength {
                found: digits.len(),
            });
        }

        Ok(Self(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Issuing bank (COMPE code)
    pub fn codigo_banco(&self) -> &str {
        &self.0[BANCO]
    }

    /// Currency code; `9` is BRL
    pub fn codigo_moeda(&self) -> char {
        char::from(self.0.as_bytes()[MOEDA])
    }

    pub fn fator_vencimento(&self) -> FatorVencimento {
        // four ASCII digits always fit in the factor range
        FatorVencimento::from_digits_unchecked(parse_digits(&self.0[FATOR]) as u16)
    }

    pub fn valor(&self) -> Valor {
        // ten digits of centavos never exceed the valor maximum
        Valor::from_centavos_unchecked(parse_digits(&self.0[VALOR]) as i64)
    }
}

/// Fold a run of ASCII digits into an integer.
fn parse_digits(digits: &str) -> u64 {
    digits
        .bytes()
        .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'))
}

impl FromStr for LinhaDigitavel {
    type Err = BoletoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LinhaDigitavel {
    /// Conventional 5.5 5.6 5.6 1 14 grouping
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.0;
        write!(
            f,
            "{}.{} {}.{} {}.{} {} {}",
            &d[0..5],
            &d[5..10],
            &d[10..15],
            &d[15..21],
            &d[21..26],
            &d[26..32],
            &d[32..33],
            &d[33..47]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMATTED: &str = "34191.09008 01234.567804 01234.567805 1 23450000012345";
    const DIGITS: &str = "34191090080123456780401234567805123450000012345";

    #[test]
    fn test_parse_strips_separators() {
        let linha = LinhaDigitavel::parse(FORMATTED).unwrap();
        assert_eq!(linha.digits(), DIGITS);
    }

    #[test]
    fn test_separators_do_not_shift_offsets() {
        let plain = LinhaDigitavel::parse(DIGITS).unwrap();
        let dotted = LinhaDigitavel::parse(&format!(" 341.91-{}\n", &DIGITS[5..])).unwrap();
        assert_eq!(plain, dotted);
        assert_eq!(dotted.fator_vencimento().value(), 2345);
    }

    #[test]
    fn test_display_round_trips_conventional_grouping() {
        let linha = LinhaDigitavel::parse(DIGITS).unwrap();
        assert_eq!(linha.to_string(), FORMATTED);
    }

    #[test]
    fn test_header_fields() {
        let linha: LinhaDigitavel = DIGITS.parse().unwrap();
        assert_eq!(linha.codigo_banco(), "341");
        assert_eq!(linha.codigo_moeda(), '9');
    }

    #[test]
    fn test_valor_reads_last_ten_digits() {
        let linha = LinhaDigitavel::parse(DIGITS).unwrap();
        assert_eq!(linha.valor().centavos(), 12345);

        let max = LinhaDigitavel::parse(&format!("{}9999999999", &DIGITS[..37])).unwrap();
        assert_eq!(max.valor().to_string(), "99999999.99");
    }

    #[test]
    fn test_short_line_rejected() {
        let err = LinhaDigitavel::parse(&DIGITS[..46]).unwrap_err();
        assert_eq!(err, BoletoError::InvalidLength { found: 46 });
    }

    #[test]
    fn test_48_digit_line_rejected() {
        let err = LinhaDigitavel::parse(&format!("{DIGITS}0")).unwrap_err();
        assert_eq!(err, BoletoError::InvalidLength { found: 48 });
    }

    #[test]
    fn test_no_digits_rejected() {
        assert_eq!(LinhaDigitavel::parse("").unwrap_err(), BoletoError::NoDigits);
        assert_eq!(
            LinhaDigitavel::parse(" .. - ").unwrap_err(),
            BoletoError::NoDigits
        );
    }

    #[test]
    fn test_non_ascii_digits_are_stripped() {
        // Arabic-Indic digits are not decimal ASCII digits
        let err = LinhaDigitavel::parse("٣٤١").unwrap_err();
        assert_eq!(err, BoletoError::NoDigits);
    }

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_digits("0000012345"), 12345);
        assert_eq!(parse_digits("9999999999"), 9_999_999_999);
        assert_eq!(parse_digits("0000"), 0);
    }
}
