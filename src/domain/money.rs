use std::fmt;

/// Amounts are plain real numbers. Rounding to 2 decimals happens only when
/// an amount is formatted for display; the ledger keeps the unrounded value.
pub type Amount = f64;

/// Currency prefix used when none is configured.
pub const DEFAULT_CURRENCY: &str = "$";

/// Format an amount for display with a currency prefix and 2 decimals.
/// Example: (1000.0, "$") -> "$1000.00", (-12.346, "$") -> "$-12.35"
pub fn format_amount(amount: Amount, currency: &str) -> String {
    format!("{}{:.2}", currency, amount)
}

/// Parse user input into an amount.
/// Example: "50" -> 50.0, " -12.5 " -> -12.5, "1e3" -> 1000.0
///
/// Input that does not parse completely, or parses to NaN or an infinity,
/// is rejected.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let amount: Amount = input
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;

    if !amount.is_finite() {
        return Err(ParseAmountError::NotFinite);
    }

    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    NotFinite,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::NotFinite => write!(f, "amount must be a finite number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
