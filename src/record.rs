//! Debt and settlement records, plus parsing of raw input into them.

use crate::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed debt: `from` owes `amount` to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtRecord {
    /// Participant who owes money
    pub from: String,

    /// Participant who is owed money
    pub to: String,

    /// Magnitude owed, in whole currency units
    pub amount: i64,
}

impl DebtRecord {
    /// Creates a record without validation.
    ///
    /// Netting accepts any record; validation belongs to the parsers below.
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: i64) -> Self {
        DebtRecord {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }

    /// Parses a console line of the form `from to amount`.
    ///
    /// Fields are separated by any run of whitespace.
    pub fn from_line(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(RecordError::FieldCount {
                found: fields.len(),
            });
        }

        let amount = parse_amount(fields[2])?;
        Ok(DebtRecord::new(fields[0], fields[1], amount))
    }
}

/// Raw debt row as read from CSV.
///
/// All fields are kept as strings so that a bad amount produces a
/// `RecordError` with the offending text rather than an opaque serde error.
#[derive(Debug, Deserialize)]
pub struct DebtRow {
    pub from: String,
    pub to: String,
    pub amount: String,
}

impl DebtRow {
    /// Validates the row into a `DebtRecord`.
    pub fn parse(&self) -> Result<DebtRecord, RecordError> {
        let from = self.from.trim();
        let to = self.to.trim();
        if from.is_empty() || to.is_empty() {
            return Err(RecordError::EmptyParticipant);
        }

        let amount = parse_amount(&self.amount)?;
        Ok(DebtRecord::new(from, to, amount))
    }
}

/// Parses a non-negative whole amount.
fn parse_amount(raw: &str) -> Result<i64, RecordError> {
    let trimmed = raw.trim();
    let amount: i64 = trimmed
        .parse()
        .map_err(|_| RecordError::InvalidAmount(trimmed.to_string()))?;
    if amount < 0 {
        return Err(RecordError::NegativeAmount(amount));
    }
    Ok(amount)
}

/// A payment instruction produced by the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementRecord {
    /// Debtor making the payment
    pub from: String,

    /// Creditor receiving the payment
    pub to: String,

    /// Always positive
    pub amount: i64,
}

impl SettlementRecord {
    /// Creates a payment of `amount` from `from` to `to`.
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: i64) -> Self {
        SettlementRecord {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

impl fmt::Display for SettlementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} to {}", self.from, self.amount, self.to)
    }
}

impl From<&SettlementRecord> for DebtRecord {
    fn from(settlement: &SettlementRecord) -> Self {
        DebtRecord::new(
            settlement.from.clone(),
            settlement.to.clone(),
            settlement.amount,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(from: &str, to: &str, amount: &str) -> DebtRow {
        DebtRow {
            from: from.to_string(),
            to: to.to_string(),
            amount: amount.to_string(),
        }
    }

    #[test]
    fn test_from_line_parses_three_fields() {
        let record = DebtRecord::from_line("Alice Bob 100").unwrap();
        assert_eq!(record, DebtRecord::new("Alice", "Bob", 100));
    }

    #[test]
    fn test_from_line_handles_extra_whitespace() {
        let record = DebtRecord::from_line("  Alice \t Bob   25  ").unwrap();
        assert_eq!(record, DebtRecord::new("Alice", "Bob", 25));
    }

    #[test]
    fn test_from_line_rejects_wrong_field_count() {
        assert_eq!(
            DebtRecord::from_line("Alice Bob"),
            Err(RecordError::FieldCount { found: 2 })
        );
        assert_eq!(
            DebtRecord::from_line("Alice Bob 10 extra"),
            Err(RecordError::FieldCount { found: 4 })
        );
        assert_eq!(
            DebtRecord::from_line(""),
            Err(RecordError::FieldCount { found: 0 })
        );
    }

    #[test]
    fn test_from_line_rejects_non_integer_amount() {
        assert_eq!(
            DebtRecord::from_line("Alice Bob 10.5"),
            Err(RecordError::InvalidAmount("10.5".to_string()))
        );
        assert_eq!(
            DebtRecord::from_line("Alice Bob ten"),
            Err(RecordError::InvalidAmount("ten".to_string()))
        );
    }

    #[test]
    fn test_from_line_rejects_negative_amount() {
        assert_eq!(
            DebtRecord::from_line("Alice Bob -5"),
            Err(RecordError::NegativeAmount(-5))
        );
    }

    #[test]
    fn test_row_parse_trims_fields() {
        let record = row(" Alice ", " Bob", " 40 ").parse().unwrap();
        assert_eq!(record, DebtRecord::new("Alice", "Bob", 40));
    }

    #[test]
    fn test_row_parse_rejects_empty_participant() {
        assert_eq!(
            row("", "Bob", "40").parse(),
            Err(RecordError::EmptyParticipant)
        );
        assert_eq!(
            row("Alice", "   ", "40").parse(),
            Err(RecordError::EmptyParticipant)
        );
    }

    #[test]
    fn test_row_parse_rejects_bad_amount() {
        assert_eq!(
            row("Alice", "Bob", "").parse(),
            Err(RecordError::InvalidAmount(String::new()))
        );
    }

    #[test]
    fn test_settlement_display() {
        let settlement = SettlementRecord::new("A", "B", 100);
        assert_eq!(settlement.to_string(), "A pays 100 to B");
    }
}
