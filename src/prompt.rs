//! Interactive collection of debt records from a console.
//!
//! Asks for a transaction count, then one `from to amount` line per
//! transaction. A malformed line is reported and the same index is asked for
//! again, so exactly `count` valid records are returned.

use crate::error::{RecordError, Result, SettleError};
use crate::record::DebtRecord;
use log::debug;
use std::io::{BufRead, Write};

const INVALID_INPUT: &str = "Invalid input. Try again.";

/// Heading printed before the settlements in interactive mode.
pub const RESULT_HEADING: &str = "Optimized Transactions to Settle All Debts:";

/// Prompts on `output` and reads records from `input` until `count` are valid.
///
/// Returns `SettleError::InputClosed` if `input` ends early.
pub fn collect_records<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<Vec<DebtRecord>> {
    let count = read_count(&mut input, &mut output)?;

    writeln!(output, "Enter each transaction in format: from to amount")?;

    let mut records = Vec::with_capacity(count);
    while records.len() < count {
        write!(output, "Transaction {}: ", records.len() + 1)?;
        output.flush()?;

        let line = match read_line(&mut input)? {
            Line::Text(line) => line,
            Line::NotUtf8 => {
                debug!("Rejected transaction line: not valid UTF-8");
                writeln!(output, "{}", INVALID_INPUT)?;
                continue;
            }
            Line::Closed => {
                return Err(SettleError::InputClosed {
                    expected: count,
                    received: records.len(),
                })
            }
        };

        match DebtRecord::from_line(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                debug!("Rejected transaction line {:?}: {}", line, e);
                writeln!(output, "{}", retry_message(&e))?;
            }
        }
    }

    Ok(records)
}

/// Reads the transaction count, re-prompting until it parses.
fn read_count<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<usize> {
    loop {
        write!(output, "Enter number of transactions: ")?;
        output.flush()?;

        let count = match read_line(input)? {
            Line::Text(line) => line.trim().parse::<usize>().ok(),
            Line::NotUtf8 => None,
            Line::Closed => {
                return Err(SettleError::InputClosed {
                    expected: 0,
                    received: 0,
                })
            }
        };

        match count {
            Some(count) => return Ok(count),
            None => writeln!(output, "Count must be a non-negative integer.")?,
        }
    }
}

/// One line of console input.
enum Line {
    /// Line text without its terminator
    Text(String),

    /// Bytes that are not valid UTF-8
    NotUtf8,

    /// End of input
    Closed,
}

/// Reads one line as raw bytes so that bad encoding is recoverable.
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Line> {
    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(Line::Closed);
    }

    Ok(match String::from_utf8(bytes) {
        Ok(line) => Line::Text(line.trim_end_matches(['\r', '\n']).to_string()),
        Err(_) => Line::NotUtf8,
    })
}

fn retry_message(error: &RecordError) -> &'static str {
    match error {
        RecordError::FieldCount { .. } | RecordError::EmptyParticipant => INVALID_INPUT,
        RecordError::InvalidAmount(_) => "Amount must be an integer.",
        RecordError::NegativeAmount(_) => "Amount must not be negative.",
    }
}
