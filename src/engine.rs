//! Record collection and result output around the netting and matching stages.
//!
//! The simplifier accumulates debt records from any source (CSV, console or
//! direct calls), then nets and settles them in one pass.

use crate::error::Result;
use crate::matching::settle;
use crate::netting::NetBalances;
use crate::record::{DebtRecord, DebtRow, SettlementRecord};
use clap::ValueEnum;
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use std::io::{Read, Write};

/// How settlements are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `<from> pays <amount> to <to>` line per settlement
    #[default]
    Text,

    /// `from,to,amount` header followed by one row per settlement
    Csv,
}

/// Accumulates debt records and computes the settlements that clear them.
pub struct CashFlowSimplifier {
    /// Records in the order they were received.
    records: Vec<DebtRecord>,
}

impl CashFlowSimplifier {
    /// Creates a new simplifier with no records.
    pub fn new() -> Self {
        CashFlowSimplifier {
            records: Vec::new(),
        }
    }

    /// Adds one record.
    pub fn add_record(&mut self, record: DebtRecord) {
        debug!(
            "Recorded debt: {} owes {} to {}",
            record.from, record.amount, record.to
        );
        self.records.push(record);
    }

    /// Returns the records collected so far.
    pub fn records(&self) -> &[DebtRecord] {
        &self.records
    }

    /// Reads debt records from CSV with a `from,to,amount` header.
    ///
    /// Invalid rows are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<DebtRow>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(row) => match row.parse() {
                    Ok(record) => self.add_record(record),
                    Err(e) => warn!("Row {}: {}, skipping", row_num, e),
                },
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        info!("Read {} debt records", self.records.len());
        Ok(())
    }

    /// Nets the collected records and computes the settlements.
    pub fn simplify(&self) -> Result<Vec<SettlementRecord>> {
        let balances = NetBalances::from_records(&self.records)?;
        debug!(
            "Netted {} records into {} balances",
            self.records.len(),
            balances.len()
        );
        Ok(settle(&balances))
    }

    /// Simplifies and writes the settlements in the requested format.
    ///
    /// Output order is the pairing order of the matching engine.
    pub fn write_output<W: Write>(&self, writer: W, format: OutputFormat) -> Result<()> {
        let settlements = self.simplify()?;
        write_settlements(&settlements, writer, format)
    }
}

impl Default for CashFlowSimplifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes settlements in the requested format.
pub fn write_settlements<W: Write>(
    settlements: &[SettlementRecord],
    mut writer: W,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for settlement in settlements {
                writeln!(writer, "{}", settlement)?;
            }
            writer.flush()?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);

            // Serializing nothing would skip the header.
            if settlements.is_empty() {
                csv_writer.write_record(["from", "to", "amount"])?;
            }
            for settlement in settlements {
                csv_writer.serialize(settlement)?;
            }

            csv_writer.flush()?;
        }
    }

    Ok(())
}
