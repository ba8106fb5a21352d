//! Netting stage: collapses debt records into one signed balance per participant.

use crate::balance::NetBalance;
use crate::error::{Result, SettleError};
use crate::record::DebtRecord;
use log::debug;
use std::collections::BTreeMap;

/// Running per-participant totals while records are netted.
///
/// Sums are kept in `i128`: each record moves a balance by at most
/// `i64::MAX`, so no sequence shorter than 2^64 records can overflow. The
/// range check against `i64` happens once, in `finish`, which makes the
/// outcome independent of record order.
#[derive(Debug, Default)]
pub struct NettingAccumulator {
    balances: BTreeMap<String, i128>,
}

impl NettingAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        NettingAccumulator {
            balances: BTreeMap::new(),
        }
    }

    /// Debits `from` and credits `to` by the record's amount.
    ///
    /// Both participants get an entry even if the record nets to nothing.
    pub fn apply(&mut self, record: &DebtRecord) {
        let amount = i128::from(record.amount);
        *self.balances.entry(record.from.clone()).or_insert(0) -= amount;
        *self.balances.entry(record.to.clone()).or_insert(0) += amount;

        debug!("Netted {} -> {} ({})", record.from, record.to, record.amount);
    }

    /// Converts the totals into `i64` balances.
    ///
    /// Fails on the first participant, in name order, whose balance is
    /// outside `i64` or equal to `i64::MIN`.
    pub fn finish(self) -> Result<NetBalances> {
        let mut balances = BTreeMap::new();
        for (name, total) in self.balances {
            match checked_balance(total) {
                Some(balance) => {
                    balances.insert(name, balance);
                }
                None => return Err(SettleError::BalanceOverflow { participant: name }),
            }
        }
        Ok(NetBalances { balances })
    }
}

/// Net balance per participant, keyed by name.
///
/// Iteration is sorted by name so that anything derived from it is
/// reproducible. Every balance fits in an `i64` and is never `i64::MIN`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetBalances {
    balances: BTreeMap<String, i64>,
}

impl NetBalances {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        NetBalances {
            balances: BTreeMap::new(),
        }
    }

    /// Nets every record, then range-checks the final balances.
    pub fn from_records<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a DebtRecord>,
    {
        let mut accumulator = NettingAccumulator::new();
        for record in records {
            accumulator.apply(record);
        }
        accumulator.finish()
    }

    /// Returns the net balance for a participant, if seen.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.balances.get(name).copied()
    }

    /// Number of distinct participants seen, settled ones included.
    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Iterates over `(name, balance)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.balances
            .iter()
            .map(|(name, balance)| (name.as_str(), *balance))
    }

    /// Iterates over participants whose balance is not zero.
    pub fn nonzero(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.iter().filter(|(_, balance)| *balance != 0)
    }

    /// Sum of all balances, widened so the check itself cannot overflow.
    ///
    /// Always 0 for balances built from debt records.
    pub fn total(&self) -> i128 {
        self.balances.values().map(|b| i128::from(*b)).sum()
    }

    /// Owned copies of every balance, settled ones included.
    pub fn to_balances(&self) -> Vec<NetBalance> {
        self.iter()
            .map(|(name, balance)| NetBalance::new(name, balance))
            .collect()
    }
}

/// Computes per-participant net balances from debt records.
pub fn net_balances(records: &[DebtRecord]) -> Result<NetBalances> {
    NetBalances::from_records(records)
}

/// Narrows a total to `i64`, rejecting `i64::MIN` so every balance can be negated.
fn checked_balance(total: i128) -> Option<i64> {
    i64::try_from(total)
        .ok()
        .filter(|balance| *balance != i64::MIN)
}
