//! # Cash-Flow Simplifier
//!
//! Clears a set of pairwise debts with fewer payments. Debts are first netted
//! into one signed balance per participant, then the largest creditor is
//! repeatedly paired with the largest debtor until every balance is zero.
//!
//! ## Design Principles
//!
//! - **Conservation**: net balances always sum to zero
//! - **Balance preservation**: replaying the settlements yields the same
//!   net balance for every participant as the original debts
//! - **Bounded output**: at most `participants - 1` payments
//! - **Deterministic output**: ties are broken by participant name
//! - **Fail fast**: balances that overflow `i64` are rejected, never wrapped
//!
//! The greedy pairing does not guarantee the minimum number of payments.
//!
//! ## Example
//!
//! ```
//! use cashflow_simplifier::{minimize_cash_flow, DebtRecord};
//!
//! let debts = vec![
//!     DebtRecord::new("A", "B", 40),
//!     DebtRecord::new("B", "C", 20),
//!     DebtRecord::new("C", "A", 10),
//! ];
//! let payments: Vec<String> = minimize_cash_flow(&debts)
//!     .unwrap()
//!     .iter()
//!     .map(|p| p.to_string())
//!     .collect();
//! assert_eq!(payments, vec!["A pays 20 to B", "A pays 10 to C"]);
//! ```

pub mod balance;
pub mod engine;
pub mod error;
pub mod matching;
pub mod netting;
pub mod prompt;
pub mod record;

pub use balance::NetBalance;
pub use engine::{write_settlements, CashFlowSimplifier, OutputFormat};
pub use error::{RecordError, Result, SettleError};
pub use matching::settle;
pub use netting::{net_balances, NetBalances, NettingAccumulator};
pub use record::{DebtRecord, DebtRow, SettlementRecord};

/// Nets `records` and returns payments that clear every balance.
///
/// The only failure is a net balance that does not fit in an `i64`.
pub fn minimize_cash_flow(records: &[DebtRecord]) -> Result<Vec<SettlementRecord>> {
    let balances = net_balances(records)?;
    Ok(settle(&balances))
}
