//! Matching engine: greedy extreme pairing of creditors and debtors.
//!
//! The largest creditor is repeatedly paired with the largest debtor. Each
//! pairing settles the smaller of the two outstanding amounts, so at least one
//! side drops out per step and at most `participants - 1` payments are emitted.
//! This is a heuristic; the true minimum is NP-hard.

use crate::balance::NetBalance;
use crate::netting::NetBalances;
use crate::record::SettlementRecord;
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Pool entry for a participant who is owed money.
///
/// Orders by balance, so the max-heap yields the largest creditor first.
/// Equal balances yield the lexicographically smallest name first.
#[derive(Debug, PartialEq, Eq)]
struct Creditor(NetBalance);

impl Ord for Creditor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .balance
            .cmp(&other.0.balance)
            .then_with(|| other.0.name.cmp(&self.0.name))
    }
}

impl PartialOrd for Creditor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pool entry for a participant who owes money.
///
/// Orders by reversed balance, so the max-heap yields the most negative
/// balance first. Ties break by name as for `Creditor`.
#[derive(Debug, PartialEq, Eq)]
struct Debtor(NetBalance);

impl Ord for Debtor {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .balance
            .cmp(&self.0.balance)
            .then_with(|| other.0.name.cmp(&self.0.name))
    }
}

impl PartialOrd for Debtor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Produces settlement payments that clear every balance.
///
/// Replaying the returned records through netting reproduces `balances`
/// for every participant with a nonzero balance. Settled participants never
/// appear in the output.
pub fn settle(balances: &NetBalances) -> Vec<SettlementRecord> {
    let mut creditors = BinaryHeap::new();
    let mut debtors = BinaryHeap::new();

    for balance in balances.to_balances() {
        if balance.is_creditor() {
            creditors.push(Creditor(balance));
        } else if balance.is_debtor() {
            debtors.push(Debtor(balance));
        }
    }

    debug!(
        "Matching {} creditors against {} debtors",
        creditors.len(),
        debtors.len()
    );

    let mut settlements =
        Vec::with_capacity((creditors.len() + debtors.len()).saturating_sub(1));

    while !creditors.is_empty() && !debtors.is_empty() {
        let (Some(Creditor(mut creditor)), Some(Debtor(mut debtor))) =
            (creditors.pop(), debtors.pop())
        else {
            break;
        };

        let settled = creditor.outstanding().min(debtor.outstanding());
        debug!(
            "{} pays {} to {} (outstanding {} / {})",
            debtor.name,
            settled,
            creditor.name,
            debtor.outstanding(),
            creditor.outstanding()
        );

        settlements.push(SettlementRecord::new(
            debtor.name.clone(),
            creditor.name.clone(),
            settled,
        ));

        creditor.pay(settled);
        debtor.receive(settled);

        if creditor.is_creditor() {
            creditors.push(Creditor(creditor));
        }
        if debtor.is_debtor() {
            debtors.push(Debtor(debtor));
        }
    }

    debug_assert!(
        creditors.is_empty() && debtors.is_empty(),
        "unbalanced pools: {} creditors and {} debtors left",
        creditors.len(),
        debtors.len()
    );

    info!(
        "Settled {} participants with {} payments",
        balances.nonzero().count(),
        settlements.len()
    );

    settlements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netting::net_balances;
    use crate::record::DebtRecord;

    fn settle_records(records: &[(&str, &str, i64)]) -> Vec<String> {
        let records: Vec<DebtRecord> = records
            .iter()
            .map(|(from, to, amount)| DebtRecord::new(*from, *to, *amount))
            .collect();
        let balances = net_balances(&records).unwrap();
        settle(&balances).iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_balances() {
        assert!(settle(&NetBalances::new()).is_empty());
    }

    #[test]
    fn test_single_debt() {
        assert_eq!(settle_records(&[("A", "B", 100)]), vec!["A pays 100 to B"]);
    }

    #[test]
    fn test_chain_skips_settled_middle() {
        assert_eq!(
            settle_records(&[("A", "B", 100), ("B", "C", 100)]),
            vec!["A pays 100 to C"]
        );
    }

    #[test]
    fn test_triangle_pairs_largest_first() {
        assert_eq!(
            settle_records(&[("A", "B", 40), ("B", "C", 20), ("C", "A", 10)]),
            vec!["A pays 20 to B", "A pays 10 to C"]
        );
    }

    #[test]
    fn test_all_settled_produces_nothing() {
        assert!(settle_records(&[("A", "B", 10), ("B", "A", 10)]).is_empty());
    }

    #[test]
    fn test_ties_break_by_name() {
        // Two creditors and two debtors, all of magnitude 50.
        assert_eq!(
            settle_records(&[("D", "B", 50), ("C", "A", 50)]),
            vec!["C pays 50 to A", "D pays 50 to B"]
        );
    }

    #[test]
    fn test_creditor_is_reinserted_until_settled() {
        assert_eq!(
            settle_records(&[("A", "Z", 30), ("B", "Z", 20), ("C", "Z", 10)]),
            vec!["A pays 30 to Z", "B pays 20 to Z", "C pays 10 to Z"]
        );
    }

    #[test]
    fn test_payment_count_bound() {
        let settlements = settle_records(&[
            ("A", "B", 13),
            ("B", "C", 7),
            ("C", "D", 21),
            ("D", "E", 2),
            ("E", "A", 9),
            ("B", "E", 4),
        ]);
        assert!(settlements.len() <= 4);
    }

    #[test]
    fn test_creditor_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(Creditor(NetBalance::new("b", 10)));
        heap.push(Creditor(NetBalance::new("a", 10)));
        heap.push(Creditor(NetBalance::new("c", 30)));

        let order: Vec<String> = std::iter::from_fn(|| heap.pop().map(|c| c.0.name)).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_debtor_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(Debtor(NetBalance::new("b", -10)));
        heap.push(Debtor(NetBalance::new("c", -30)));
        heap.push(Debtor(NetBalance::new("a", -10)));

        let order: Vec<String> = std::iter::from_fn(|| heap.pop().map(|d| d.0.name)).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }
}
