//! Per-participant net balance.
//!
//! Negative balances owe money, positive balances are owed money.

/// A participant's outstanding position.
///
/// # Invariants
///
/// - Across all participants produced by one netting run the balances sum to 0
/// - `balance` is never `i64::MIN`, so `outstanding()` is always representable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetBalance {
    /// Participant identifier.
    pub name: String,

    /// Signed net position.
    pub balance: i64,
}

impl NetBalance {
    /// Creates a balance for `name`.
    pub fn new(name: impl Into<String>, balance: i64) -> Self {
        NetBalance {
            name: name.into(),
            balance,
        }
    }

    /// Returns `true` if the participant is owed money.
    pub fn is_creditor(&self) -> bool {
        self.balance > 0
    }

    /// Returns `true` if the participant owes money.
    pub fn is_debtor(&self) -> bool {
        self.balance < 0
    }

    /// Returns `true` if nothing is owed either way.
    pub fn is_settled(&self) -> bool {
        self.balance == 0
    }

    /// Absolute amount still to be paid or received.
    pub fn outstanding(&self) -> i64 {
        self.balance.abs()
    }

    /// Records a payment received by this participant.
    ///
    /// Moves a debtor towards zero.
    pub fn receive(&mut self, amount: i64) {
        self.balance += amount;
    }

    /// Records a payment made by this participant.
    ///
    /// Moves a creditor towards zero.
    pub fn pay(&mut self, amount: i64) {
        self.balance -= amount;
    }
}
