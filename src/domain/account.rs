use serde::{Deserialize, Serialize};

/// Login credentials presented to the account lookup port.
///
/// Opaque to the settlement core; only the stores interpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// A buyer account.
///
/// Balances are abstract integer minor units (currency agnostic). The
/// unsigned width makes negative balances unrepresentable rather than
/// merely checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique buyer identifier (the login username).
    pub id: String,
    /// Spendable funds, debited once per successful settlement.
    pub cash_balance: u64,
    /// Monotonically non-decreasing counter, +1 per successful settlement.
    pub loyalty_points: u64,
}

impl Account {
    pub fn new(id: impl Into<String>, cash_balance: u64) -> Self {
        Self {
            id: id.into(),
            cash_balance,
            loyalty_points: 0,
        }
    }
}
