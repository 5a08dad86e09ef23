use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Precondition failures of the settlement routine.
///
/// Stock is checked before funds; the routine returns on the first failed
/// check, so the two refusals are mutually exclusive. None of these
/// variants leaves a partially mutated record behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("not enough stock at '{vendor}': requested {requested}, available {available}")]
    InsufficientStock {
        vendor: String,
        requested: u64,
        available: u64,
    },
    #[error("cannot afford purchase: cost {cost}, balance {balance}")]
    InsufficientFunds { cost: u64, balance: u64 },
    #[error("purchase cost overflows: {quantity} units at {unit_price} per unit")]
    ArithmeticOverflow { quantity: u64, unit_price: u64 },
}

/// Failures raised by the storage ports.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no {kind} record for '{id}'")]
    NotFound { kind: &'static str, id: String },
    #[error("invalid credentials for '{username}'")]
    Unauthenticated { username: String },
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn account_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "account",
            id: id.into(),
        }
    }

    pub fn vendor_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "vendor",
            id: id.into(),
        }
    }
}

/// Top-level error returned by the checkout engine.
///
/// Settlement refusals are locally recoverable (retry with adjusted
/// parameters); store errors propagate from the lookup ports unmodified.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error(transparent)]
    Settlement(#[from] SettlementError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
