use serde::{Deserialize, Serialize};

/// A seller record, keyed by its location tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Location tag identifying the vendor.
    pub id: String,
    /// Units available for sale.
    pub stock: u64,
    /// Revenue accrued from settled purchases, in the same minor units as
    /// buyer balances.
    pub revenue: u64,
    /// Price per unit; always positive.
    pub unit_price: u64,
}

impl Vendor {
    pub fn new(id: impl Into<String>, stock: u64, unit_price: u64) -> Self {
        Self {
            id: id.into(),
            stock,
            revenue: 0,
            unit_price,
        }
    }
}
