//! Implementations of the domain ports: in-memory stores, the optional
//! RocksDB-backed store, and dispatch notifiers.

pub mod dispatch;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;

/// Seed values for buyer accounts minted on first lookup.
///
/// A store configured with a profile answers lookups for unknown
/// identifiers with a fresh record built from these values, the way a
/// provisioning directory would, instead of failing with `NotFound`.
#[derive(Debug, Clone, Copy)]
pub struct AccountProfile {
    pub cash_balance: u64,
}

/// Seed values for vendor records minted on first lookup.
#[derive(Debug, Clone, Copy)]
pub struct VendorProfile {
    pub stock: u64,
    pub unit_price: u64,
}
