use super::account::{Account, Credentials};
use super::vendor::Vendor;
use crate::error::StoreError;
use async_trait::async_trait;

/// Lookup and persistence port for buyer accounts.
///
/// `lookup` authenticates as well: unknown identifiers fail with
/// [`StoreError::NotFound`], bad passwords with
/// [`StoreError::Unauthenticated`]. `save` is best-effort; callers decide
/// whether a failed save is fatal.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn lookup(&self, credentials: &Credentials) -> Result<Account, StoreError>;
    async fn save(&self, account: &Account) -> Result<(), StoreError>;
}

/// Lookup and persistence port for vendor records.
#[async_trait]
pub trait VendorStore: Send + Sync {
    async fn lookup(&self, vendor_id: &str) -> Result<Vendor, StoreError>;
    async fn save(&self, vendor: &Vendor) -> Result<(), StoreError>;
}

/// Delivery notification, fired exactly once per successful settlement,
/// before any balance moves. The settlement core consumes no return value.
pub trait DispatchNotifier: Send + Sync {
    fn dispatch(&self, buyer_id: &str, vendor_id: &str, quantity: u64);
}

pub type AccountStoreBox = Box<dyn AccountStore>;
pub type VendorStoreBox = Box<dyn VendorStore>;
pub type DispatchNotifierBox = Box<dyn DispatchNotifier>;
