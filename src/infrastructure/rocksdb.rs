use super::{AccountProfile, VendorProfile};
use crate::domain::account::{Account, Credentials};
use crate::domain::ports::{AccountStore, VendorStore};
use crate::domain::vendor::Vendor;
use crate::error::StoreError;
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Column family for buyer account records.
pub const CF_ACCOUNTS: &str = "accounts";
/// Column family for vendor records.
pub const CF_VENDORS: &str = "vendors";

#[derive(Serialize, Deserialize)]
struct StoredAccount {
    /// `None` for records minted from a profile; those accept any password.
    password: Option<String>,
    account: Account,
}

/// A persistent store implementing both lookup ports over RocksDB.
///
/// Accounts and vendors live in separate column families, serialized as
/// JSON. `Clone` shares the underlying `Arc<DB>`. Provisioning profiles
/// behave as in the in-memory stores: a lookup miss mints a fresh record,
/// which only reaches disk once it is saved after a settlement.
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
    account_profile: Option<AccountProfile>,
    vendor_profile: Option<VendorProfile>,
}

impl RocksDbStore {
    /// Opens or creates a database at `path`, ensuring both column
    /// families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let cf_vendors = ColumnFamilyDescriptor::new(CF_VENDORS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_accounts, cf_vendors])
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            account_profile: None,
            vendor_profile: None,
        })
    }

    /// Mints records from the given profiles on lookup misses.
    pub fn with_provisioning(mut self, accounts: AccountProfile, vendors: VendorProfile) -> Self {
        self.account_profile = Some(accounts);
        self.vendor_profile = Some(vendors);
        self
    }

    fn cf_handle(&self, name: &'static str) -> Result<&rocksdb::ColumnFamily, StoreError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Backend(format!("column family '{name}' not found")))
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        cf_name: &'static str,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        let cf = self.cf_handle(cf_name)?;
        let bytes = self
            .db
            .get_cf(cf, key.as_bytes())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        match bytes {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put_json<T: Serialize>(
        &self,
        cf_name: &'static str,
        key: &str,
        value: &T,
    ) -> Result<(), StoreError> {
        let cf = self.cf_handle(cf_name)?;
        let bytes = serde_json::to_vec(value)?;
        self.db
            .put_cf(cf, key.as_bytes(), bytes)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    /// Writes an account with a password required at lookup.
    pub fn register_account(&self, account: Account, password: &str) -> Result<(), StoreError> {
        let record = StoredAccount {
            password: Some(password.to_string()),
            account,
        };
        self.put_json(CF_ACCOUNTS, &record.account.id, &record)
    }
}

#[async_trait]
impl AccountStore for RocksDbStore {
    async fn lookup(&self, credentials: &Credentials) -> Result<Account, StoreError> {
        match self.get_json::<StoredAccount>(CF_ACCOUNTS, &credentials.username)? {
            Some(stored) => match &stored.password {
                Some(password) if *password != credentials.password => {
                    Err(StoreError::Unauthenticated {
                        username: credentials.username.clone(),
                    })
                }
                _ => Ok(stored.account),
            },
            None => match self.account_profile {
                Some(profile) => Ok(Account::new(&credentials.username, profile.cash_balance)),
                None => Err(StoreError::account_not_found(&credentials.username)),
            },
        }
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        // Keep the registered password across saves.
        let password = self
            .get_json::<StoredAccount>(CF_ACCOUNTS, &account.id)?
            .and_then(|stored| stored.password);
        let record = StoredAccount {
            password,
            account: account.clone(),
        };
        self.put_json(CF_ACCOUNTS, &account.id, &record)
    }
}

#[async_trait]
impl VendorStore for RocksDbStore {
    async fn lookup(&self, vendor_id: &str) -> Result<Vendor, StoreError> {
        match self.get_json::<Vendor>(CF_VENDORS, vendor_id)? {
            Some(vendor) => Ok(vendor),
            None => match self.vendor_profile {
                Some(profile) => Ok(Vendor::new(vendor_id, profile.stock, profile.unit_price)),
                None => Err(StoreError::vendor_not_found(vendor_id)),
            },
        }
    }

    async fn save(&self, vendor: &Vendor) -> Result<(), StoreError> {
        self.put_json(CF_VENDORS, &vendor.id, vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_column_families() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).expect("failed to open RocksDB");

        assert!(store.db.cf_handle(CF_ACCOUNTS).is_some());
        assert!(store.db.cf_handle(CF_VENDORS).is_some());
    }

    #[tokio::test]
    async fn account_roundtrip_with_password() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        store
            .register_account(Account::new("alice", 300), "secret")
            .unwrap();

        let found = AccountStore::lookup(&store, &Credentials::new("alice", "secret"))
            .await
            .unwrap();
        assert_eq!(found.cash_balance, 300);

        let err = AccountStore::lookup(&store, &Credentials::new("alice", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unauthenticated { .. }));
    }

    #[tokio::test]
    async fn save_keeps_password_and_updates_state() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();
        store
            .register_account(Account::new("alice", 300), "secret")
            .unwrap();

        let mut updated = Account::new("alice", 20);
        updated.loyalty_points = 1;
        AccountStore::save(&store, &updated).await.unwrap();

        let found = AccountStore::lookup(&store, &Credentials::new("alice", "secret"))
            .await
            .unwrap();
        assert_eq!(found, updated);

        assert!(
            AccountStore::lookup(&store, &Credentials::new("alice", "wrong"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn vendor_roundtrip_and_minting() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap().with_provisioning(
            AccountProfile { cash_balance: 300 },
            VendorProfile {
                stock: 100,
                unit_price: 70,
            },
        );

        let minted = VendorStore::lookup(&store, "main-street").await.unwrap();
        assert_eq!(minted.stock, 100);

        let mut sold = minted.clone();
        sold.stock = 96;
        sold.revenue = 280;
        VendorStore::save(&store, &sold).await.unwrap();

        assert_eq!(VendorStore::lookup(&store, "main-street").await.unwrap(), sold);
    }

    #[tokio::test]
    async fn missing_records_without_profiles() {
        let dir = tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        let err = AccountStore::lookup(&store, &Credentials::new("nobody", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "account", .. }));

        let err = VendorStore::lookup(&store, "nowhere").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "vendor", .. }));
    }
}
