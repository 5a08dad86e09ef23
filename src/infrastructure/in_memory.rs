use super::{AccountProfile, VendorProfile};
use crate::domain::account::{Account, Credentials};
use crate::domain::ports::{AccountStore, VendorStore};
use crate::domain::vendor::Vendor;
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

struct StoredAccount {
    /// `None` for records minted from a profile; those accept any password.
    password: Option<String>,
    account: Account,
}

/// A thread-safe in-memory account store.
///
/// Uses `Arc<RwLock<HashMap>>` so clones share state. Registered records
/// carry a password checked on lookup; with a provisioning profile,
/// unknown usernames are answered with a freshly minted record instead of
/// `NotFound`.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<String, StoredAccount>>>,
    profile: Option<AccountProfile>,
}

impl InMemoryAccountStore {
    /// Creates an empty store; unknown usernames fail with `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that mints accounts from `profile` on first lookup.
    pub fn with_provisioning(profile: AccountProfile) -> Self {
        Self {
            profile: Some(profile),
            ..Self::default()
        }
    }

    /// Registers an account with a password required at lookup.
    pub async fn register(&self, account: Account, password: impl Into<String>) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(
            account.id.clone(),
            StoredAccount {
                password: Some(password.into()),
                account,
            },
        );
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn lookup(&self, credentials: &Credentials) -> Result<Account, StoreError> {
        let accounts = self.accounts.read().await;
        match accounts.get(&credentials.username) {
            Some(stored) => match &stored.password {
                Some(password) if *password != credentials.password => {
                    Err(StoreError::Unauthenticated {
                        username: credentials.username.clone(),
                    })
                }
                _ => Ok(stored.account.clone()),
            },
            None => match self.profile {
                Some(profile) => Ok(Account::new(&credentials.username, profile.cash_balance)),
                None => Err(StoreError::account_not_found(&credentials.username)),
            },
        }
    }

    async fn save(&self, account: &Account) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&account.id) {
            // Keep the registered password across saves.
            Some(stored) => stored.account = account.clone(),
            None => {
                accounts.insert(
                    account.id.clone(),
                    StoredAccount {
                        password: None,
                        account: account.clone(),
                    },
                );
            }
        }
        Ok(())
    }
}

/// A thread-safe in-memory vendor store, same shape as the account store
/// minus credentials.
#[derive(Default, Clone)]
pub struct InMemoryVendorStore {
    vendors: Arc<RwLock<HashMap<String, Vendor>>>,
    profile: Option<VendorProfile>,
}

impl InMemoryVendorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provisioning(profile: VendorProfile) -> Self {
        Self {
            profile: Some(profile),
            ..Self::default()
        }
    }

    pub async fn register(&self, vendor: Vendor) {
        let mut vendors = self.vendors.write().await;
        vendors.insert(vendor.id.clone(), vendor);
    }
}

#[async_trait]
impl VendorStore for InMemoryVendorStore {
    async fn lookup(&self, vendor_id: &str) -> Result<Vendor, StoreError> {
        let vendors = self.vendors.read().await;
        match vendors.get(vendor_id) {
            Some(vendor) => Ok(vendor.clone()),
            None => match self.profile {
                Some(profile) => Ok(Vendor::new(vendor_id, profile.stock, profile.unit_price)),
                None => Err(StoreError::vendor_not_found(vendor_id)),
            },
        }
    }

    async fn save(&self, vendor: &Vendor) -> Result<(), StoreError> {
        let mut vendors = self.vendors.write().await;
        vendors.insert(vendor.id.clone(), vendor.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registered_account_roundtrip() {
        let store = InMemoryAccountStore::new();
        store.register(Account::new("alice", 300), "secret").await;

        let found = store
            .lookup(&Credentials::new("alice", "secret"))
            .await
            .unwrap();
        assert_eq!(found.cash_balance, 300);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthenticated() {
        let store = InMemoryAccountStore::new();
        store.register(Account::new("alice", 300), "secret").await;

        let err = store
            .lookup(&Credentials::new("alice", "wrong"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unauthenticated { .. }));
    }

    #[tokio::test]
    async fn unknown_account_is_not_found_without_profile() {
        let store = InMemoryAccountStore::new();

        let err = store
            .lookup(&Credentials::new("nobody", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "account", .. }));
    }

    #[tokio::test]
    async fn profile_mints_unknown_accounts() {
        let store = InMemoryAccountStore::with_provisioning(AccountProfile { cash_balance: 300 });

        let minted = store
            .lookup(&Credentials::new("anyone", "anything"))
            .await
            .unwrap();
        assert_eq!(minted.id, "anyone");
        assert_eq!(minted.cash_balance, 300);
        assert_eq!(minted.loyalty_points, 0);
    }

    #[tokio::test]
    async fn save_overwrites_and_keeps_password() {
        let store = InMemoryAccountStore::new();
        store.register(Account::new("alice", 300), "secret").await;

        let mut updated = Account::new("alice", 20);
        updated.loyalty_points = 1;
        store.save(&updated).await.unwrap();

        let found = store
            .lookup(&Credentials::new("alice", "secret"))
            .await
            .unwrap();
        assert_eq!(found.cash_balance, 20);
        assert_eq!(found.loyalty_points, 1);

        // Password still enforced after the save.
        assert!(
            store
                .lookup(&Credentials::new("alice", "wrong"))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn saved_minted_account_wins_over_profile() {
        let store = InMemoryAccountStore::with_provisioning(AccountProfile { cash_balance: 300 });

        let mut account = store
            .lookup(&Credentials::new("alice", "pw"))
            .await
            .unwrap();
        account.cash_balance = 20;
        store.save(&account).await.unwrap();

        let found = store
            .lookup(&Credentials::new("alice", "pw"))
            .await
            .unwrap();
        assert_eq!(found.cash_balance, 20);
    }

    #[tokio::test]
    async fn vendor_store_roundtrip_and_minting() {
        let store = InMemoryVendorStore::with_provisioning(VendorProfile {
            stock: 100,
            unit_price: 70,
        });

        let minted = store.lookup("main-street").await.unwrap();
        assert_eq!(minted.stock, 100);
        assert_eq!(minted.unit_price, 70);
        assert_eq!(minted.revenue, 0);

        let mut sold = minted.clone();
        sold.stock = 96;
        sold.revenue = 280;
        store.save(&sold).await.unwrap();

        assert_eq!(store.lookup("main-street").await.unwrap(), sold);
    }

    #[tokio::test]
    async fn unknown_vendor_is_not_found_without_profile() {
        let store = InMemoryVendorStore::new();

        let err = store.lookup("nowhere").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "vendor", .. }));
    }
}
