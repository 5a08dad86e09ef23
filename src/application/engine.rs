use crate::domain::account::{Account, Credentials};
use crate::domain::ports::{AccountStoreBox, DispatchNotifierBox, VendorStoreBox};
use crate::domain::settlement::{Receipt, settle};
use crate::domain::vendor::Vendor;
use crate::error::Result;
use tracing::{info, warn};

/// Post-settlement record states returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub account: Account,
    pub vendor: Vendor,
    pub receipt: Receipt,
}

/// Entry point for settling a single purchase.
///
/// Owns the storage ports and the dispatch notifier. Each call looks up
/// fresh records, runs the settlement routine on them, and persists the
/// results; the records are never shared or retained across calls.
pub struct CheckoutEngine {
    accounts: AccountStoreBox,
    vendors: VendorStoreBox,
    dispatcher: DispatchNotifierBox,
}

impl CheckoutEngine {
    pub fn new(
        accounts: AccountStoreBox,
        vendors: VendorStoreBox,
        dispatcher: DispatchNotifierBox,
    ) -> Self {
        Self {
            accounts,
            vendors,
            dispatcher,
        }
    }

    /// Settles a purchase of `quantity` units from `vendor_id` on behalf of
    /// the buyer identified by `credentials`.
    ///
    /// Lookup failures (`NotFound`, `Unauthenticated`) propagate unmodified.
    /// Persistence after a successful settlement is best-effort: a failed
    /// save is logged and the purchase still succeeds, with the settled
    /// record states returned to the caller.
    pub async fn purchase(
        &self,
        credentials: &Credentials,
        vendor_id: &str,
        quantity: u64,
    ) -> Result<PurchaseOutcome> {
        let mut account = self.accounts.lookup(credentials).await?;
        info!(buyer = %account.id, "buyer authenticated");

        let mut vendor = self.vendors.lookup(vendor_id).await?;

        let receipt = settle(&mut account, &mut vendor, quantity, self.dispatcher.as_ref())?;
        info!(
            buyer = %account.id,
            vendor = %vendor.id,
            quantity = receipt.quantity,
            cost = receipt.cost,
            "purchase settled"
        );

        if let Err(err) = self.accounts.save(&account).await {
            warn!(buyer = %account.id, %err, "failed to persist account");
        }
        if let Err(err) = self.vendors.save(&vendor).await {
            warn!(vendor = %vendor.id, %err, "failed to persist vendor");
        }

        Ok(PurchaseOutcome {
            account,
            vendor,
            receipt,
        })
    }
}
