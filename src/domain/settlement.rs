use super::account::Account;
use super::ports::DispatchNotifier;
use super::vendor::Vendor;
use crate::error::SettlementError;

/// Summary of a successful settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub quantity: u64,
    pub cost: u64,
}

/// Settles a purchase of `quantity` units between a buyer and a vendor.
///
/// Checks run in a fixed order: cost computation (checked multiplication),
/// stock, then funds. The first failure returns immediately with no
/// mutation, so a refusal never leaves either record partially updated.
/// On the success path the dispatcher fires before any balance moves, then
/// all four fields are updated together: the buyer is debited, the vendor
/// credited, stock decremented, and the buyer's loyalty counter bumped by
/// exactly one.
///
/// The caller owns both records exclusively for the duration of the call.
/// The routine is not idempotent: settling twice with the same records
/// applies the effects twice.
pub fn settle(
    account: &mut Account,
    vendor: &mut Vendor,
    quantity: u64,
    dispatcher: &dyn DispatchNotifier,
) -> Result<Receipt, SettlementError> {
    let cost = quantity
        .checked_mul(vendor.unit_price)
        .ok_or(SettlementError::ArithmeticOverflow {
            quantity,
            unit_price: vendor.unit_price,
        })?;

    if quantity > vendor.stock {
        return Err(SettlementError::InsufficientStock {
            vendor: vendor.id.clone(),
            requested: quantity,
            available: vendor.stock,
        });
    }

    if cost > account.cash_balance {
        return Err(SettlementError::InsufficientFunds {
            cost,
            balance: account.cash_balance,
        });
    }

    dispatcher.dispatch(&account.id, &vendor.id, quantity);

    account.cash_balance -= cost;
    vendor.revenue += cost;
    vendor.stock -= quantity;
    account.loyalty_points += 1;

    Ok(Receipt { quantity, cost })
}
