//! The exchange engine: four checks, four transfers, no stored state.
//!
//! Every invocation reads the live inventories fresh. The whole flow is one
//! synchronous call with no await points, so the world cannot change between
//! the checks and the transfers.

use log::debug;
use uuid::Uuid;

use crate::inventory::Inventory;
use crate::items::ItemDescriptor;
use crate::shop::ShopRecord;

/// Terminal reasons an exchange refuses before anything moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeError {
    /// Buyers cannot trade with their own shop.
    SelfTradeDenied,
    /// Buyer does not hold the asked payment.
    InsufficientPayment,
    /// Chest does not hold the promised goods.
    OutOfStock,
    /// Chest has no room left for the payment.
    ShopFull,
}

impl ExchangeError {
    /// Stable key into the host's message table.
    pub fn message_key(&self) -> &'static str {
        match self {
            ExchangeError::SelfTradeDenied => "cannot-buy-own-shop",
            ExchangeError::InsufficientPayment => "insufficient-items",
            ExchangeError::OutOfStock => "insufficient-stock",
            ExchangeError::ShopFull => "shop-full",
        }
    }
}

impl std::fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ExchangeError::SelfTradeDenied => "cannot trade with your own shop",
            ExchangeError::InsufficientPayment => "buyer lacks the payment items",
            ExchangeError::OutOfStock => "shop is out of stock",
            ExchangeError::ShopFull => "shop chest is full",
        };
        f.write_str(text)
    }
}

impl std::error::Error for ExchangeError {}

/// Proof of a completed exchange, for the host's messaging layer: what the
/// buyer paid and received, and which owner to notify of the sale.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeReceipt {
    pub owner: Uuid,
    pub owner_name: String,
    pub paid: ItemDescriptor,
    pub received: ItemDescriptor,
}

impl ExchangeReceipt {
    pub fn message_key(&self) -> &'static str {
        "transaction-success"
    }
}

/// Run one exchange between a buyer and a shop.
///
/// Checks run in a fixed order against current state; the first failure is
/// terminal and nothing has moved. Once all four pass, the transfers cannot
/// fail: the removes are covered by the two holdings checks, the chest add
/// by the capacity check, and a buyer-side add overflows to the ground
/// rather than failing. There is therefore no rollback path.
pub fn execute(
    shop: &ShopRecord,
    buyer: Uuid,
    buyer_inv: &mut dyn Inventory,
    chest_inv: &mut dyn Inventory,
) -> Result<ExchangeReceipt, ExchangeError> {
    if buyer == shop.owner {
        return Err(ExchangeError::SelfTradeDenied);
    }
    if !buyer_inv.contains_at_least(&shop.want) {
        return Err(ExchangeError::InsufficientPayment);
    }
    if !chest_inv.contains_at_least(&shop.give) {
        return Err(ExchangeError::OutOfStock);
    }
    if !chest_inv.free_capacity_for(&shop.want) {
        return Err(ExchangeError::ShopFull);
    }

    buyer_inv.remove(&shop.want);
    chest_inv.add(&shop.want);
    chest_inv.remove(&shop.give);
    buyer_inv.add(&shop.give);

    debug!(
        "exchange at {}: {} paid, {} received",
        shop.sign_location, shop.want, shop.give
    );

    Ok(ExchangeReceipt {
        owner: shop.owner,
        owner_name: shop.owner_name.clone(),
        paid: shop.want,
        received: shop.give,
    })
}
