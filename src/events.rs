//! The inbound port the host world engine calls into.
//!
//! The host detects sign authoring, sign breaking, and sign interaction, runs
//! its permission gate, then invokes these handlers synchronously. Outcomes
//! come back as plain values carrying stable message keys; the host renders
//! them through its messaging layer (see `Config::message`).
//!
//! A typical interact flow on the host side:
//!
//! ```text
//! let Some(shop) = service.shop_at(&sign) else { return };
//! let chest = open_inventory_at(&shop.chest_location);
//! match service.on_sign_interacted(&sign, player_id, &mut player_inv, &mut chest) { .. }
//! ```

use std::collections::HashMap;

use log::info;
use uuid::Uuid;

use crate::config::Config;
use crate::engine::{self, ExchangeError, ExchangeReceipt};
use crate::inventory::Inventory;
use crate::offer;
use crate::registry::ShopRegistry;
use crate::shop::ShopRecord;
use crate::world::{Location, WorldView};

/// Outcome of authoring a sign.
#[derive(Debug, Clone, PartialEq)]
pub enum SignAuthored {
    /// The sign is not an offer sign at all; the host proceeds as with any
    /// ordinary sign.
    NotAShop,
    /// The sign reads as an offer but no shop was registered.
    Rejected(CreateDenied),
    /// A shop now exists for this sign.
    Created(ShopRecord),
}

/// Why an offer sign was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateDenied {
    /// First sign line must be empty or the author's own name.
    NameMismatch,
    /// The author is at the configured shop cap.
    TooManyShops,
    /// The want/give lines do not parse.
    InvalidFormat,
    /// No chest directly below or two below the sign.
    NoChest,
    /// Another shop already occupies this sign location.
    AlreadyShop,
}

impl CreateDenied {
    pub fn message_key(&self) -> &'static str {
        match self {
            CreateDenied::NameMismatch => "sign-name-mismatch",
            CreateDenied::TooManyShops => "max-shops-reached",
            CreateDenied::InvalidFormat => "invalid-format",
            CreateDenied::NoChest => "no-chest-found",
            CreateDenied::AlreadyShop => "sign-already-shop",
        }
    }
}

/// Outcome of breaking a sign.
#[derive(Debug, Clone, PartialEq)]
pub enum SignBroken {
    /// No shop here; the break proceeds as normal.
    NotAShop,
    /// A shop is here and the actor may not remove it. The host should
    /// cancel the block break ("not-shop-owner").
    Denied,
    /// The shop was removed along with the sign ("shop-removed").
    Removed(ShopRecord),
}

/// Outcome of interacting with a sign.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// No shop registered on this sign.
    NoShop,
    /// The exchange refused; nothing moved.
    Failed(ExchangeError),
    /// The exchange completed. The receipt names the owner to notify
    /// ("shop-sale") alongside the buyer's "transaction-success".
    Completed(ExchangeReceipt),
}

/// Owns the registry and the world collaborator; one per running world-set.
pub struct ShopService<W: WorldView> {
    registry: ShopRegistry,
    world: W,
    max_shops_per_owner: u32,
}

impl<W: WorldView> ShopService<W> {
    pub fn new(registry: ShopRegistry, world: W, config: &Config) -> Self {
        Self {
            registry,
            world,
            max_shops_per_owner: config.shops.max_shops_per_owner,
        }
    }

    /// Pull the persisted shops in, replacing in-memory state. Call once at
    /// startup.
    pub async fn load(&mut self) {
        let world = &self.world;
        self.registry.load(|name| world.world_exists(name)).await;
    }

    /// Persist current state. Mutating handlers already save; this is for a
    /// final save at shutdown.
    pub async fn save(&self) {
        self.registry.save().await;
    }

    /// A sign was authored. Registers a shop when the lines carry a valid
    /// offer and every creation rule passes.
    pub async fn on_sign_authored<S: AsRef<str>>(
        &mut self,
        sign_location: Location,
        author: Uuid,
        author_name: &str,
        lines: &[S],
    ) -> SignAuthored {
        if !offer::is_offer(lines) {
            return SignAuthored::NotAShop;
        }

        // The original sign-shop convention: line 0 carries the owner name.
        let first_line = lines[0].as_ref().trim();
        if !first_line.is_empty() && !first_line.eq_ignore_ascii_case(author_name) {
            return SignAuthored::Rejected(CreateDenied::NameMismatch);
        }

        if self.max_shops_per_owner > 0
            && self.registry.count_by_owner(author) >= self.max_shops_per_owner as usize
        {
            return SignAuthored::Rejected(CreateDenied::TooManyShops);
        }

        if offer::parse_offer(lines).is_err() {
            return SignAuthored::Rejected(CreateDenied::InvalidFormat);
        }

        let chest_location = match self.world.find_chest_below(&sign_location) {
            Some(location) => location,
            None => return SignAuthored::Rejected(CreateDenied::NoChest),
        };

        if self.registry.get(&sign_location).is_some() {
            return SignAuthored::Rejected(CreateDenied::AlreadyShop);
        }

        match self
            .registry
            .create(sign_location, Some(chest_location), author, author_name, lines)
            .await
        {
            Some(record) => {
                info!(
                    "{} opened a shop at {}: {} for {}",
                    author_name, record.sign_location, record.give, record.want
                );
                SignAuthored::Created(record)
            }
            None => SignAuthored::Rejected(CreateDenied::InvalidFormat),
        }
    }

    /// A sign was broken. Only the owner, or an actor the host has cleared
    /// for override, takes the shop down with it.
    pub async fn on_sign_broken(
        &mut self,
        sign_location: &Location,
        actor: Uuid,
        can_override: bool,
    ) -> SignBroken {
        let record = match self.registry.get(sign_location) {
            Some(record) => record.clone(),
            None => return SignBroken::NotAShop,
        };

        if record.owner != actor && !can_override {
            return SignBroken::Denied;
        }

        self.registry.remove(sign_location).await;
        info!("Shop at {} removed by {}", sign_location, actor);
        SignBroken::Removed(record)
    }

    /// A sign was interacted with. Runs one exchange against the live
    /// inventories the host resolved for the buyer and the shop chest.
    pub fn on_sign_interacted(
        &mut self,
        sign_location: &Location,
        buyer: Uuid,
        buyer_inv: &mut dyn Inventory,
        chest_inv: &mut dyn Inventory,
    ) -> Interaction {
        let record = match self.registry.get(sign_location) {
            Some(record) => record,
            None => return Interaction::NoShop,
        };

        match engine::execute(record, buyer, buyer_inv, chest_inv) {
            Ok(receipt) => Interaction::Completed(receipt),
            Err(error) => Interaction::Failed(error),
        }
    }

    pub fn shop_at(&self, sign_location: &Location) -> Option<&ShopRecord> {
        self.registry.get(sign_location)
    }

    /// Snapshot of all shops for the read projections in [`crate::shop`].
    pub fn shops(&self) -> HashMap<Location, ShopRecord> {
        self.registry.list_all()
    }

    pub fn shop_count(&self) -> usize {
        self.registry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ShopStore;
    use tempfile::tempdir;

    /// A world with every name loaded and a chest under every sign.
    struct OpenWorld;

    impl WorldView for OpenWorld {
        fn world_exists(&self, _world: &str) -> bool {
            true
        }

        fn find_chest_below(&self, sign: &Location) -> Option<Location> {
            Some(sign.below(1.0))
        }
    }

    /// A world with no chests anywhere.
    struct ChestlessWorld;

    impl WorldView for ChestlessWorld {
        fn world_exists(&self, _world: &str) -> bool {
            true
        }

        fn find_chest_below(&self, _sign: &Location) -> Option<Location> {
            None
        }
    }

    fn lines(first: &str) -> Vec<String> {
        vec![
            first.to_string(),
            "Want: Bread 64".to_string(),
            "Give: Diamond 1".to_string(),
        ]
    }

    async fn service<W: WorldView>(dir: &std::path::Path, world: W) -> ShopService<W> {
        let store = ShopStore::open(dir).await.unwrap();
        ShopService::new(ShopRegistry::new(store), world, &Config::default())
    }

    fn sign_at(x: f64) -> Location {
        Location::new("overworld", x, 65.0, 0.0)
    }

    #[tokio::test]
    async fn plain_signs_pass_through() {
        let tmp = tempdir().unwrap();
        let mut service = service(tmp.path(), OpenWorld).await;
        let plain = vec!["hello".to_string(), "world".to_string(), "!".to_string()];
        let outcome = service
            .on_sign_authored(sign_at(0.0), Uuid::new_v4(), "Alice", &plain)
            .await;
        assert_eq!(outcome, SignAuthored::NotAShop);
        assert_eq!(service.shop_count(), 0);
    }

    #[tokio::test]
    async fn offer_sign_with_chest_creates_a_shop() {
        let tmp = tempdir().unwrap();
        let mut service = service(tmp.path(), OpenWorld).await;
        let alice = Uuid::new_v4();

        let outcome = service
            .on_sign_authored(sign_at(0.0), alice, "Alice", &lines("Alice"))
            .await;
        let record = match outcome {
            SignAuthored::Created(record) => record,
            other => panic!("expected Created, got {:?}", other),
        };
        assert_eq!(record.owner, alice);
        assert_eq!(record.chest_location, sign_at(0.0).below(1.0));
        assert_eq!(service.shop_count(), 1);
    }

    #[tokio::test]
    async fn first_line_must_match_author() {
        let tmp = tempdir().unwrap();
        let mut service = service(tmp.path(), OpenWorld).await;

        let outcome = service
            .on_sign_authored(sign_at(0.0), Uuid::new_v4(), "Alice", &lines("Bob"))
            .await;
        assert_eq!(outcome, SignAuthored::Rejected(CreateDenied::NameMismatch));

        // Empty and case-different spellings of the author both pass.
        let outcome = service
            .on_sign_authored(sign_at(1.0), Uuid::new_v4(), "Alice", &lines("alice"))
            .await;
        assert!(matches!(outcome, SignAuthored::Created(_)));
    }

    #[tokio::test]
    async fn missing_chest_rejects() {
        let tmp = tempdir().unwrap();
        let mut service = service(tmp.path(), ChestlessWorld).await;
        let outcome = service
            .on_sign_authored(sign_at(0.0), Uuid::new_v4(), "Alice", &lines(""))
            .await;
        assert_eq!(outcome, SignAuthored::Rejected(CreateDenied::NoChest));
    }

    #[tokio::test]
    async fn shop_cap_is_enforced() {
        let tmp = tempdir().unwrap();
        let store = ShopStore::open(tmp.path()).await.unwrap();
        let mut config = Config::default();
        config.shops.max_shops_per_owner = 2;
        let mut service = ShopService::new(ShopRegistry::new(store), OpenWorld, &config);
        let alice = Uuid::new_v4();

        for x in 0..2 {
            let outcome = service
                .on_sign_authored(sign_at(x as f64), alice, "Alice", &lines(""))
                .await;
            assert!(matches!(outcome, SignAuthored::Created(_)));
        }
        let outcome = service
            .on_sign_authored(sign_at(9.0), alice, "Alice", &lines(""))
            .await;
        assert_eq!(outcome, SignAuthored::Rejected(CreateDenied::TooManyShops));

        // A different owner is unaffected.
        let outcome = service
            .on_sign_authored(sign_at(9.0), Uuid::new_v4(), "Bob", &lines(""))
            .await;
        assert!(matches!(outcome, SignAuthored::Created(_)));
    }

    #[tokio::test]
    async fn bad_offers_reject_with_format_key() {
        let tmp = tempdir().unwrap();
        let mut service = service(tmp.path(), OpenWorld).await;
        let bad = vec![
            "".to_string(),
            "Want: Bread 999".to_string(),
            "Give: Diamond 1".to_string(),
        ];
        let outcome = service
            .on_sign_authored(sign_at(0.0), Uuid::new_v4(), "Alice", &bad)
            .await;
        assert_eq!(outcome, SignAuthored::Rejected(CreateDenied::InvalidFormat));
        assert_eq!(CreateDenied::InvalidFormat.message_key(), "invalid-format");
    }

    #[tokio::test]
    async fn only_owner_or_override_breaks_a_shop() {
        let tmp = tempdir().unwrap();
        let mut service = service(tmp.path(), OpenWorld).await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        service
            .on_sign_authored(sign_at(0.0), alice, "Alice", &lines(""))
            .await;

        assert_eq!(
            service.on_sign_broken(&sign_at(0.0), bob, false).await,
            SignBroken::Denied
        );
        assert_eq!(service.shop_count(), 1);

        // Admin override works for non-owners.
        let removed = service.on_sign_broken(&sign_at(0.0), bob, true).await;
        assert!(matches!(removed, SignBroken::Removed(_)));
        assert_eq!(service.shop_count(), 0);

        assert_eq!(
            service.on_sign_broken(&sign_at(0.0), alice, false).await,
            SignBroken::NotAShop
        );
    }
}
