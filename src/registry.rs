//! The in-memory shop registry, keyed by sign location.
//!
//! One registry owns all shop records for a running world-set. Every
//! mutation is followed by a save of the full document; persistence failures
//! are logged and never propagate to the caller (the in-memory state remains
//! authoritative, the on-disk document stays at its last good version).

use std::collections::HashMap;

use log::error;
use uuid::Uuid;

use crate::offer;
use crate::shop::ShopRecord;
use crate::store::ShopStore;
use crate::world::Location;

pub struct ShopRegistry {
    shops: HashMap<Location, ShopRecord>,
    store: ShopStore,
}

impl ShopRegistry {
    /// A registry starting empty; call [`ShopRegistry::load`] to pick up the
    /// persisted document.
    pub fn new(store: ShopStore) -> Self {
        Self {
            shops: HashMap::new(),
            store,
        }
    }

    /// Replace the in-memory mapping with the persisted document. An
    /// unreadable document logs and leaves the registry empty rather than
    /// failing startup.
    pub async fn load(&mut self, world_exists: impl Fn(&str) -> bool) {
        match self.store.load(world_exists).await {
            Ok(shops) => self.shops = shops,
            Err(e) => {
                error!("Failed to load shop document: {e}");
                self.shops.clear();
            }
        }
    }

    /// Persist the current mapping. Failures are logged; the previous
    /// document remains the last-known-good copy.
    pub async fn save(&self) {
        if let Err(e) = self.store.save(&self.shops).await {
            error!("Failed to save shop document: {e}");
        }
    }

    /// Register a shop from authored sign lines.
    ///
    /// Validation failures all answer `None`, never an error: a missing
    /// chest, sign lines that do not parse as an offer (re-checked here even
    /// though the event port validates first), or a sign location that
    /// already carries a shop. An existing record is never overwritten;
    /// remove it first.
    pub async fn create<S: AsRef<str>>(
        &mut self,
        sign_location: Location,
        chest_location: Option<Location>,
        owner: Uuid,
        owner_name: &str,
        lines: &[S],
    ) -> Option<ShopRecord> {
        let chest_location = chest_location?;
        if self.shops.contains_key(&sign_location) {
            return None;
        }
        let offer = offer::parse_offer(lines).ok()?;

        let record = ShopRecord {
            sign_location: sign_location.clone(),
            chest_location,
            owner,
            owner_name: owner_name.to_string(),
            want: offer.want,
            give: offer.give,
        };
        self.shops.insert(sign_location, record.clone());
        self.save().await;
        Some(record)
    }

    pub fn get(&self, sign_location: &Location) -> Option<&ShopRecord> {
        self.shops.get(sign_location)
    }

    /// Remove the shop at a sign location; true if one was there. Saves on
    /// success.
    pub async fn remove(&mut self, sign_location: &Location) -> bool {
        let removed = self.shops.remove(sign_location).is_some();
        if removed {
            self.save().await;
        }
        removed
    }

    /// How many shops this owner has registered. Linear scan; the per-owner
    /// cap lives in configuration, not here.
    pub fn count_by_owner(&self, owner: Uuid) -> usize {
        self.shops.values().filter(|shop| shop.owner == owner).count()
    }

    /// Snapshot copy of the whole mapping. Callers may do anything with it;
    /// the live registry is unaffected.
    pub fn list_all(&self) -> HashMap<Location, ShopRecord> {
        self.shops.clone()
    }

    pub fn len(&self) -> usize {
        self.shops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}
