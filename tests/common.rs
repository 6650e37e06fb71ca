//! Test utilities & fixtures shared across the integration tests.

use std::collections::HashSet;

use chestshop::catalog;
use chestshop::config::Config;
use chestshop::events::ShopService;
use chestshop::items::ItemDescriptor;
use chestshop::registry::ShopRegistry;
use chestshop::store::ShopStore;
use chestshop::world::{Location, WorldView};

/// An in-memory world: a set of loaded world names and a set of chest block
/// positions. The chest search mirrors the host rule (directly below the
/// sign, then two below).
#[allow(dead_code)]
pub struct FakeWorld {
    worlds: HashSet<String>,
    chests: HashSet<Location>,
}

#[allow(dead_code)]
impl FakeWorld {
    pub fn new() -> Self {
        let mut worlds = HashSet::new();
        worlds.insert("overworld".to_string());
        Self {
            worlds,
            chests: HashSet::new(),
        }
    }

    #[allow(dead_code)]
    pub fn add_world(&mut self, name: &str) {
        self.worlds.insert(name.to_string());
    }

    pub fn place_chest(&mut self, location: Location) {
        self.chests.insert(location);
    }
}

impl WorldView for FakeWorld {
    fn world_exists(&self, world: &str) -> bool {
        self.worlds.contains(world)
    }

    fn find_chest_below(&self, sign: &Location) -> Option<Location> {
        for depth in [1.0, 2.0] {
            let candidate = sign.below(depth);
            if self.chests.contains(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

#[allow(dead_code)]
pub fn desc(name: &str, amount: u32) -> ItemDescriptor {
    ItemDescriptor::new(catalog::resolve(name).unwrap(), amount).unwrap()
}

#[allow(dead_code)]
pub fn offer_lines(first: &str, want: &str, give: &str) -> Vec<String> {
    vec![
        first.to_string(),
        format!("Want: {}", want),
        format!("Give: {}", give),
    ]
}

#[allow(dead_code)]
pub fn sign_at(x: f64) -> Location {
    Location::new("overworld", x, 65.0, 0.0)
}

/// A service over a fresh registry in `data_dir`, with a chest already under
/// the signs produced by [`sign_at`] for x in 0..10.
#[allow(dead_code)]
pub async fn service_with_chests(data_dir: &std::path::Path) -> ShopService<FakeWorld> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut world = FakeWorld::new();
    for x in 0..10 {
        world.place_chest(sign_at(x as f64).below(1.0));
    }
    let store = ShopStore::open(data_dir).await.expect("open store");
    ShopService::new(ShopRegistry::new(store), world, &Config::default())
}
