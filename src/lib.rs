//! # Chestshop - Sign-Driven Barter Shops for Shared Block Worlds
//!
//! Chestshop is the trading core for a shared, mutable block world: a player
//! declares a shop by writing an offer on a sign above a chest, and other
//! players trade with it by interacting with the sign. The crate owns offer
//! parsing, the shop registry, the exchange engine, and persistence; the
//! host world engine keeps block state, permissions, and chat delivery.
//!
//! ## Features
//!
//! - **Offer signs**: `Want: <item> <amount>` / `Give: <item> <amount>` lines
//!   parsed against a closed item catalog with player-friendly aliases.
//! - **Atomic exchanges**: four preconditions checked against live
//!   inventories, then four transfers that cannot fail once the checks pass.
//! - **Location-keyed registry**: one record per sign, save-on-write JSON
//!   persistence with locked atomic file replacement.
//! - **Host-agnostic inventories**: the engine sees chests and players only
//!   through the [`inventory::Inventory`] trait, so it runs unmodified
//!   against any world representation (or an in-memory fake in tests).
//! - **Event port**: plain `on_sign_*` handlers the host calls synchronously;
//!   outcomes carry stable message keys for the host's chat layer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chestshop::config::Config;
//! use chestshop::events::ShopService;
//! use chestshop::registry::ShopRegistry;
//! use chestshop::store::ShopStore;
//! use chestshop::world::{Location, WorldView};
//!
//! struct HostWorld;
//!
//! impl WorldView for HostWorld {
//!     fn world_exists(&self, _world: &str) -> bool {
//!         true
//!     }
//!     fn find_chest_below(&self, sign: &Location) -> Option<Location> {
//!         Some(sign.below(1.0))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let store = ShopStore::open(&config.storage.data_dir).await?;
//!     let mut service = ShopService::new(ShopRegistry::new(store), HostWorld, &config);
//!     service.load().await;
//!
//!     // Wire service.on_sign_authored / on_sign_broken / on_sign_interacted
//!     // into the host's event loop, and service.save() into shutdown.
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`catalog`] - Closed item-kind catalog and alias resolution
//! - [`items`] - Item descriptor codec (`"Oak Log 32"` ↔ kind + amount)
//! - [`offer`] - Offer detection and extraction over sign lines
//! - [`inventory`] - Slot inventories and the exchange capability contract
//! - [`shop`] - Shop records and read projections (listing, find, stats)
//! - [`registry`] - The location-keyed shop registry
//! - [`engine`] - The exchange engine
//! - [`store`] - JSON persistence of the registry
//! - [`events`] - The inbound port the host invokes
//! - [`config`] - TOML configuration and the message table
//! - [`world`] - Location values and the host world seam
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   Host Engine    │ ← events, permissions, chat
//! └──────────────────┘
//!          │ on_sign_authored / broken / interacted
//! ┌──────────────────┐
//! │   ShopService    │ ← registry + world seam
//! └──────────────────┘
//!          │
//! ┌──────────────────┐      ┌──────────────────┐
//! │ Exchange Engine  │ ──→  │ Inventory trait  │ ← live chest / player views
//! └──────────────────┘      └──────────────────┘
//!          │
//! ┌──────────────────┐
//! │    ShopStore     │ ← shops.json, atomic writes
//! └──────────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod errors;
pub mod events;
pub mod inventory;
pub mod items;
pub mod offer;
pub mod registry;
pub mod shop;
pub mod store;
pub mod world;

pub use catalog::ItemKind;
pub use engine::{ExchangeError, ExchangeReceipt};
pub use errors::ShopError;
pub use events::{CreateDenied, Interaction, ShopService, SignAuthored, SignBroken};
pub use inventory::{ChestInventory, Inventory, PlayerInventory, MAX_STACK_SIZE};
pub use items::ItemDescriptor;
pub use offer::{is_offer, parse_offer, Offer};
pub use registry::ShopRegistry;
pub use shop::ShopRecord;
pub use store::ShopStore;
pub use world::{DroppedStack, Location, WorldView};
