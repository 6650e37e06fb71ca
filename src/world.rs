//! World-facing value types and the collaborator seam to the host engine.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::catalog::ItemKind;

/// A point in a named world, with the facing angles block entities carry.
///
/// Equality and hashing go over the raw float bit patterns so a `Location`
/// can key a `HashMap` directly; positions are only ever compared against
/// values read back from the same world, never computed, so bitwise equality
/// is the right notion.
#[derive(Debug, Clone)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// The location `blocks` cells straight down. Hosts use this when
    /// searching for the chest under a sign.
    pub fn below(&self, blocks: f64) -> Self {
        let mut down = self.clone();
        down.y -= blocks;
        down
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.world == other.world
            && self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
            && self.yaw.to_bits() == other.yaw.to_bits()
            && self.pitch.to_bits() == other.pitch.to_bits()
    }
}

impl Eq for Location {}

impl std::hash::Hash for Location {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.world.hash(state);
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
        self.z.to_bits().hash(state);
        self.yaw.to_bits().hash(state);
        self.pitch.to_bits().hash(state);
    }
}

/// Canonical string form used as the shop document key:
/// `world,x,y,z,yaw,pitch`.
impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{}",
            self.world, self.x, self.y, self.z, self.yaw, self.pitch
        )
    }
}

#[derive(Debug, Error)]
#[error("malformed location string: {0}")]
pub struct LocationParseError(pub String);

impl std::str::FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 6 {
            return Err(LocationParseError(s.to_string()));
        }
        let bad = || LocationParseError(s.to_string());
        Ok(Location {
            world: parts[0].to_string(),
            x: parts[1].parse().map_err(|_| bad())?,
            y: parts[2].parse().map_err(|_| bad())?,
            z: parts[3].parse().map_err(|_| bad())?,
            yaw: parts[4].parse().map_err(|_| bad())?,
            pitch: parts[5].parse().map_err(|_| bad())?,
        })
    }
}

/// The host world as the shop system sees it.
///
/// The host owns the real block state; this trait is the whole surface the
/// crate reads through. `find_chest_below` follows the fixed search rule:
/// the block directly below the sign, then two below, nothing further.
pub trait WorldView {
    /// Whether a world with this name is currently loaded.
    fn world_exists(&self, world: &str) -> bool;

    /// Locate the chest backing a sign, if one exists.
    fn find_chest_below(&self, sign: &Location) -> Option<Location>;
}

/// Items that did not fit a player inventory and ended up on the ground.
/// The host turns these into world item entities; they are never silently
/// discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedStack {
    pub kind: ItemKind,
    pub amount: u32,
    pub location: Location,
    pub dropped_at: DateTime<Utc>,
}
