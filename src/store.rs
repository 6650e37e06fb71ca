//! Shop document persistence.
//!
//! The whole registry lives in one JSON document, `shops.json`, keyed by the
//! canonical sign-location string. The document is rewritten in full on every
//! save; writes go through an exclusive lock and a temp-file rename so a
//! failed save leaves the previous document intact. Records that no longer
//! deserialize cleanly are skipped on load with a warning, never fatal.
//!
//! Item metadata (custom names, enchantments) is not part of the document;
//! only the catalog kind and amount survive a restart.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::fs;
use uuid::Uuid;

use crate::catalog;
use crate::errors::ShopError;
use crate::items::ItemDescriptor;
use crate::shop::ShopRecord;
use crate::world::Location;

/// File name of the shop document inside the data directory.
pub const SHOPS_FILE: &str = "shops.json";

/// Handle on the on-disk shop document.
pub struct ShopStore {
    path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShopRecordDto {
    sign_location: String,
    chest_location: String,
    owner: String,
    owner_name: String,
    want_item: ItemDto,
    give_item: ItemDto,
}

#[derive(Debug, Serialize, Deserialize)]
struct ItemDto {
    #[serde(rename = "type")]
    kind: String,
    amount: u32,
}

impl ItemDto {
    fn of(descriptor: &ItemDescriptor) -> Self {
        Self {
            kind: descriptor.kind().name().to_string(),
            amount: descriptor.amount(),
        }
    }

    fn decode(&self) -> Option<ItemDescriptor> {
        let kind = catalog::resolve(&self.kind)?;
        ItemDescriptor::new(kind, self.amount).ok()
    }
}

impl ShopRecordDto {
    fn of(record: &ShopRecord) -> Self {
        Self {
            sign_location: record.sign_location.to_string(),
            chest_location: record.chest_location.to_string(),
            owner: record.owner.to_string(),
            owner_name: record.owner_name.clone(),
            want_item: ItemDto::of(&record.want),
            give_item: ItemDto::of(&record.give),
        }
    }

    /// Rebuild the record, or explain why it cannot come back.
    fn decode(&self, world_exists: &impl Fn(&str) -> bool) -> Result<ShopRecord, String> {
        let sign_location: Location = self
            .sign_location
            .parse()
            .map_err(|_| format!("bad sign location '{}'", self.sign_location))?;
        let chest_location: Location = self
            .chest_location
            .parse()
            .map_err(|_| format!("bad chest location '{}'", self.chest_location))?;

        if !world_exists(&sign_location.world) {
            return Err(format!("unknown world '{}'", sign_location.world));
        }
        if !world_exists(&chest_location.world) {
            return Err(format!("unknown world '{}'", chest_location.world));
        }

        let owner =
            Uuid::parse_str(&self.owner).map_err(|_| format!("bad owner id '{}'", self.owner))?;
        let want = self
            .want_item
            .decode()
            .ok_or_else(|| format!("bad want item '{}'", self.want_item.kind))?;
        let give = self
            .give_item
            .decode()
            .ok_or_else(|| format!("bad give item '{}'", self.give_item.kind))?;

        Ok(ShopRecord {
            sign_location,
            chest_location,
            owner,
            owner_name: self.owner_name.clone(),
            want,
            give,
        })
    }
}

impl ShopStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, ShopError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir).await?;
        Ok(Self {
            path: data_dir.join(SHOPS_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full document. All-or-nothing: on any failure the previous
    /// document is untouched.
    pub async fn save(&self, shops: &HashMap<Location, ShopRecord>) -> Result<(), ShopError> {
        let document: HashMap<String, ShopRecordDto> = shops
            .iter()
            .map(|(sign, record)| (sign.to_string(), ShopRecordDto::of(record)))
            .collect();

        let content = serde_json::to_string_pretty(&document)?;
        write_file_locked(&self.path, &content)?;

        info!("Saved {} shops to {}", shops.len(), self.path.display());
        Ok(())
    }

    /// Read the full document back. A missing file is an empty registry.
    /// Each record that fails to decode is skipped with a warning;
    /// `world_exists` decides which worlds are still loadable.
    pub async fn load(
        &self,
        world_exists: impl Fn(&str) -> bool,
    ) -> Result<HashMap<Location, ShopRecord>, ShopError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No existing shop document, starting fresh");
                return Ok(HashMap::new());
            }
            Err(e) => return Err(e.into()),
        };

        let document: HashMap<String, ShopRecordDto> = serde_json::from_str(&content)?;

        let mut shops = HashMap::new();
        for (key, dto) in &document {
            match dto.decode(&world_exists) {
                Ok(record) => {
                    shops.insert(record.sign_location.clone(), record);
                }
                Err(reason) => {
                    warn!("Skipping shop record at {}: {}", key, reason);
                }
            }
        }

        info!("Loaded {} shops from {}", shops.len(), self.path.display());
        Ok(shops)
    }
}

/// Write content to a file under an exclusive lock, through a unique temp
/// file in the same directory and an atomic rename.
fn write_file_locked(path: &Path, content: &str) -> Result<(), ShopError> {
    use std::fs::{self, File, OpenOptions};
    use std::io::Write;

    // Open (or create) the destination to hold the lock for the duration.
    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(path)?;
    lock_file.lock_exclusive()?;

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(SHOPS_FILE);
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut tmp) => {
                tmp.write_all(content.as_bytes())?;
                tmp.flush()?;
                let _ = tmp.sync_all();
                break candidate;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    };

    fs::rename(&tmp_path, path)?;

    // Fsync the directory to persist the rename (best-effort).
    if let Ok(dir_file) = File::open(dir) {
        let _ = dir_file.sync_all();
    }

    drop(lock_file);
    Ok(())
}
