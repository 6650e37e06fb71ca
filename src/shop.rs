//! Shop records and the read-only projections the host surfaces to players.
//!
//! Projections render plain display lines; the host owns pagination gestures,
//! chat color, and delivery.

use std::collections::HashMap;

use uuid::Uuid;

use crate::catalog::ItemKind;
use crate::items::{display_name, ItemDescriptor};
use crate::world::Location;

/// Shops shown per page of the browse listing.
pub const SHOPS_PER_PAGE: usize = 10;
/// Shops itemized in a per-owner statistics card before eliding.
const STATS_SHOP_PREVIEW: usize = 5;

/// One registered shop: a sign, the chest backing it, who owns it, and the
/// two sides of the offer. The chest's actual contents are never cached
/// here; they are read live at exchange time.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopRecord {
    pub sign_location: Location,
    pub chest_location: Location,
    pub owner: Uuid,
    pub owner_name: String,
    pub want: ItemDescriptor,
    pub give: ItemDescriptor,
}

fn block_coords(location: &Location) -> (i64, i64, i64) {
    (
        location.x.floor() as i64,
        location.y.floor() as i64,
        location.z.floor() as i64,
    )
}

fn shop_place(shop: &ShopRecord) -> String {
    let (x, y, z) = block_coords(&shop.sign_location);
    format!("{} ({}, {}, {})", shop.sign_location.world, x, y, z)
}

/// Snapshot entries in a stable display order (by world, then block coords).
fn ordered(shops: &HashMap<Location, ShopRecord>) -> Vec<&ShopRecord> {
    let mut list: Vec<&ShopRecord> = shops.values().collect();
    list.sort_by(|a, b| {
        let ka = (&a.sign_location.world, block_coords(&a.sign_location));
        let kb = (&b.sign_location.world, block_coords(&b.sign_location));
        ka.cmp(&kb)
    });
    list
}

/// The info card a player sees when inspecting a sign without trading.
/// Stock and capacity are passed in because only the host can read the live
/// chest.
pub fn format_shop_info(shop: &ShopRecord, in_stock: bool, can_accept: bool) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("=== Chest Shop ===".to_string());
    lines.push(format!("Owner: {}", shop.owner_name));
    lines.push(format!("Selling: {}", shop.give));
    lines.push(format!("Price: {}", shop.want));
    lines.push(if in_stock {
        "In Stock".to_string()
    } else {
        "Out of Stock".to_string()
    });
    lines.push(if can_accept {
        "Accepting Payment".to_string()
    } else {
        "Shop Full - Cannot Accept Payment".to_string()
    });
    lines
}

/// One page of the shop browse listing, ten shops per page.
pub fn shop_list_page(shops: &HashMap<Location, ShopRecord>, page: usize) -> Vec<String> {
    if shops.is_empty() {
        return vec!["No shops registered.".to_string()];
    }

    let list = ordered(shops);
    let total_pages = list.len().div_ceil(SHOPS_PER_PAGE);
    if page < 1 || page > total_pages {
        return vec![format!("Invalid page number. Valid pages: 1-{}", total_pages)];
    }

    let start = (page - 1) * SHOPS_PER_PAGE;
    let end = (start + SHOPS_PER_PAGE).min(list.len());

    let mut lines = Vec::new();
    lines.push(format!("=== Shop List (Page {}/{}) ===", page, total_pages));
    for (idx, shop) in list[start..end].iter().enumerate() {
        lines.push(format!(
            "{}. {}'s shop - Want: {} / Give: {} at {}",
            start + idx + 1,
            shop.owner_name,
            shop.want,
            shop.give,
            shop_place(shop)
        ));
    }
    lines
}

/// Shops paying out the given kind, in display order.
pub fn find_shops_selling(
    shops: &HashMap<Location, ShopRecord>,
    kind: ItemKind,
) -> Vec<&ShopRecord> {
    ordered(shops)
        .into_iter()
        .filter(|shop| shop.give.kind() == kind)
        .collect()
}

/// Render the result of [`find_shops_selling`] for chat.
pub fn format_found_shops(matches: &[&ShopRecord], kind: ItemKind) -> Vec<String> {
    if matches.is_empty() {
        return vec![format!("No shops found selling {}.", display_name(kind))];
    }
    let mut lines = Vec::new();
    lines.push(format!("=== Shops selling {} ===", display_name(kind)));
    for (idx, shop) in matches.iter().enumerate() {
        lines.push(format!(
            "{}. {}'s shop - Wants: {} at {}",
            idx + 1,
            shop.owner_name,
            shop.want,
            shop_place(shop)
        ));
    }
    lines
}

/// Per-owner statistics card: total count and the first few shops.
pub fn format_owner_stats(
    shops: &HashMap<Location, ShopRecord>,
    owner: Uuid,
    owner_name: &str,
) -> Vec<String> {
    let owned: Vec<&ShopRecord> = ordered(shops)
        .into_iter()
        .filter(|shop| shop.owner == owner)
        .collect();

    let mut lines = Vec::new();
    lines.push(format!("=== {}'s Shop Statistics ===", owner_name));
    lines.push(format!("Total Shops: {}", owned.len()));

    if owned.is_empty() {
        lines.push("No shops yet.".to_string());
        return lines;
    }

    for (idx, shop) in owned.iter().take(STATS_SHOP_PREVIEW).enumerate() {
        lines.push(format!(
            "{}. {} -> {} at {}",
            idx + 1,
            shop.want,
            shop.give,
            shop_place(shop)
        ));
    }
    if owned.len() > STATS_SHOP_PREVIEW {
        lines.push(format!(
            "... and {} more shops",
            owned.len() - STATS_SHOP_PREVIEW
        ));
    }
    lines
}
