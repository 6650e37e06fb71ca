//! Closed catalog of tradeable item kinds.
//!
//! Every item that can appear on a shop sign resolves to exactly one entry in
//! [`KINDS`]. Resolution is two-level: a direct match against the catalog,
//! then a fixed alias table for the shorthand names players actually write
//! ("wood", "iron", "wool"). Anything else is rejected.

/// A member of the closed item catalog.
///
/// The wrapped string is the canonical uppercase name (`OAK_LOG`,
/// `IRON_INGOT`) and always points into [`KINDS`], so two kinds compare by
/// pointer-free string equality and the type stays `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKind(&'static str);

impl ItemKind {
    /// Canonical catalog name, e.g. `OAK_LOG`.
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Canonical item kinds. Shorthand names that should resolve to one of these
/// (`STONE`, `WOOD`, `IRON`, ...) are deliberately absent so the alias table
/// decides what they mean.
pub const KINDS: &[&str] = &[
    // Building blocks
    "COBBLESTONE",
    "MOSSY_COBBLESTONE",
    "STONE_BRICKS",
    "BRICKS",
    "GRASS_BLOCK",
    "DIRT",
    "SAND",
    "GRAVEL",
    "SANDSTONE",
    "GLASS",
    "OBSIDIAN",
    "NETHERRACK",
    "SOUL_SAND",
    "END_STONE",
    "ICE",
    "SNOW_BLOCK",
    "CLAY",
    "TERRACOTTA",
    "GLOWSTONE",
    "PRISMARINE",
    "QUARTZ_BLOCK",
    "PUMPKIN",
    "MELON",
    "BOOKSHELF",
    "CRAFTING_TABLE",
    "FURNACE",
    "CHEST",
    "LADDER",
    "TORCH",
    "LANTERN",
    "RAIL",
    "TNT",
    // Wood
    "OAK_LOG",
    "SPRUCE_LOG",
    "BIRCH_LOG",
    "JUNGLE_LOG",
    "ACACIA_LOG",
    "DARK_OAK_LOG",
    "OAK_PLANKS",
    "SPRUCE_PLANKS",
    "BIRCH_PLANKS",
    "JUNGLE_PLANKS",
    "ACACIA_PLANKS",
    "DARK_OAK_PLANKS",
    "STICK",
    // Ores and refined materials
    "COAL",
    "CHARCOAL",
    "COAL_ORE",
    "IRON_ORE",
    "IRON_INGOT",
    "IRON_NUGGET",
    "GOLD_ORE",
    "GOLD_INGOT",
    "GOLD_NUGGET",
    "COPPER_INGOT",
    "DIAMOND",
    "DIAMOND_ORE",
    "EMERALD",
    "EMERALD_ORE",
    "LAPIS_LAZULI",
    "REDSTONE",
    "QUARTZ",
    "NETHERITE_INGOT",
    "AMETHYST_SHARD",
    "FLINT",
    // Food and farming
    "BREAD",
    "WHEAT",
    "WHEAT_SEEDS",
    "APPLE",
    "GOLDEN_APPLE",
    "CARROT",
    "POTATO",
    "BAKED_POTATO",
    "BEETROOT",
    "MELON_SLICE",
    "SUGAR_CANE",
    "SUGAR",
    "EGG",
    "BEEF",
    "COOKED_BEEF",
    "PORKCHOP",
    "COOKED_PORKCHOP",
    "CHICKEN",
    "COOKED_CHICKEN",
    "MUTTON",
    "COOKED_MUTTON",
    "COD",
    "COOKED_COD",
    "SALMON",
    "COOKED_SALMON",
    "CAKE",
    "COOKIE",
    "HONEY_BOTTLE",
    // Mob drops
    "LEATHER",
    "FEATHER",
    "STRING",
    "BONE",
    "BONE_MEAL",
    "GUNPOWDER",
    "SPIDER_EYE",
    "ROTTEN_FLESH",
    "ENDER_PEARL",
    "BLAZE_ROD",
    "BLAZE_POWDER",
    "SLIME_BALL",
    "GHAST_TEAR",
    "INK_SAC",
    "GLOW_INK_SAC",
    "PHANTOM_MEMBRANE",
    // Wool
    "WHITE_WOOL",
    "BLACK_WOOL",
    "GRAY_WOOL",
    "LIGHT_GRAY_WOOL",
    "BROWN_WOOL",
    "RED_WOOL",
    "ORANGE_WOOL",
    "YELLOW_WOOL",
    "LIME_WOOL",
    "GREEN_WOOL",
    "CYAN_WOOL",
    "LIGHT_BLUE_WOOL",
    "BLUE_WOOL",
    "PURPLE_WOOL",
    "MAGENTA_WOOL",
    "PINK_WOOL",
    // Tools and oddments
    "BUCKET",
    "WATER_BUCKET",
    "LAVA_BUCKET",
    "MILK_BUCKET",
    "COMPASS",
    "CLOCK",
    "MAP",
    "PAPER",
    "BOOK",
    "ARROW",
    "BOW",
    "FISHING_ROD",
    "SHEARS",
    "SADDLE",
    "NAME_TAG",
    "EXPERIENCE_BOTTLE",
];

/// Shorthand spellings and their canonical targets. Applied only after a
/// direct catalog match fails, so an alias can never shadow a real kind.
const ALIASES: &[(&str, &str)] = &[
    ("WOOD", "OAK_LOG"),
    ("LOG", "OAK_LOG"),
    ("LOGS", "OAK_LOG"),
    ("PLANK", "OAK_PLANKS"),
    ("PLANKS", "OAK_PLANKS"),
    ("STONE", "COBBLESTONE"),
    ("COBBLE", "COBBLESTONE"),
    ("GRASS", "GRASS_BLOCK"),
    ("IRON", "IRON_INGOT"),
    ("GOLD", "GOLD_INGOT"),
    ("COPPER", "COPPER_INGOT"),
    ("NETHERITE", "NETHERITE_INGOT"),
    ("LAPIS", "LAPIS_LAZULI"),
    ("PORK", "PORKCHOP"),
    ("WOOL", "WHITE_WOOL"),
    ("XP_BOTTLE", "EXPERIENCE_BOTTLE"),
];

/// Uppercase a raw name and join interior whitespace with underscores.
fn canonicalize(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

fn lookup(canonical: &str) -> Option<ItemKind> {
    KINDS.iter().copied().find(|k| *k == canonical).map(ItemKind)
}

/// Resolve a player-written item name against the catalog.
///
/// Returns `None` for anything outside the closed catalog, including the
/// empty string. Matching is case-insensitive and tolerant of spaces in
/// place of underscores (`"oak log"` == `"Oak_Log"` == `"OAK_LOG"`).
pub fn resolve(name: &str) -> Option<ItemKind> {
    let canonical = canonicalize(name);
    if canonical.is_empty() {
        return None;
    }
    if let Some(kind) = lookup(&canonical) {
        return Some(kind);
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == canonical)
        .and_then(|(_, target)| lookup(target))
}
