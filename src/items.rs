//! Item descriptor codec: the `"Oak Log 32"` text form players write on
//! signs, and the validated kind/amount pair the rest of the crate trades in.

use std::fmt;

use crate::catalog::{self, ItemKind};
use crate::errors::ShopError;

/// Smallest amount a descriptor can carry.
pub const MIN_AMOUNT: u32 = 1;
/// Largest amount a descriptor can carry, one full stack.
pub const MAX_AMOUNT: u32 = 64;

/// A validated quantity of a single catalog kind.
///
/// The amount is always in `1..=64`; constructors reject anything else, so a
/// descriptor in hand is proof the bounds hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemDescriptor {
    kind: ItemKind,
    amount: u32,
}

impl ItemDescriptor {
    pub fn new(kind: ItemKind, amount: u32) -> Result<Self, ShopError> {
        if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
            return Err(ShopError::AmountOutOfRange(amount.to_string()));
        }
        Ok(Self { kind, amount })
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// Two descriptors are similar when their kinds match; amounts are
    /// ignored.
    pub fn is_similar(&self, other: &ItemDescriptor) -> bool {
        self.kind == other.kind
    }

    /// Parse sign text like `"Diamond 1"` or `"Oak Log 32"`.
    ///
    /// The final whitespace-separated token is the amount; everything before
    /// it is the item name, resolved through the catalog. Multi-word names
    /// are accepted so that any formatted descriptor parses back to itself.
    pub fn parse(text: &str) -> Result<Self, ShopError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(ShopError::InvalidItemText(text.trim().to_string()));
        }

        let (amount_token, name_tokens) = match tokens.split_last() {
            Some(split) => split,
            None => return Err(ShopError::InvalidItemText(text.trim().to_string())),
        };
        let amount: u32 = amount_token
            .parse()
            .map_err(|_| ShopError::AmountOutOfRange(amount_token.to_string()))?;
        if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
            return Err(ShopError::AmountOutOfRange(amount_token.to_string()));
        }

        let name = name_tokens.join(" ");
        let kind =
            catalog::resolve(&name).ok_or_else(|| ShopError::UnknownItem(name.clone()))?;

        Ok(Self { kind, amount })
    }
}

/// Display form shown on signs and in chat: `OAK_LOG`/32 renders as
/// `"Oak Log 32"`. Lossless back through [`ItemDescriptor::parse`] for any
/// catalog kind; alias spellings do not survive the trip.
impl fmt::Display for ItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", display_name(self.kind), self.amount)
    }
}

/// Human-readable name for a kind: underscores to spaces, each word
/// capitalized (`WHITE_WOOL` -> `White Wool`).
pub fn display_name(kind: ItemKind) -> String {
    kind.name()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
