//! Offer detection and extraction over raw sign lines.
//!
//! This is the single source of truth for "is this sign a shop": everything
//! else (the registry, the event port) goes through [`is_offer`] and
//! [`parse_offer`] rather than re-reading the lines itself.

use crate::errors::ShopError;
use crate::items::ItemDescriptor;

const WANT_PREFIX: &str = "want:";
const GIVE_PREFIX: &str = "give:";

/// The two sides of a shop sign: what the shop collects and what it pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offer {
    pub want: ItemDescriptor,
    pub give: ItemDescriptor,
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    // get() rather than slicing: a multibyte char straddling the prefix
    // length must read as "no match", not a panic.
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Whether sign lines carry the offer layout: line 1 opens with `Want:` and
/// line 2 with `Give:`, case-insensitively. Line 0 and anything past line 2
/// are not inspected here.
pub fn is_offer<S: AsRef<str>>(lines: &[S]) -> bool {
    if lines.len() < 3 {
        return false;
    }
    starts_with_ignore_case(lines[1].as_ref(), WANT_PREFIX)
        && starts_with_ignore_case(lines[2].as_ref(), GIVE_PREFIX)
}

/// Extract the offer from sign lines, parsing both item descriptors.
pub fn parse_offer<S: AsRef<str>>(lines: &[S]) -> Result<Offer, ShopError> {
    if !is_offer(lines) {
        return Err(ShopError::InvalidOfferFormat);
    }
    let want_text = lines[1].as_ref()[WANT_PREFIX.len()..].trim();
    let give_text = lines[2].as_ref()[GIVE_PREFIX.len()..].trim();
    Ok(Offer {
        want: ItemDescriptor::parse(want_text)?,
        give: ItemDescriptor::parse(give_text)?,
    })
}
