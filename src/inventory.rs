//! Bounded slot inventories and the capability contract the exchange engine
//! operates through.
//!
//! The engine never touches world state directly: it sees a player's holdings
//! and a shop's chest only as [`Inventory`] implementations. Both concrete
//! variants share the same fixed-slot arithmetic; they differ only in what
//! happens to items that do not fit.

use chrono::Utc;
use log::warn;

use crate::catalog::ItemKind;
use crate::items::ItemDescriptor;
use crate::world::{DroppedStack, Location};

/// Maximum units a single slot holds.
pub const MAX_STACK_SIZE: u32 = 64;
/// Slot count of a single chest.
pub const CHEST_SLOTS: usize = 27;
/// Slot count of a player inventory.
pub const PLAYER_SLOTS: usize = 36;

/// One occupied slot: a kind and how many units of it, `1..=MAX_STACK_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stack {
    pub kind: ItemKind,
    pub amount: u32,
}

/// What a live inventory must support for the exchange engine to run
/// against it. Implementations are views of mutable external state; callers
/// must not cache answers across a scheduling boundary.
pub trait Inventory {
    /// Total units across slots similar to `descriptor` reach its amount.
    fn contains_at_least(&self, descriptor: &ItemDescriptor) -> bool;

    /// Whether `descriptor.amount()` more units currently fit: room left in
    /// similar stacks first, then empty slots at a full stack each.
    fn free_capacity_for(&self, descriptor: &ItemDescriptor) -> bool;

    /// Deduct `descriptor.amount()` units from similar slots in slot order,
    /// draining each before moving on. Callers must have checked
    /// [`Inventory::contains_at_least`] first; behavior is unspecified
    /// otherwise.
    fn remove(&mut self, descriptor: &ItemDescriptor);

    /// Merge `descriptor.amount()` units in: top up similar stacks in slot
    /// order, then fill empty slots. What happens to units that fit nowhere
    /// is the implementation's call.
    fn add(&mut self, descriptor: &ItemDescriptor);
}

/// Fixed-size array of slots with the shared stack arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInventory {
    slots: Vec<Option<Stack>>,
}

impl SlotInventory {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
        }
    }

    pub fn slots(&self) -> &[Option<Stack>] {
        &self.slots
    }

    /// Total units held across all slots of this kind.
    pub fn count_of(&self, kind: ItemKind) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|stack| stack.kind == kind)
            .map(|stack| stack.amount)
            .sum()
    }

    pub fn contains_at_least(&self, descriptor: &ItemDescriptor) -> bool {
        self.count_of(descriptor.kind()) >= descriptor.amount()
    }

    pub fn free_capacity_for(&self, descriptor: &ItemDescriptor) -> bool {
        let needed = descriptor.amount();
        let mut capacity = 0u32;

        // Room on top of existing similar stacks counts first.
        for stack in self.slots.iter().flatten() {
            if stack.kind == descriptor.kind() {
                capacity += MAX_STACK_SIZE - stack.amount;
                if capacity >= needed {
                    return true;
                }
            }
        }

        // Then empty slots, a full stack each.
        for slot in &self.slots {
            if slot.is_none() {
                capacity += MAX_STACK_SIZE;
                if capacity >= needed {
                    return true;
                }
            }
        }

        false
    }

    /// Deduct in slot order, emptying each touched slot before the next and
    /// taking the remainder off the last. Expects the holdings were checked.
    pub fn remove(&mut self, descriptor: &ItemDescriptor) {
        let mut remaining = descriptor.amount();
        for slot in &mut self.slots {
            if remaining == 0 {
                break;
            }
            if let Some(stack) = slot {
                if stack.kind != descriptor.kind() {
                    continue;
                }
                if stack.amount <= remaining {
                    remaining -= stack.amount;
                    *slot = None;
                } else {
                    stack.amount -= remaining;
                    remaining = 0;
                }
            }
        }
    }

    /// Merge units in and return how many found no room.
    pub fn add(&mut self, descriptor: &ItemDescriptor) -> u32 {
        let mut remaining = descriptor.amount();

        for slot in &mut self.slots {
            if remaining == 0 {
                return 0;
            }
            if let Some(stack) = slot {
                if stack.kind == descriptor.kind() && stack.amount < MAX_STACK_SIZE {
                    let take = remaining.min(MAX_STACK_SIZE - stack.amount);
                    stack.amount += take;
                    remaining -= take;
                }
            }
        }

        for slot in &mut self.slots {
            if remaining == 0 {
                return 0;
            }
            if slot.is_none() {
                let take = remaining.min(MAX_STACK_SIZE);
                *slot = Some(Stack {
                    kind: descriptor.kind(),
                    amount: take,
                });
                remaining -= take;
            }
        }

        remaining
    }
}

/// A shop chest. Overflow on `add` cannot be reached through the engine
/// (capacity is checked before anything moves); if it happens anyway the
/// leftover is logged and dropped.
#[derive(Debug, Clone)]
pub struct ChestInventory {
    slots: SlotInventory,
}

impl ChestInventory {
    pub fn new() -> Self {
        Self {
            slots: SlotInventory::new(CHEST_SLOTS),
        }
    }

    pub fn count_of(&self, kind: ItemKind) -> u32 {
        self.slots.count_of(kind)
    }

    /// Stock the chest directly, as the shop owner filling it would. Returns
    /// the units that did not fit.
    pub fn stock(&mut self, descriptor: &ItemDescriptor) -> u32 {
        self.slots.add(descriptor)
    }

    pub fn slots(&self) -> &[Option<Stack>] {
        self.slots.slots()
    }
}

impl Default for ChestInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory for ChestInventory {
    fn contains_at_least(&self, descriptor: &ItemDescriptor) -> bool {
        self.slots.contains_at_least(descriptor)
    }

    fn free_capacity_for(&self, descriptor: &ItemDescriptor) -> bool {
        self.slots.free_capacity_for(descriptor)
    }

    fn remove(&mut self, descriptor: &ItemDescriptor) {
        self.slots.remove(descriptor);
    }

    fn add(&mut self, descriptor: &ItemDescriptor) {
        let leftover = self.slots.add(descriptor);
        if leftover > 0 {
            warn!(
                "chest had no room for {} of {}, units lost",
                leftover,
                descriptor.kind()
            );
        }
    }
}

/// A player's holdings. Units that do not fit an `add` fall to the ground at
/// the player's location as [`DroppedStack`]s for the host to materialize.
#[derive(Debug, Clone)]
pub struct PlayerInventory {
    slots: SlotInventory,
    location: Location,
    dropped: Vec<DroppedStack>,
}

impl PlayerInventory {
    pub fn new(location: Location) -> Self {
        Self {
            slots: SlotInventory::new(PLAYER_SLOTS),
            location,
            dropped: Vec::new(),
        }
    }

    pub fn count_of(&self, kind: ItemKind) -> u32 {
        self.slots.count_of(kind)
    }

    /// Hand the player items directly (starting holdings, pickups). Overflow
    /// drops, same as an exchange payout.
    pub fn give(&mut self, descriptor: &ItemDescriptor) {
        self.add(descriptor);
    }

    /// Drain the stacks that hit the ground since the last call.
    pub fn take_dropped(&mut self) -> Vec<DroppedStack> {
        std::mem::take(&mut self.dropped)
    }

    pub fn slots(&self) -> &[Option<Stack>] {
        self.slots.slots()
    }
}

impl Inventory for PlayerInventory {
    fn contains_at_least(&self, descriptor: &ItemDescriptor) -> bool {
        self.slots.contains_at_least(descriptor)
    }

    fn free_capacity_for(&self, descriptor: &ItemDescriptor) -> bool {
        self.slots.free_capacity_for(descriptor)
    }

    fn remove(&mut self, descriptor: &ItemDescriptor) {
        self.slots.remove(descriptor);
    }

    fn add(&mut self, descriptor: &ItemDescriptor) {
        let leftover = self.slots.add(descriptor);
        if leftover > 0 {
            self.dropped.push(DroppedStack {
                kind: descriptor.kind(),
                amount: leftover,
                location: self.location.clone(),
                dropped_at: Utc::now(),
            });
        }
    }
}
