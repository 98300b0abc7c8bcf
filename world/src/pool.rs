//! Generational slot map that owns every instance of a single item type.

use std::collections::TryReserveError;

use cat_bomber_core::Handle;
use thiserror::Error;

/// Highest slot index a pool may issue; `u32::MAX` is reserved for [`Handle::NONE`].
const MAX_SLOTS: u32 = u32::MAX;

/// Reasons a pool may fail to accept a new item.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The backing storage could not grow.
    #[error("pool storage could not grow: {0}")]
    Allocation(#[from] TryReserveError),
    /// Every addressable slot index is in use.
    #[error("pool cannot address more than {max} slots")]
    IndexSpaceExhausted {
        /// Number of addressable slots.
        max: u32,
    },
}

#[derive(Clone, Debug)]
enum Entry<T> {
    Free { next_free: Option<u32> },
    Occupied { generation: u32, item: T },
}

/// Handle-based object pool.
///
/// Removing an item frees its slot, threads it onto an intrusive free list and
/// advances the pool's generation counter, so every handle issued before the
/// removal is permanently rejected by [`Set::get`] and [`Set::remove`] even
/// after the slot is reused.
#[derive(Clone, Debug)]
pub struct Set<T> {
    entries: Vec<Entry<T>>,
    free_head: Option<u32>,
    generation: u32,
    len: usize,
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Set<T> {
    /// Creates an empty pool without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free_head: None,
            generation: 0,
            len: 0,
        }
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Reports whether no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `item` and returns its handle.
    pub fn add(&mut self, item: T) -> Result<Handle, PoolError> {
        self.add_with_pointer(item).map(|(handle, _)| handle)
    }

    /// Stores `item`, returning its handle together with a reference to the stored value.
    pub fn add_with_pointer(&mut self, item: T) -> Result<(Handle, &mut T), PoolError> {
        let index = match self.free_head {
            Some(index) => index,
            None => self.grow()?,
        };
        let slot = index as usize;

        self.free_head = match self.entries.get(slot) {
            Some(Entry::Free { next_free }) => *next_free,
            _ => unreachable!("free list references occupied slot {index}"),
        };

        let generation = self.generation;
        self.entries[slot] = Entry::Occupied { generation, item };
        self.len += 1;

        match &mut self.entries[slot] {
            Entry::Occupied { item, .. } => Ok((Handle::new(generation, index), item)),
            Entry::Free { .. } => unreachable!("slot {index} was just occupied"),
        }
    }

    /// Returns the item behind `handle` if the handle is still live.
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.entries.get(usize::try_from(handle.index()).ok()?)? {
            Entry::Occupied { generation, item } if *generation == handle.generation() => {
                Some(item)
            }
            _ => None,
        }
    }

    /// Mutable variant of [`Set::get`].
    #[must_use]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.entries.get_mut(usize::try_from(handle.index()).ok()?)? {
            Entry::Occupied { generation, item } if *generation == handle.generation() => {
                Some(item)
            }
            _ => None,
        }
    }

    /// Reports whether `handle` refers to a live item.
    #[must_use]
    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Removes and returns the item behind `handle`.
    ///
    /// Returns `None` for stale or out-of-range handles without touching the pool.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let index = usize::try_from(handle.index()).ok()?;
        let slot = self.entries.get_mut(index)?;
        match &*slot {
            Entry::Occupied { generation, .. } if *generation == handle.generation() => {}
            _ => return None,
        }

        let previous = std::mem::replace(
            slot,
            Entry::Free {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(handle.index());
        self.generation = self.generation.wrapping_add(1);
        self.len -= 1;

        match previous {
            Entry::Occupied { item, .. } => Some(item),
            Entry::Free { .. } => None,
        }
    }

    /// Iterates occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, Handle)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry {
                Entry::Occupied { generation, item } => {
                    Some((item, Handle::new(*generation, index as u32)))
                }
                Entry::Free { .. } => None,
            })
    }

    /// Handles of every occupied slot in index order.
    ///
    /// The result is detached from the pool so callers may remove items while
    /// walking it.
    #[must_use]
    pub fn handles(&self) -> Vec<Handle> {
        self.iter().map(|(_, handle)| handle).collect()
    }

    fn grow(&mut self) -> Result<u32, PoolError> {
        let index = u32::try_from(self.entries.len())
            .ok()
            .filter(|index| *index < MAX_SLOTS)
            .ok_or(PoolError::IndexSpaceExhausted { max: MAX_SLOTS })?;
        self.entries.try_reserve(1)?;
        self.entries.push(Entry::Free { next_free: None });
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slot_is_reused_with_new_generation() {
        let mut set = Set::new();
        let first = set.add(10).expect("add first");
        let second = set.add(20).expect("add second");

        assert_eq!(set.remove(first), Some(10));
        let third = set.add(30).expect("add third");

        assert_eq!(set.len(), 2);
        assert_eq!(third.index(), first.index());
        assert_ne!(third.generation(), first.generation());

        let mut values: Vec<i32> = set.iter().map(|(value, _)| *value).collect();
        values.sort_unstable();
        assert_eq!(values, vec![20, 30]);
        assert_eq!(set.get(second), Some(&20));
    }

    #[test]
    fn stale_handle_stays_dead_after_reuse() {
        let mut set = Set::new();
        let stale = set.add("old").expect("add");
        assert_eq!(set.remove(stale), Some("old"));
        let fresh = set.add("new").expect("add");

        assert_eq!(set.get(stale), None);
        assert_eq!(set.remove(stale), None);
        assert_eq!(set.get(fresh), Some(&"new"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn out_of_range_and_sentinel_handles_are_not_found() {
        let mut set: Set<u8> = Set::new();
        assert!(set.get(Handle::NONE).is_none());
        assert!(set.get(Handle::new(0, 5)).is_none());
        assert!(set.remove(Handle::NONE).is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn free_list_is_last_in_first_out() {
        let mut set = Set::new();
        let handles: Vec<Handle> = (0..4).map(|value| set.add(value).expect("add")).collect();
        assert_eq!(set.remove(handles[1]), Some(1));
        assert_eq!(set.remove(handles[3]), Some(3));

        let reused_last = set.add(7).expect("add");
        let reused_first = set.add(8).expect("add");
        let appended = set.add(9).expect("add");

        assert_eq!(reused_last.index(), 3);
        assert_eq!(reused_first.index(), 1);
        assert_eq!(appended.index(), 4);
    }

    #[test]
    fn add_with_pointer_exposes_stored_value() {
        let mut set = Set::new();
        let (handle, value) = set.add_with_pointer(String::from("cat")).expect("add");
        value.push('s');
        assert_eq!(set.get(handle).map(String::as_str), Some("cats"));
    }

    #[test]
    fn iteration_yields_handles_in_index_order() {
        let mut set = Set::new();
        let a = set.add('a').expect("add");
        let b = set.add('b').expect("add");
        let c = set.add('c').expect("add");
        assert_eq!(set.remove(b), Some('b'));

        let visited: Vec<Handle> = set.iter().map(|(_, handle)| handle).collect();
        assert_eq!(visited, vec![a, c]);
        assert_eq!(set.handles(), visited);
    }

    #[test]
    fn get_mut_respects_generation() {
        let mut set = Set::new();
        let handle = set.add(1).expect("add");
        if let Some(value) = set.get_mut(handle) {
            *value = 5;
        }
        assert_eq!(set.get(handle), Some(&5));
        assert_eq!(set.remove(handle), Some(5));
        assert!(set.get_mut(handle).is_none());
    }
}
