//! Fixed-capacity unordered storage backing a single grid cell.

use thiserror::Error;

/// Returned when appending to a [`FixedArray`] that is already at capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("fixed array is full ({capacity} items)")]
pub struct TileFull {
    /// Capacity of the rejecting array.
    pub capacity: usize,
}

/// Inline array holding at most `N` items.
///
/// Order is not preserved: removal moves the last item into the vacated slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedArray<T, const N: usize> {
    items: [T; N],
    len: usize,
}

impl<T: Copy + Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> FixedArray<T, N> {
    /// Creates an empty array.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: [T::default(); N],
            len: 0,
        }
    }

    /// Maximum number of items.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of stored items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Reports whether no item is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reports whether another append would fail.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Stored items in storage order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items[..self.len]
    }

    /// Iterates stored items in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.as_slice().iter()
    }

    /// Appends `item`, leaving the array untouched when it is full.
    pub fn try_append(&mut self, item: T) -> Result<(), TileFull> {
        if self.is_full() {
            return Err(TileFull { capacity: N });
        }
        self.items[self.len] = item;
        self.len += 1;
        Ok(())
    }

    /// Removes the item at `index` by moving the last item into its place.
    ///
    /// # Panics
    ///
    /// Panics when `index` is not below [`FixedArray::len`].
    pub fn swap_remove_at(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "swap_remove_at index {index} out of bounds for length {}",
            self.len
        );
        let removed = self.items[index];
        self.len -= 1;
        self.items[index] = self.items[self.len];
        self.items[self.len] = T::default();
        removed
    }
}

impl<T: Copy + Default + PartialEq, const N: usize> FixedArray<T, N> {
    /// Reports whether `item` is stored.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.as_slice().contains(item)
    }

    /// Removes the first occurrence of `item`, returning whether it was found.
    pub fn swap_remove(&mut self, item: &T) -> bool {
        match self.as_slice().iter().position(|stored| stored == item) {
            Some(index) => {
                let _ = self.swap_remove_at(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_array_rejects_append_without_mutation() {
        let mut tile: FixedArray<u32, 2> = FixedArray::new();
        tile.try_append(1).expect("room for first");
        tile.try_append(2).expect("room for second");
        let before = tile;

        assert_eq!(tile.try_append(3), Err(TileFull { capacity: 2 }));
        assert_eq!(tile, before);
        assert_eq!(tile.len(), 2);
        assert_eq!(tile.as_slice(), &[1, 2]);
    }

    #[test]
    fn swap_remove_moves_last_item_into_gap() {
        let mut tile: FixedArray<u32, 4> = FixedArray::new();
        for value in [10, 20, 30] {
            tile.try_append(value).expect("room");
        }

        assert!(tile.swap_remove(&10));
        assert_eq!(tile.as_slice(), &[30, 20]);
        assert!(!tile.swap_remove(&99));
        assert_eq!(tile.len(), 2);
    }

    #[test]
    fn swap_remove_at_returns_removed_item() {
        let mut tile: FixedArray<u32, 3> = FixedArray::new();
        tile.try_append(5).expect("room");
        tile.try_append(6).expect("room");

        assert_eq!(tile.swap_remove_at(1), 6);
        assert_eq!(tile.swap_remove_at(0), 5);
        assert!(tile.is_empty());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn swap_remove_at_panics_past_length() {
        let mut tile: FixedArray<u32, 3> = FixedArray::new();
        tile.try_append(1).expect("room");
        let _ = tile.swap_remove_at(1);
    }

    #[test]
    fn removal_frees_room_for_append() {
        let mut tile: FixedArray<u32, 1> = FixedArray::new();
        tile.try_append(1).expect("room");
        assert!(tile.is_full());
        assert!(tile.swap_remove(&1));
        assert!(tile.try_append(2).is_ok());
        assert!(tile.contains(&2));
    }
}
