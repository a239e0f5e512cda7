use std::ops::{Index, IndexMut};

use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::Result;

/// Generic storage trait for physics objects
pub trait Storage<T, H> {
    /// Creates a new empty storage
    fn new() -> Self;

    /// Adds an item to the storage and returns its handle
    fn add(&mut self, item: T) -> H;

    /// Gets a reference to an item by its handle
    fn get(&self, handle: H) -> Option<&T>;

    /// Gets a mutable reference to an item by its handle
    fn get_mut(&mut self, handle: H) -> Option<&mut T>;

    /// Removes an item from the storage
    fn remove(&mut self, handle: H) -> Option<T>;

    /// Returns the number of items in the storage
    fn len(&self) -> usize;

    /// Returns whether the storage is empty
    fn is_empty(&self) -> bool;

    /// Returns an iterator over all items
    fn iter<'a>(&'a self) -> impl Iterator<Item = (H, &'a T)> + 'a
    where
        T: 'a;

    /// Returns a mutable iterator over all items
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (H, &'a mut T)> + 'a
    where
        T: 'a;
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,

    /// Position in the dense item list while the slot is occupied
    dense: Option<usize>,
}

/// Generational arena for bodies.
///
/// Items are kept densely in insertion order, so positional access and
/// iteration follow the order bodies were added. Handles carry the
/// generation of their slot; once an item is removed, its handle stops
/// resolving even after the slot is reused.
#[derive(Debug)]
pub struct BodyStorage<T> {
    items: Vec<(BodyHandle, T)>,
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl<T> Storage<T, BodyHandle> for BodyStorage<T> {
    fn new() -> Self {
        Self::with_capacity(0)
    }

    fn add(&mut self, item: T) -> BodyHandle {
        let dense = self.items.len();
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.dense = Some(dense);
                BodyHandle { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, dense: Some(dense) });
                BodyHandle { index, generation: 0 }
            }
        };
        self.items.push((handle, item));
        handle
    }

    fn get(&self, handle: BodyHandle) -> Option<&T> {
        let dense = self.dense_index(handle)?;
        Some(&self.items[dense].1)
    }

    fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        let dense = self.dense_index(handle)?;
        Some(&mut self.items[dense].1)
    }

    fn remove(&mut self, handle: BodyHandle) -> Option<T> {
        let dense = self.dense_index(handle)?;
        let (_, item) = self.items.remove(dense);
        self.retire(handle);
        self.reindex_from(dense);
        Some(item)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (BodyHandle, &'a T)> + 'a
    where
        T: 'a,
    {
        self.items.iter().map(|(handle, item)| (*handle, item))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (BodyHandle, &'a mut T)> + 'a
    where
        T: 'a,
    {
        self.items.iter_mut().map(|(handle, item)| (*handle, item))
    }
}

impl<T> BodyStorage<T> {
    /// Creates an empty storage with room for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Returns true if the handle refers to a live item
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.dense_index(handle).is_some()
    }

    /// Gets a body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&T> {
        self.get(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Gets a mutable reference to a body by its handle, returning an error if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut T> {
        self.get_mut(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Handle of the item at insertion position `index`
    pub fn handle_at(&self, index: usize) -> Option<BodyHandle> {
        self.items.get(index).map(|(handle, _)| *handle)
    }

    /// Item at insertion position `index`
    pub fn get_at(&self, index: usize) -> Option<&T> {
        self.items.get(index).map(|(_, item)| item)
    }

    /// Mutable item at insertion position `index`
    pub fn get_at_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index).map(|(_, item)| item)
    }

    /// Mutably borrows two distinct items at once.
    ///
    /// Returns `None` if either handle is stale or both name the same item.
    pub fn get_pair_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Option<(&mut T, &mut T)> {
        let first = self.dense_index(a)?;
        let second = self.dense_index(b)?;
        if first == second {
            return None;
        }

        if first < second {
            let (head, tail) = self.items.split_at_mut(second);
            Some((&mut head[first].1, &mut tail[0].1))
        } else {
            let (head, tail) = self.items.split_at_mut(first);
            Some((&mut tail[0].1, &mut head[second].1))
        }
    }

    /// Removes every item matching `predicate`, keeping the survivors in
    /// their original order, and returns the removed items in order.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<(BodyHandle, T)>
    where
        F: FnMut(&T) -> bool,
    {
        if !self.items.iter().any(|(_, item)| predicate(item)) {
            return Vec::new();
        }

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|(_, item)| predicate(item));
        self.items = kept;

        for (handle, _) in &removed {
            self.retire(*handle);
        }
        self.reindex_from(0);
        removed
    }

    fn dense_index(&self, handle: BodyHandle) -> Option<usize> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.dense
    }

    fn retire(&mut self, handle: BodyHandle) {
        let slot = &mut self.slots[handle.index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        slot.dense = None;
        self.free.push(handle.index);
    }

    fn reindex_from(&mut self, start: usize) {
        for (dense, (handle, _)) in self.items.iter().enumerate().skip(start) {
            self.slots[handle.index as usize].dense = Some(dense);
        }
    }
}

impl<T> Default for BodyStorage<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T> Index<BodyHandle> for BodyStorage<T> {
    type Output = T;

    /// Panics if the handle is stale
    fn index(&self, handle: BodyHandle) -> &T {
        match self.get(handle) {
            Some(item) => item,
            None => panic!("stale body handle {:?}", handle),
        }
    }
}

impl<T> IndexMut<BodyHandle> for BodyStorage<T> {
    fn index_mut(&mut self, handle: BodyHandle) -> &mut T {
        match self.get_mut(handle) {
            Some(item) => item,
            None => panic!("stale body handle {:?}", handle),
        }
    }
}
