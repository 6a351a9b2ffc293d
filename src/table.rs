use log::{debug, trace};
use thiserror::Error;

use crate::boxentry;
use crate::chain::Chain;
use crate::hash::hash_index;

/// A table can't have fewer than this many slots.
pub const MIN_CAPACITY: usize = 8;

/// Grow once live entries exceed this fraction of the slot count.
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 0.7;

#[derive(Error, Debug, PartialEq)]
pub enum CapacityError {
    #[error("capacity {requested} is below the minimum of {minimum}")]
    BelowMinimum { requested: usize, minimum: usize },

    #[error("capacity {requested} cannot hold the {count} entries already stored")]
    WouldDropEntries { requested: usize, count: usize },
}

/// A hash table with string keys, chaining collisions per slot.
///
/// Slots start out as `None` and get a [`Chain`] on the first insertion that
/// lands there; an emptied chain stays in place rather than reverting to
/// `None`, and every operation treats the two states identically.
#[derive(Debug)]
pub struct Table<V> {
    slots: Vec<Option<Chain<V>>>,
    count: usize,
    max_load_factor: f32,
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Table<V> {
    /// Creates a table with [`MIN_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::alloc(MIN_CAPACITY)
    }

    /// Creates a table with `capacity` slots, rejecting anything below
    /// [`MIN_CAPACITY`]. The same rejection applies wherever capacity is
    /// set; nothing clamps silently.
    pub fn with_capacity(capacity: usize) -> Result<Self, CapacityError> {
        if capacity < MIN_CAPACITY {
            return Err(CapacityError::BelowMinimum {
                requested: capacity,
                minimum: MIN_CAPACITY,
            });
        }
        Ok(Self::alloc(capacity))
    }

    fn alloc(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            count: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }

    /// Returns the number of slots in the table, not the number of
    /// entries stored in it.
    pub fn get_num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Entries over slots, recomputed on every call.
    pub fn get_load_factor(&self) -> f32 {
        self.count as f32 / self.slots.len() as f32
    }

    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    /// Returns the number of entries in the table
    pub fn len(&self) -> usize {
        self.count
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Stores `value` under `key` and returns a reference to the stored
    /// value.
    ///
    /// A key already present has its value overwritten in place and the
    /// entry count stays put; a new key is pushed at its chain's head. If
    /// the insert lifts the load factor above the threshold, the table
    /// grows to twice its capacity before returning.
    pub fn put(&mut self, key: &str, value: V) -> &V {
        self.insert(key.to_owned(), value);

        if self.get_load_factor() > self.max_load_factor {
            let doubled = self.slots.len() * 2;
            trace!(
                "load factor {:.2} above {:.2}, growing to {doubled} slots",
                self.get_load_factor(),
                self.max_load_factor
            );
            self.rehash_into(doubled);
        }

        let i = self.slot_index(key);
        let entry = self.slots[i]
            .as_ref()
            .and_then(|chain| chain.find(key))
            .expect("entry present right after insert");
        &entry.value
    }

    /// Insert without the growth check; `put` and rehashing both land here.
    fn insert(&mut self, key: String, value: V) {
        let i = self.slot_index(&key);
        let chain = self.slots[i].get_or_insert_with(Chain::new);

        match chain.find_mut(&key) {
            Some(entry) => {
                entry.value = value;
            }
            None => {
                chain.push_boxed(boxentry!(key, value));
                self.count += 1;
            }
        }
    }

    /// Retrieves the value stored under `key`, or `None` if the key is not
    /// found. A slot whose chain has emptied answers the same as a slot
    /// that never held one.
    pub fn get(&self, key: &str) -> Option<&V> {
        let i = self.slot_index(key);
        self.slots[i]
            .as_ref()?
            .find(key)
            .map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let i = self.slot_index(key);
        self.slots[i]
            .as_mut()?
            .find_mut(key)
            .map(|entry| &mut entry.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry stored under `key` and returns its value, or
    /// `None` if the key is not found. The slot's chain stays allocated
    /// even when this empties it. No shrinking happens on delete.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let i = self.slot_index(key);
        let removed = self.slots[i].as_mut()?.remove(key)?;
        self.count -= 1;
        Some(removed)
    }

    /// Reslots the table to `new_capacity`, rehashing every entry.
    ///
    /// The swap happens inside the same table identity, so every holder of
    /// the table sees the new capacity; there is no caller-invisible
    /// rebinding. Rejects capacities below [`MIN_CAPACITY`] or too small
    /// for the entries already stored.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), CapacityError> {
        if new_capacity < MIN_CAPACITY {
            return Err(CapacityError::BelowMinimum {
                requested: new_capacity,
                minimum: MIN_CAPACITY,
            });
        }
        if new_capacity < self.count {
            return Err(CapacityError::WouldDropEntries {
                requested: new_capacity,
                count: self.count,
            });
        }

        self.rehash_into(new_capacity);
        Ok(())
    }

    // [adapters]

    /// Visits every entry, slot by slot, each chain head to tail. No
    /// ordering guarantee beyond that.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots
            .iter()
            .flatten()
            .flat_map(|chain| chain.iter())
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    // [private]

    fn slot_index(&self, key: &str) -> usize {
        hash_index(key, self.slots.len())
    }

    /// Moves every entry into a fresh slot array of `new_capacity`,
    /// re-inserting each one so it lands where it hashes under the new
    /// capacity. Callers validate `new_capacity` first.
    fn rehash_into(&mut self, new_capacity: usize) {
        let old_capacity = self.slots.len();
        let old_slots =
            std::mem::replace(&mut self.slots, (0..new_capacity).map(|_| None).collect());
        self.count = 0;

        for chain in old_slots.into_iter().flatten() {
            for entry in chain {
                self.insert(entry.key, entry.value);
            }
        }

        debug!(
            "rehashed {} entries from {old_capacity} into {new_capacity} slots",
            self.count
        );
    }
}
