//! Generational handle table backing every object handed across the C
//! boundary.
//!
//! A handle is `slot << 32 | generation`. Removing an entry bumps the
//! slot's generation, so a destroyed handle no longer matches and lookups
//! return `None` instead of touching a recycled object. A slot whose
//! generation would wrap to 0 is retired for good.

fn pack(slot: u32, generation: u32) -> u64 {
    (u64::from(slot) << 32) | u64::from(generation)
}

fn unpack(handle: u64) -> (usize, u32) {
    ((handle >> 32) as usize, handle as u32)
}

struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

/// Slot vector plus free list, keyed by packed `u64` handles.
pub(crate) struct HandleTable<T> {
    entries: Vec<Entry<T>>,
    vacant: Vec<u32>,
}

impl<T> HandleTable<T> {
    /// An empty table; `const` so it can back a `static`.
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Store `value` and return its handle.
    ///
    /// Returns `None` once `u32::MAX` slots have been issued.
    pub(crate) fn insert(&mut self, value: T) -> Option<u64> {
        if let Some(slot) = self.vacant.pop() {
            let entry = &mut self.entries[slot as usize];
            entry.value = Some(value);
            return Some(pack(slot, entry.generation));
        }
        let slot = u32::try_from(self.entries.len()).ok()?;
        self.entries.push(Entry {
            generation: 0,
            value: Some(value),
        });
        Some(pack(slot, 0))
    }

    /// The live value behind `handle`, if any.
    pub(crate) fn get(&self, handle: u64) -> Option<&T> {
        let (slot, generation) = unpack(handle);
        let entry = self.entries.get(slot)?;
        if entry.generation != generation {
            return None;
        }
        entry.value.as_ref()
    }

    /// Take the value out and invalidate `handle`. A second remove of the
    /// same handle returns `None`.
    pub(crate) fn remove(&mut self, handle: u64) -> Option<T> {
        let (slot, generation) = unpack(handle);
        let entry = self.entries.get_mut(slot)?;
        if entry.generation != generation {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        if entry.generation != 0 {
            self.vacant.push(slot as u32);
        }
        Some(value)
    }

    /// Number of live entries.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len() - self.vacant.len() - self.retired()
    }

    #[cfg(test)]
    fn retired(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.value.is_none() && e.generation == 0)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get() {
        let mut table = HandleTable::new();
        let h = table.insert("arena").unwrap();
        assert_eq!(table.get(h), Some(&"arena"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn removed_handle_is_stale() {
        let mut table = HandleTable::new();
        let h = table.insert(7u8).unwrap();
        assert_eq!(table.remove(h), Some(7));
        assert_eq!(table.get(h), None);
        assert_eq!(table.remove(h), None);
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn recycled_slot_gets_new_generation() {
        let mut table = HandleTable::new();
        let old = table.insert(1u8).unwrap();
        table.remove(old);
        let new = table.insert(2u8).unwrap();
        assert_eq!(unpack(old).0, unpack(new).0);
        assert_ne!(old, new);
        assert_eq!(table.get(old), None);
        assert_eq!(table.get(new), Some(&2));
    }

    #[test]
    fn never_issued_handle_is_rejected() {
        let table: HandleTable<u8> = HandleTable::new();
        assert_eq!(table.get(0), None);
        assert_eq!(table.get(pack(12, 3)), None);
    }

    #[test]
    fn wrapped_generation_retires_slot() {
        let mut table = HandleTable::new();
        let h = table.insert(0u8).unwrap();
        table.remove(h);
        table.entries[0].generation = u32::MAX;
        let last = table.insert(1u8).unwrap();
        assert_eq!(unpack(last), (0, u32::MAX));

        table.remove(last);
        assert!(!table.vacant.contains(&0));
        assert_eq!(table.get(pack(0, 0)), None);

        let fresh = table.insert(2u8).unwrap();
        assert_eq!(unpack(fresh).0, 1);
        assert_eq!(table.len(), 1);
    }
}
