use std::collections::HashMap;

/// Per-identity item sequences held by a processing unit.
///
/// The store has no lock of its own; the owning unit keeps it behind a
/// `Mutex` and only touches it inside its critical section.
#[derive(Debug)]
pub struct BufferStore<T> {
    buffers: HashMap<String, Vec<T>>,
}

impl<T> BufferStore<T> {
    pub fn new() -> Self {
        Self {
            buffers: HashMap::new(),
        }
    }

    pub fn put(&mut self, identity: impl Into<String>, sequence: Vec<T>) {
        self.buffers.insert(identity.into(), sequence);
    }

    /// Empties every sequence, keeping the keys. No-op on an empty store.
    pub fn clear_all(&mut self) {
        if self.buffers.is_empty() {
            return;
        }
        for sequence in self.buffers.values_mut() {
            sequence.clear();
        }
    }

    /// Empties the sequence for one identity, keeping the key.
    pub fn clear(&mut self, identity: &str) {
        if let Some(sequence) = self.buffers.get_mut(identity) {
            sequence.clear();
        }
    }

    pub fn get(&self, identity: &str) -> Option<&[T]> {
        self.buffers.get(identity).map(|s| s.as_slice())
    }

    pub fn len_of(&self, identity: &str) -> usize {
        self.buffers.get(identity).map(|s| s.len()).unwrap_or(0)
    }

    /// True when the store holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn identities(&self) -> Vec<String> {
        self.buffers.keys().cloned().collect()
    }
}

impl<T: Clone> BufferStore<T> {
    /// Returns a copy of the stored sequence for `identity`, or a fresh empty
    /// one. The store is left untouched; changes are written back with
    /// [`BufferStore::put`].
    pub fn get_or_create(&self, identity: &str) -> Vec<T> {
        self.buffers.get(identity).cloned().unwrap_or_default()
    }
}

impl<T> Default for BufferStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
