/// Id-keyed registry owned by the presenter
///
/// Replaces process-wide lookup tables: whoever needs a lookup is handed the
/// registry by reference.

use rustc_hash::FxHashMap;
use crate::request::SurfaceId;

#[derive(Debug)]
pub struct IdRegistry<T> {
    entries: FxHashMap<SurfaceId, T>,
}

impl<T> Default for IdRegistry<T> {
    fn default() -> Self {
        Self { entries: FxHashMap::default() }
    }
}

impl<T> IdRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: SurfaceId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: SurfaceId) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Insert an entry, returning the one it replaces
    pub fn insert(&mut self, id: SurfaceId, value: T) -> Option<T> {
        self.entries.insert(id, value)
    }

    pub fn remove(&mut self, id: SurfaceId) -> Option<T> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> Vec<SurfaceId> {
        let mut ids: Vec<SurfaceId> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
