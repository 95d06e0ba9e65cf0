use ahash::AHashMap;

/// An entity addressable by a string key (`uuid`, or `campaign_id` for the root).
pub trait Keyed {
    fn key(&self) -> &str;
}

/// An insertion-ordered set of keyed entities with O(1) average lookup by key.
///
/// Inserting an entity whose key is already present replaces it in place: its
/// position is kept and the collection does not grow.
#[derive(Debug, Clone)]
pub struct Collection<T: Keyed> {
    items: Vec<T>,
    index: AHashMap<String, usize>,
}

impl<T: Keyed> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: AHashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.items[i])
    }

    /// Crate-internal: callers must not change the entity's key.
    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.index.get(key).map(|&i| &mut self.items[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts or replaces. Returns the previous entity for that key, if any.
    pub fn upsert(&mut self, item: T) -> Option<T> {
        match self.index.get(item.key()) {
            Some(&i) => Some(std::mem::replace(&mut self.items[i], item)),
            None => {
                self.index.insert(item.key().to_string(), self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    /// Removes by key, preserving the order of the remaining entities.
    pub fn remove(&mut self, key: &str) -> Option<T> {
        let i = self.index.remove(key)?;
        let removed = self.items.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Keyed::key)
    }
}

impl<T: Keyed> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed + PartialEq> PartialEq for Collection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Keyed> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            collection.upsert(item);
        }
        collection
    }
}

impl<'a, T: Keyed> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Keyed> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
