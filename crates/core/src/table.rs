//! Insertion-ordered key to identifier table.
//!
//! [`AssociationTable`] is the storage behind [`UidManager`](crate::UidManager). Its own methods
//! perform no validation: they keep keys unique and nothing else. Callers that reach it through
//! [`UidManager::get_map`](crate::UidManager::get_map) are responsible for not introducing
//! duplicate identifiers.

use uidmap_uuid::Uid;

/// Ordered `(key, identifier)` pairs with unique keys.
///
/// Keys only need `PartialEq`, so lookups are linear scans.
#[derive(Clone, Debug, PartialEq)]
pub struct AssociationTable<K> {
    entries: Vec<(K, Uid)>,
}

impl<K> Default for AssociationTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> AssociationTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Returns the identifier stored for `key`.
    pub fn get(&self, key: &K) -> Option<&Uid> {
        self.entries
            .iter()
            .find_map(|(k, uid)| (k == key).then_some(uid))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// Returns the first key whose identifier equals `uid` exactly.
    pub fn key_for(&self, uid: &str) -> Option<&K> {
        self.entries
            .iter()
            .find_map(|(k, stored)| (stored.as_str() == uid).then_some(k))
    }

    pub fn contains_uid(&self, uid: &str) -> bool {
        self.key_for(uid).is_some()
    }

    /// Stores `uid` for `key`, returning the identifier it replaced.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn insert(&mut self, key: K, uid: Uid) -> Option<Uid> {
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, uid)),
            None => {
                self.entries.push((key, uid));
                None
            }
        }
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &K) -> Option<Uid> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).1)
    }

    /// Removes the first entry whose identifier equals `uid` exactly.
    pub fn remove_uid(&mut self, uid: &str) -> Option<(K, Uid)> {
        let index = self
            .entries
            .iter()
            .position(|(_, stored)| stored.as_str() == uid)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Uid)> {
        self.entries.iter().map(|(k, uid)| (k, uid))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn uids(&self) -> impl Iterator<Item = &Uid> {
        self.entries.iter().map(|(_, uid)| uid)
    }
}

impl<K: PartialEq> FromIterator<(K, Uid)> for AssociationTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, Uid)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, uid) in iter {
            table.insert(key, uid);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> Uid {
        Uid::parse(s).unwrap()
    }

    const A: &str = "aa97b177-9383-4934-8543-0f91a7a02836";
    const B: &str = "00000000-0000-4000-8000-000000000000";
    const C: &str = "ffffffff-ffff-4fff-bfff-ffffffffffff";

    #[test]
    fn test_insert_existing_key_keeps_position() {
        let mut table = AssociationTable::new();
        table.insert("x", uid(A));
        table.insert("y", uid(B));

        let replaced = table.insert("x", uid(C));

        assert_eq!(replaced, Some(uid(A)));
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(table.get(&"x"), Some(&uid(C)));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut table: AssociationTable<&str> =
            [("x", uid(A)), ("y", uid(B)), ("z", uid(C))].into_iter().collect();

        assert_eq!(table.remove(&"y"), Some(uid(B)));
        assert_eq!(table.remove(&"y"), None);
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec!["x", "z"]);
    }

    #[test]
    fn test_key_for_is_exact_match() {
        let table: AssociationTable<&str> = [("x", uid(A))].into_iter().collect();

        assert_eq!(table.key_for(A), Some(&"x"));
        assert_eq!(table.key_for(&A.to_ascii_uppercase()), None);
        assert!(table.contains_uid(A));
    }

    #[test]
    fn test_remove_uid() {
        let mut table: AssociationTable<&str> =
            [("x", uid(A)), ("y", uid(B))].into_iter().collect();

        assert_eq!(table.remove_uid(B), Some(("y", uid(B))));
        assert_eq!(table.remove_uid(B), None);
        assert_eq!(table.len(), 1);
    }
}
