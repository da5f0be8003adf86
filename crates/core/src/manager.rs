//! Bidirectional key to identifier association.
//!
//! [`UidManager`] owns one [`UuidGenerator`] and one [`AssociationTable`]. Every mutation goes
//! through a validation step first; when a step rejects, the manager reports the rejection to
//! its [`DiagnosticSink`] and returns the error without having changed anything.
//!
//! # Invariants
//!
//! Through the validated operations:
//! - each key maps to at most one identifier,
//! - no two keys share an identifier (checked when an association is created),
//! - every stored identifier is lowercase.
//!
//! [`UidManager::get_map`] hands out the live table and bypasses all of the above.

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::key::UidKey;
use crate::snapshot::{Snapshot, SnapshotEntry};
use crate::table::AssociationTable;
use crate::{UidMapError, UidMapResult};
use chrono::Utc;
use std::collections::HashSet;
use std::fmt;
use uidmap_uuid::{Candidates, RandomSource, SystemRandom, Uid, UuidGenerator};

/// Associates keys of type `K` with generated or supplied version-4 identifiers.
pub struct UidManager<K, R = SystemRandom> {
    generator: UuidGenerator<R>,
    table: AssociationTable<K>,
    sink: Box<dyn DiagnosticSink>,
}

impl<K: UidKey> UidManager<K> {
    /// Creates an empty manager that logs rejections with `tracing`.
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }

    /// Creates an empty manager that reports rejections to `sink`.
    pub fn with_sink(sink: impl DiagnosticSink + 'static) -> Self {
        Self::with_generator(UuidGenerator::new(), sink)
    }
}

impl<K: UidKey> Default for UidManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: UidKey, R: RandomSource> UidManager<K, R> {
    /// Creates an empty manager around an existing generator.
    ///
    /// The generator's ledger is kept, so identifiers it has already issued stay reserved.
    pub fn with_generator(
        generator: UuidGenerator<R>,
        sink: impl DiagnosticSink + 'static,
    ) -> Self {
        Self {
            generator,
            table: AssociationTable::new(),
            sink: Box::new(sink),
        }
    }

    fn reject<T>(&self, operation: &'static str, error: UidMapError) -> UidMapResult<T> {
        self.sink.report(operation, &error);
        Err(error)
    }

    /// Filters `input` down to version-4 candidates, keeping their original casing.
    pub fn validate<'a>(&self, input: impl Into<Candidates<'a>>) -> Vec<String> {
        self.generator.validate(input)
    }

    /// Associates `key` with a freshly generated identifier.
    ///
    /// Any previous association for `key` is dropped first; the old identifier is never reused.
    ///
    /// # Errors
    ///
    /// Returns [`UidMapError::InvalidKey`] if `key` is absent or NaN.
    pub fn generate_uid_for(&mut self, key: K) -> UidMapResult<Uid> {
        if !key.is_valid_key() {
            return self.reject("generate_uid_for", UidMapError::InvalidKey);
        }

        self.table.remove(&key);
        let uid = self.generator.generate();
        self.table.insert(key, uid.clone());
        Ok(uid)
    }

    pub fn get_uid_for(&self, key: &K) -> Option<&Uid> {
        self.table.get(key)
    }

    /// Returns the key associated with `uid`.
    ///
    /// Matching is exact against the stored lowercase form; an uppercase `uid` will not match.
    pub fn get_key_for(&self, uid: &str) -> Option<&K> {
        self.table.key_for(uid)
    }

    pub fn has_uid_for(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    pub fn has_key_for(&self, uid: &str) -> bool {
        self.table.contains_uid(uid)
    }

    pub fn keys(&self) -> Vec<K> {
        self.table.keys().cloned().collect()
    }

    pub fn uids(&self) -> Vec<Uid> {
        self.table.uids().cloned().collect()
    }

    pub fn entries(&self) -> Vec<(K, Uid)> {
        self.table
            .iter()
            .map(|(key, uid)| (key.clone(), uid.clone()))
            .collect()
    }

    /// Replaces every association with `entries`.
    ///
    /// The whole batch is checked before anything changes. On success the table holds exactly
    /// the batch, in order, and the generator's ledger is replaced by the batch's identifiers.
    ///
    /// # Errors
    ///
    /// Returns, leaving the manager untouched:
    /// - [`UidMapError::DuplicateUid`] if an identifier repeats within the batch (ignoring case),
    /// - [`UidMapError::InvalidUid`] if an identifier is not a version-4 UUID,
    /// - [`UidMapError::InvalidKey`] if a key is absent or NaN.
    pub fn restore<I, S>(&mut self, entries: I) -> UidMapResult<()>
    where
        I: IntoIterator<Item = (K, S)>,
        S: AsRef<str>,
    {
        let batch = match Self::validate_batch(entries) {
            Ok(batch) => batch,
            Err(err) => return self.reject("restore", err),
        };

        // Swap the ledger before clearing so a failure here still leaves the table intact
        let ledger = batch.iter().map(|(_, uid)| uid);
        if let Err(err) = self.generator.set_existing(ledger) {
            return self.reject(
                "restore",
                UidMapError::Internal(format!("validated batch rejected by generator: {err}")),
            );
        }

        self.table.clear();
        for (key, uid) in batch {
            self.table.insert(key, uid);
        }
        Ok(())
    }

    fn validate_batch<I, S>(entries: I) -> UidMapResult<Vec<(K, Uid)>>
    where
        I: IntoIterator<Item = (K, S)>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut batch = Vec::new();

        for (key, uid) in entries {
            let lowered = uid.as_ref().to_ascii_lowercase();
            if !seen.insert(lowered.clone()) {
                return Err(UidMapError::DuplicateUid(lowered));
            }
            let uid = Uid::parse(&lowered)?;
            if !key.is_valid_key() {
                return Err(UidMapError::InvalidKey);
            }
            batch.push((key, uid));
        }

        Ok(batch)
    }

    /// Associates `key` with a caller-supplied identifier.
    ///
    /// The identifier is lowercased. It must not already be stored for any key, nor be in the
    /// generator's ledger. It is not added to the ledger. Any previous association for `key` is
    /// replaced.
    ///
    /// # Errors
    ///
    /// - [`UidMapError::InvalidUid`] if `uid` is not a version-4 UUID,
    /// - [`UidMapError::InvalidKey`] if `key` is absent or NaN,
    /// - [`UidMapError::UidInUse`] if the identifier is already stored or issued.
    pub fn set(&mut self, key: K, uid: &str) -> UidMapResult<()> {
        let uid = match Uid::parse(uid) {
            Ok(uid) => uid,
            Err(err) => return self.reject("set", err.into()),
        };
        if !key.is_valid_key() {
            return self.reject("set", UidMapError::InvalidKey);
        }
        if self.table.contains_uid(uid.as_str()) || self.generator.contains(&uid) {
            return self.reject("set", UidMapError::UidInUse(uid));
        }

        self.table.remove(&key);
        self.table.insert(key, uid);
        Ok(())
    }

    /// Removes the association holding `uid`.
    ///
    /// # Errors
    ///
    /// Returns [`UidMapError::UidNotFound`] if no key maps to `uid`.
    pub fn delete_uid(&mut self, uid: &str) -> UidMapResult<()> {
        match self.table.remove_uid(uid) {
            Some(_) => Ok(()),
            None => self.reject("delete_uid", UidMapError::UidNotFound(uid.to_owned())),
        }
    }

    /// Removes the association for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`UidMapError::KeyNotFound`] if `key` has no association.
    pub fn delete_uid_for(&mut self, key: &K) -> UidMapResult<()> {
        match self.table.remove(key) {
            Some(_) => Ok(()),
            None => self.reject("delete_uid_for", UidMapError::KeyNotFound),
        }
    }

    /// Removes every association. The generator's ledger is kept.
    pub fn delete_all(&mut self) {
        self.table.clear();
    }

    /// Returns the live association table.
    ///
    /// Changes made through this reference skip every check the manager performs: duplicate
    /// identifiers, invalid keys and the generator ledger are all ignored. Use the manager's own
    /// operations when those invariants matter.
    pub fn get_map(&mut self) -> &mut AssociationTable<K> {
        &mut self.table
    }

    /// Read-only view of the association table.
    pub fn map(&self) -> &AssociationTable<K> {
        &self.table
    }

    pub fn generator(&self) -> &UuidGenerator<R> {
        &self.generator
    }

    /// Captures the current associations with a timestamp.
    pub fn snapshot(&self) -> Snapshot<K> {
        Snapshot {
            exported_at: Utc::now(),
            entries: self
                .table
                .iter()
                .map(|(key, uid)| SnapshotEntry {
                    key: key.clone(),
                    uid: uid.clone(),
                })
                .collect(),
        }
    }

    /// Restores every association from `snapshot`. See [`restore`](Self::restore).
    pub fn restore_snapshot(&mut self, snapshot: Snapshot<K>) -> UidMapResult<()> {
        self.restore(
            snapshot
                .entries
                .into_iter()
                .map(|entry| (entry.key, entry.uid)),
        )
    }
}

impl<K: fmt::Debug, R: fmt::Debug> fmt::Debug for UidManager<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UidManager")
            .field("generator", &self.generator)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
