//! Collision-checked identifier generation.
//!
//! A [`UuidGenerator`] keeps a ledger of every identifier it has issued (or been told about via
//! [`UuidGenerator::set_existing`]) and will not hand out an identifier already in that ledger.
//! With 122 random bits a repeat is astronomically unlikely, but it is still checked.

use crate::pattern::Candidates;
use crate::random::{RandomSource, SystemRandom};
use crate::uid::Uid;
use crate::UuidResult;
use indexmap::IndexSet;

/// Generates version-4 identifiers that are unique within this instance.
///
/// The ledger preserves issue order. It can be exported with [`get_existing`](Self::get_existing)
/// and loaded back with [`set_existing`](Self::set_existing) to resume across restarts.
#[derive(Debug)]
pub struct UuidGenerator<R = SystemRandom> {
    source: R,
    existing: IndexSet<Uid>,
}

impl UuidGenerator<SystemRandom> {
    /// Creates a generator with an empty ledger, backed by [`SystemRandom`].
    pub fn new() -> Self {
        Self::with_source(SystemRandom::new())
    }

    /// Creates a generator whose ledger is seeded with `candidates`.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`](crate::UuidError::InvalidInput) if any candidate is not
    /// a version-4 UUID.
    pub fn with_existing<I, S>(candidates: I) -> UuidResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut generator = Self::new();
        generator.set_existing(candidates)?;
        Ok(generator)
    }
}

impl Default for UuidGenerator<SystemRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> UuidGenerator<R> {
    /// Creates a generator with an empty ledger that draws from `source`.
    pub fn with_source(source: R) -> Self {
        Self {
            source,
            existing: IndexSet::new(),
        }
    }

    /// Generates a new identifier not yet present in the ledger and records it.
    pub fn generate(&mut self) -> Uid {
        loop {
            let candidate = Uid::from_random_bytes(self.random_bytes());
            if self.existing.insert(candidate.clone()) {
                return candidate;
            }
            tracing::debug!(uid = %candidate, "generated identifier already issued, retrying");
        }
    }

    fn random_bytes(&mut self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        for chunk in bytes.chunks_exact_mut(4) {
            chunk.copy_from_slice(&self.source.next_u32().to_be_bytes());
        }
        bytes
    }

    /// Returns a copy of the ledger in issue order.
    pub fn get_existing(&self) -> Vec<Uid> {
        self.existing.iter().cloned().collect()
    }

    /// Returns true if `uid` is in the ledger.
    pub fn contains(&self, uid: &Uid) -> bool {
        self.existing.contains(uid)
    }

    pub fn len(&self) -> usize {
        self.existing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.existing.is_empty()
    }

    /// Replaces the ledger with `candidates`, lowercased.
    ///
    /// This is all-or-nothing: if any candidate fails validation the ledger is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`](crate::UuidError::InvalidInput) for the first
    /// candidate that is not a version-4 UUID.
    pub fn set_existing<I, S>(&mut self, candidates: I) -> UuidResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let validated = candidates
            .into_iter()
            .map(|candidate| Uid::parse(candidate.as_ref()))
            .collect::<UuidResult<IndexSet<_>>>()?;
        self.existing = validated;
        Ok(())
    }

    /// Filters `input` down to version-4 candidates. See [`validate`](crate::validate).
    pub fn validate<'a>(&self, input: impl Into<Candidates<'a>>) -> Vec<String> {
        crate::pattern::validate(input)
    }
}
