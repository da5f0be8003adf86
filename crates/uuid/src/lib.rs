//! Version-4 UUID generation and validation.
//!
//! uidmap hands out RFC 4122 version-4 identifiers and needs every identifier it stores to be
//! comparable byte-for-byte. To keep comparisons cheap and consistent, identifiers are held in a
//! *canonical* form: **36 lowercase characters, hyphenated** (`8-4-4-4-12`).
//!
//! This crate provides:
//! - A wrapper type ([`Uid`]) that *guarantees* the canonical version-4 format once constructed.
//! - A generator ([`UuidGenerator`]) that remembers what it has issued and never returns the same
//!   identifier twice.
//! - Pattern validation ([`is_valid`], [`validate`]) for externally supplied strings.
//! - Pluggable randomness ([`RandomSource`]), defaulting to the operating system's secure source.
//!
//! ## Accepted identifier form
//! - Five hex groups of lengths 8, 4, 4, 4 and 12, separated by `-`
//! - Third group starts with `4` (version)
//! - Fourth group starts with one of `8`, `9`, `a`, `b` (variant)
//! - Example: `aa97b177-9383-4934-8543-0f91a7a02836`
//!
//! Validation is case-insensitive. [`Uid::parse`] lowercases its input, so two identifiers that
//! differ only in case are the same [`Uid`].

mod generator;
mod pattern;
mod random;
mod uid;

// Re-export public types
pub use generator::UuidGenerator;
pub use pattern::{is_valid, validate, Candidates};
pub use random::{RandomSource, SystemRandom};
pub use uid::{Uid, Uuid};

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
