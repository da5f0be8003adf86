//! # uidmap Core
//!
//! Associates application keys with version-4 identifiers.
//!
//! This crate contains:
//! - [`UidManager`]: a bidirectional key ↔ identifier map backed by a collision-checked
//!   [`UuidGenerator`](uidmap_uuid::UuidGenerator)
//! - Key validity rules ([`UidKey`]) and pointer-identity keys ([`IdentityKey`])
//! - Pluggable rejection reporting ([`DiagnosticSink`])
//! - JSON snapshot helpers for callers that want to persist associations
//!
//! **No storage of its own**: the manager lives in memory. Persisting it is the caller's job,
//! using [`UidManager::entries`] / [`UidManager::restore`] or the [`snapshot`] helpers.

pub mod config;
pub mod constants;
pub mod diagnostics;
mod error;
pub mod key;
mod manager;
pub mod snapshot;
pub mod table;

pub use config::{resolve_store_path, CoreConfig};
pub use diagnostics::{DiagnosticSink, SilentSink, TracingSink};
pub use error::{UidMapError, UidMapResult};
pub use key::{IdentityKey, UidKey};
pub use manager::UidManager;
pub use snapshot::{load_snapshot, save_snapshot, Snapshot, SnapshotEntry};
pub use table::AssociationTable;

pub use uidmap_uuid::{Uid, UuidError, UuidGenerator};
