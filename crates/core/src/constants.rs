//! Constants used throughout the uidmap core crate.

/// Filename used for the snapshot store when no path is configured.
pub const DEFAULT_STORE_FILENAME: &str = "uidmap.json";

/// Environment variable naming the snapshot store path.
pub const STORE_ENV_VAR: &str = "UIDMAP_STORE";
