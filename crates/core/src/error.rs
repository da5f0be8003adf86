use uidmap_uuid::{Uid, UuidError};

#[derive(Debug, thiserror::Error)]
pub enum UidMapError {
    #[error("key is absent or not a number")]
    InvalidKey,
    #[error("invalid identifier: {0}")]
    InvalidUid(#[from] UuidError),
    #[error("identifier appears more than once in batch: {0}")]
    DuplicateUid(String),
    #[error("identifier already in use: {0}")]
    UidInUse(Uid),
    #[error("no key is associated with identifier: {0}")]
    UidNotFound(String),
    #[error("key has no associated identifier")]
    KeyNotFound,
    #[error("unexpected internal failure: {0}")]
    Internal(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read snapshot file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write snapshot file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize snapshot: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize snapshot: {0}")]
    Deserialization(serde_json::Error),
}

impl UidMapError {
    /// Returns true for rejections caused by the caller's input rather than by the environment
    /// or an internal fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            UidMapError::InvalidKey
                | UidMapError::InvalidUid(_)
                | UidMapError::DuplicateUid(_)
                | UidMapError::UidInUse(_)
                | UidMapError::UidNotFound(_)
                | UidMapError::KeyNotFound
        )
    }
}

pub type UidMapResult<T> = std::result::Result<T, UidMapError>;
