//! Keys that can be associated with identifiers.
//!
//! Any `Clone + PartialEq` type can be a key once it implements [`UidKey`]. The trait adds a
//! single validity predicate, checked before a key is stored: absent values (`None`) and
//! not-a-number floats are rejected, everything else is accepted by default.

use std::path::PathBuf;
use std::sync::Arc;
use uidmap_uuid::{Uid, Uuid};

/// A value that can be associated with an identifier.
pub trait UidKey: Clone + PartialEq {
    /// Returns false if this value must not be stored as a key.
    fn is_valid_key(&self) -> bool {
        true
    }
}

macro_rules! impl_uid_key {
    ($($ty:ty),* $(,)?) => {
        $(impl UidKey for $ty {})*
    };
}

impl_uid_key!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String, PathBuf,
    Uuid, Uid,
);

impl UidKey for &str {}

impl UidKey for f32 {
    fn is_valid_key(&self) -> bool {
        !self.is_nan()
    }
}

impl UidKey for f64 {
    fn is_valid_key(&self) -> bool {
        !self.is_nan()
    }
}

impl<T: UidKey> UidKey for Option<T> {
    fn is_valid_key(&self) -> bool {
        self.as_ref().is_some_and(T::is_valid_key)
    }
}

impl<T: UidKey> UidKey for Box<T> {
    fn is_valid_key(&self) -> bool {
        (**self).is_valid_key()
    }
}

impl<T: UidKey> UidKey for Arc<T> {
    fn is_valid_key(&self) -> bool {
        (**self).is_valid_key()
    }
}

impl<A: UidKey, B: UidKey> UidKey for (A, B) {
    fn is_valid_key(&self) -> bool {
        self.0.is_valid_key() && self.1.is_valid_key()
    }
}

/// A key compared by pointer identity instead of by value.
///
/// Two `IdentityKey`s are equal only if they were cloned from the same allocation, so equal
/// values wrapped separately are distinct keys.
#[derive(Debug)]
pub struct IdentityKey<T>(Arc<T>);

impl<T> IdentityKey<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn from_arc(value: Arc<T>) -> Self {
        Self(value)
    }

    pub fn get(&self) -> &T {
        &self.0
    }
}

impl<T> Clone for IdentityKey<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for IdentityKey<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for IdentityKey<T> {}

impl<T> UidKey for IdentityKey<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values_are_valid() {
        assert!("a".is_valid_key());
        assert!(String::new().is_valid_key());
        assert!(0i32.is_valid_key());
        assert!(false.is_valid_key());
    }

    #[test]
    fn test_nan_is_invalid() {
        assert!(!f64::NAN.is_valid_key());
        assert!(!f32::NAN.is_valid_key());
        assert!(1.5f64.is_valid_key());
        assert!(f64::INFINITY.is_valid_key());
    }

    #[test]
    fn test_none_is_invalid() {
        assert!(!None::<String>.is_valid_key());
        assert!(Some("k".to_string()).is_valid_key());
        assert!(!Some(f64::NAN).is_valid_key());
    }

    #[test]
    fn test_tuple_requires_both_valid() {
        assert!(("a", 1u8).is_valid_key());
        assert!(!("a", f32::NAN).is_valid_key());
    }

    #[test]
    fn test_identity_key_compares_by_pointer() {
        let a = IdentityKey::new("same".to_string());
        let b = IdentityKey::new("same".to_string());

        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.get(), b.get());
    }
}
