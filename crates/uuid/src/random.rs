//! Sources of randomness for identifier generation.

use chrono::Utc;
use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

/// Supplies the 32-bit random words an identifier is built from.
///
/// Closures of type `FnMut() -> u32` implement this trait, which makes deterministic sources
/// easy to plug in.
pub trait RandomSource {
    /// Returns the next uniformly distributed 32-bit value.
    fn next_u32(&mut self) -> u32;
}

impl<F> RandomSource for F
where
    F: FnMut() -> u32,
{
    fn next_u32(&mut self) -> u32 {
        self()
    }
}

/// Default random source.
///
/// Reads from the operating system's cryptographically secure generator. If that ever fails,
/// the failure is logged once and this source switches permanently to a pseudo-random
/// generator seeded from the clock and process id.
#[derive(Debug)]
pub struct SystemRandom<P = OsRng> {
    primary: P,
    fallback: Option<StdRng>,
}

impl SystemRandom {
    pub fn new() -> Self {
        Self::with_primary(OsRng)
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: RngCore> SystemRandom<P> {
    /// Uses `primary` as the secure source in place of `OsRng`.
    pub(crate) fn with_primary(primary: P) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Returns true once the secure source has failed and the fallback is in use.
    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }

    fn fallback_rng() -> StdRng {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
        let pid = u64::from(std::process::id());
        StdRng::seed_from_u64(nanos ^ pid.rotate_left(32))
    }
}

impl<P: RngCore> RandomSource for SystemRandom<P> {
    fn next_u32(&mut self) -> u32 {
        if let Some(rng) = self.fallback.as_mut() {
            return rng.next_u32();
        }

        let mut buf = [0u8; 4];
        match self.primary.try_fill_bytes(&mut buf) {
            Ok(()) => u32::from_be_bytes(buf),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "secure random source unavailable, falling back to pseudo-random generator"
                );
                self.fallback.insert(Self::fallback_rng()).next_u32()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_random_is_not_degraded_by_default() {
        let mut source = SystemRandom::new();
        let _ = source.next_u32();
        assert!(!source.is_degraded());
    }

    #[test]
    fn test_system_random_varies() {
        let mut source = SystemRandom::new();
        let words: Vec<u32> = (0..8).map(|_| source.next_u32()).collect();

        // Eight identical 32-bit draws from a working source will not happen
        assert!(words.iter().any(|w| *w != words[0]));
    }

    #[test]
    fn test_closure_source() {
        let mut next = 0u32;
        let mut source = move || {
            next += 1;
            next
        };
        assert_eq!(RandomSource::next_u32(&mut source), 1);
        assert_eq!(RandomSource::next_u32(&mut source), 2);
    }

    /// Secure source that always fails and counts how often it was asked.
    #[derive(Debug, Default)]
    struct FailingRng {
        attempts: usize,
    }

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            panic!("FailingRng only supports try_fill_bytes")
        }

        fn next_u64(&mut self) -> u64 {
            panic!("FailingRng only supports try_fill_bytes")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("FailingRng only supports try_fill_bytes")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            self.attempts += 1;
            Err(rand::Error::new("entropy source unavailable"))
        }
    }

    #[test]
    fn test_failing_primary_switches_to_fallback() {
        let mut source = SystemRandom::with_primary(FailingRng::default());
        assert!(!source.is_degraded());

        let words: Vec<u32> = (0..8).map(|_| source.next_u32()).collect();

        assert!(source.is_degraded());
        assert!(words.iter().any(|w| *w != words[0]));

        // The broken source is tried once, then never again
        assert_eq!(source.primary.attempts, 1);
    }

    #[test]
    fn test_working_primary_is_used_directly() {
        let mut source = SystemRandom::with_primary(StdRng::seed_from_u64(7));
        let mut expected = StdRng::seed_from_u64(7);

        let mut buf = [0u8; 4];
        expected.fill_bytes(&mut buf);

        assert_eq!(source.next_u32(), u32::from_be_bytes(buf));
        assert!(!source.is_degraded());
    }

    #[test]
    fn test_fallback_rng_produces_values() {
        let mut rng = SystemRandom::<OsRng>::fallback_rng();
        let words: Vec<u32> = (0..8).map(|_| rng.next_u32()).collect();
        assert!(words.iter().any(|w| *w != words[0]));
    }
}
