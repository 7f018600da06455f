// src/crypto.rs
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Secure entropy unavailable: {0}")]
    Entropy(#[from] rand::Error),

    #[error("Cannot draw from an empty range")]
    EmptyRange,

    #[error("Range of {0} exceeds the 63-bit random domain")]
    RangeTooLarge(usize),
}

pub type Result<T> = std::result::Result<T, CryptoError>;

/// Number of distinct values `next_i63` can produce (2^63).
const I63_SPAN: u64 = 1 << 63;

/// A source of uniformly distributed, cryptographically secure integers.
///
/// Implementations must be usable from many threads at once without external
/// locking. There is no seeding: every value comes from fresh entropy.
pub trait SecureRandom: Send + Sync {
    /// Returns a non-negative integer uniform over `[0, 2^63)`.
    fn next_i63(&self) -> Result<i64>;
}

/// Reads straight from the operating system CSPRNG.
///
/// Stateless, so a single value can be shared freely across workers.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn next_i63(&self) -> Result<i64> {
        let mut bytes = [0u8; 8];
        // A failed read is surfaced, never papered over with a weaker source.
        OsRng.try_fill_bytes(&mut bytes)?;
        let value = u64::from_le_bytes(bytes) & (I63_SPAN - 1);
        Ok(value as i64)
    }
}

impl<R: SecureRandom + ?Sized> SecureRandom for &R {
    fn next_i63(&self) -> Result<i64> {
        (**self).next_i63()
    }
}

impl<R: SecureRandom + ?Sized> SecureRandom for Arc<R> {
    fn next_i63(&self) -> Result<i64> {
        (**self).next_i63()
    }
}

/// Draw an index uniformly from `[0, n)`.
///
/// Rejection sampling over the 63-bit domain: draws above the largest multiple
/// of `n` are discarded so the modulo cannot favour low residues.
pub fn uniform_index<R: SecureRandom + ?Sized>(rng: &R, n: usize) -> Result<usize> {
    match n {
        0 => return Err(CryptoError::EmptyRange),
        1 => return Ok(0),
        _ => {}
    }
    let n64 = n as u64;
    if n64 > I63_SPAN {
        return Err(CryptoError::RangeTooLarge(n));
    }

    if n64.is_power_of_two() {
        let v = rng.next_i63()? as u64;
        return Ok((v & (n64 - 1)) as usize);
    }

    let max = (I63_SPAN - 1) - (I63_SPAN % n64);
    let mut v = rng.next_i63()? as u64;
    while v > max {
        v = rng.next_i63()? as u64;
    }
    Ok((v % n64) as usize)
}

/// Uniformly random permutation of `[0, n)` (inside-out Fisher–Yates).
pub fn uniform_permutation<R: SecureRandom + ?Sized>(rng: &R, n: usize) -> Result<Vec<usize>> {
    let mut perm = vec![0usize; n];
    for i in 0..n {
        let j = uniform_index(rng, i + 1)?;
        perm[i] = perm[j];
        perm[j] = i;
    }
    Ok(perm)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Replays a fixed script of draws, then fails once it runs dry.
    pub(crate) struct ScriptedRandom(Mutex<VecDeque<i64>>);

    impl ScriptedRandom {
        pub(crate) fn new(values: &[i64]) -> Self {
            ScriptedRandom(Mutex::new(values.iter().copied().collect()))
        }
    }

    impl SecureRandom for ScriptedRandom {
        fn next_i63(&self) -> Result<i64> {
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| CryptoError::Entropy(entropy_error()))
        }
    }

    /// Always fails, like an exhausted or unreadable entropy device.
    #[derive(Clone, Copy)]
    pub(crate) struct FailingRandom;

    impl SecureRandom for FailingRandom {
        fn next_i63(&self) -> Result<i64> {
            Err(CryptoError::Entropy(entropy_error()))
        }
    }

    pub(crate) fn entropy_error() -> rand::Error {
        rand::Error::new(std::io::Error::new(
            std::io::ErrorKind::Other,
            "entropy source unavailable",
        ))
    }

    #[test]
    fn os_random_is_non_negative() {
        for _ in 0..1000 {
            assert!(OsRandom.next_i63().unwrap() >= 0);
        }
    }

    #[test]
    fn os_random_does_not_repeat() {
        let a = OsRandom.next_i63().unwrap();
        let b = OsRandom.next_i63().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn uniform_index_stays_in_range() {
        for n in 1..50 {
            for _ in 0..100 {
                assert!(uniform_index(&OsRandom, n).unwrap() < n);
            }
        }
    }

    #[test]
    fn uniform_index_of_one_is_zero() {
        assert_eq!(uniform_index(&OsRandom, 1).unwrap(), 0);
    }

    #[test]
    fn uniform_index_of_one_draws_nothing() {
        assert_eq!(uniform_index(&FailingRandom, 1).unwrap(), 0);
        assert_eq!(uniform_permutation(&FailingRandom, 1).unwrap(), vec![0]);

        // A two element shuffle costs exactly one draw.
        let rng = ScriptedRandom::new(&[1]);
        assert_eq!(uniform_permutation(&rng, 2).unwrap(), vec![0, 1]);
        assert!(rng.next_i63().is_err());
    }

    #[test]
    fn uniform_index_rejects_empty_range() {
        assert!(matches!(
            uniform_index(&OsRandom, 0),
            Err(CryptoError::EmptyRange)
        ));
    }

    #[test]
    fn uniform_index_redraws_above_largest_multiple() {
        // For n = 3 the two highest 63-bit values fall in the partial bucket.
        let rng = ScriptedRandom::new(&[i64::MAX, i64::MAX - 1, 7]);
        assert_eq!(uniform_index(&rng, 3).unwrap(), 1);
    }

    #[test]
    fn uniform_index_masks_powers_of_two() {
        let rng = ScriptedRandom::new(&[5]);
        assert_eq!(uniform_index(&rng, 2).unwrap(), 1);
    }

    #[test]
    fn uniform_index_propagates_entropy_failure() {
        assert!(matches!(
            uniform_index(&FailingRandom, 10),
            Err(CryptoError::Entropy(_))
        ));
    }

    #[test]
    fn permutation_contains_every_index_once() {
        for n in 0..40 {
            let mut perm = uniform_permutation(&OsRandom, n).unwrap();
            perm.sort_unstable();
            assert_eq!(perm, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn permutation_orderings_are_equally_likely() {
        const TRIALS: usize = 60_000;
        let mut seen: HashMap<Vec<usize>, usize> = HashMap::new();
        for _ in 0..TRIALS {
            *seen.entry(uniform_permutation(&OsRandom, 3).unwrap()).or_default() += 1;
        }

        assert_eq!(seen.len(), 6);
        let expected = TRIALS / 6;
        for (perm, count) in &seen {
            let deviation = (*count as i64 - expected as i64).abs();
            assert!(
                deviation < 600,
                "ordering {:?} seen {} times, expected about {}",
                perm,
                count,
                expected
            );
        }
    }

    #[test]
    fn permutation_propagates_entropy_failure() {
        assert!(uniform_permutation(&FailingRandom, 4).is_err());
        // An empty permutation needs no entropy at all.
        assert!(uniform_permutation(&FailingRandom, 0).unwrap().is_empty());
    }

    #[test]
    fn shared_source_works_through_arc() {
        let rng: Arc<dyn SecureRandom> = Arc::new(OsRandom);
        assert!(uniform_index(&rng, 10).unwrap() < 10);
    }
}
