//! Per-record obfuscation keys.
//!
//! Each record carries one key byte in `1..=255`. Every other byte of the
//! record is XORed with it, so applying the same key twice restores the
//! original bytes. This hides content from casual inspection only; it is not
//! encryption.

use std::num::NonZeroU8;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::PackError;
use crate::Result;

/// A non-zero obfuscation key.
///
/// Zero is unrepresentable: XOR with zero leaves a record in plain text.
///
/// # Examples
///
/// ```
/// use xorpack_core::format::Key;
///
/// let key = Key::new(0x5A).unwrap();
/// let mut bytes = *b"hello";
/// key.apply(&mut bytes);
/// assert_ne!(&bytes, b"hello");
/// key.apply(&mut bytes);
/// assert_eq!(&bytes, b"hello");
///
/// assert!(Key::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(NonZeroU8);

impl Key {
    /// Creates a key, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        match NonZeroU8::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns the raw key byte.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Obfuscates or de-obfuscates `bytes` in place.
    #[inline]
    pub fn apply(self, bytes: &mut [u8]) {
        let k = self.get();
        for b in bytes {
            *b ^= k;
        }
    }

    /// Returns an obfuscated copy of a fixed-size field.
    #[inline]
    #[must_use]
    pub fn applied<const N: usize>(self, mut bytes: [u8; N]) -> [u8; N] {
        self.apply(&mut bytes);
        bytes
    }
}

impl From<Key> for u8 {
    fn from(key: Key) -> Self {
        key.get()
    }
}

/// Supplies a fresh key for every record the encoder writes.
///
/// The encoder never reaches for process-wide random state; callers pass a
/// source explicitly, so tests can substitute a fixed sequence.
pub trait KeySource {
    /// Returns the key for the next record.
    fn next_key(&mut self) -> Key;
}

impl<T: KeySource + ?Sized> KeySource for &mut T {
    fn next_key(&mut self) -> Key {
        (**self).next_key()
    }
}

/// Draws keys uniformly from `1..=255`.
#[derive(Debug, Clone)]
pub struct RandomKeySource {
    rng: StdRng,
}

impl RandomKeySource {
    /// Creates a source seeded from the operating system's entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a deterministic source; the same seed yields the same keys.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomKeySource {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for RandomKeySource {
    fn next_key(&mut self) -> Key {
        let value: u8 = self.rng.gen_range(1..=u8::MAX);
        Key::new(value).unwrap_or(Key(NonZeroU8::MIN))
    }
}

/// Hands out a fixed list of keys in order, cycling when exhausted.
///
/// # Examples
///
/// ```
/// use xorpack_core::format::{KeySource, SequenceKeySource};
///
/// let mut keys = SequenceKeySource::new([7, 9])?;
/// assert_eq!(keys.next_key().get(), 7);
/// assert_eq!(keys.next_key().get(), 9);
/// assert_eq!(keys.next_key().get(), 7);
/// # Ok::<(), xorpack_core::PackError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SequenceKeySource {
    keys: Vec<Key>,
    position: usize,
}

impl SequenceKeySource {
    /// Creates a source from raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns `PackError::InvalidConfiguration` if the list is empty or
    /// contains a zero.
    pub fn new<I: IntoIterator<Item = u8>>(keys: I) -> Result<Self> {
        let keys = keys
            .into_iter()
            .map(|k| {
                Key::new(k).ok_or_else(|| PackError::InvalidConfiguration {
                    reason: "obfuscation key must be in 1..=255".to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if keys.is_empty() {
            return Err(PackError::InvalidConfiguration {
                reason: "key sequence is empty".to_string(),
            });
        }

        Ok(Self { keys, position: 0 })
    }

    /// Creates a source that always returns `key`.
    #[must_use]
    pub fn constant(key: Key) -> Self {
        Self {
            keys: vec![key],
            position: 0,
        }
    }
}

impl KeySource for SequenceKeySource {
    fn next_key(&mut self) -> Key {
        let key = self.keys[self.position % self.keys.len()];
        self.position = self.position.wrapping_add(1);
        key
    }
}
