//! Deterministic partition routing.
//!
//! Routing is a pure function of a vote's letter field: equal inputs always
//! land on the same partition key, which is what makes parallel delivery to
//! different partitions safe. The set of valid keys — the key universe — is
//! injected at construction time and never rediscovered at runtime; a
//! letter outside it is a configuration/input error, not something to drop
//! silently.

use std::fmt;

use crate::constants::PARTITION_COUNT;
use crate::error::{Error, Result};
use crate::types::{PartitionKey, Vote};

/// The fixed, pre-declared set of valid partition keys.
///
/// Built once from configuration (normally the 26 lowercase letters) and
/// handed to the router and the store. Membership checks are a single array
/// index.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyUniverse {
    members: [bool; PARTITION_COUNT],
    len: usize,
}

impl KeyUniverse {
    /// The full universe: every lowercase ASCII letter.
    pub const fn lowercase() -> Self {
        KeyUniverse {
            members: [true; PARTITION_COUNT],
            len: PARTITION_COUNT,
        }
    }

    /// Build a universe from an explicit set of letters.
    ///
    /// Duplicates are collapsed. Fails with [`Error::InvalidKey`] on any
    /// letter outside `'a'..='z'` and [`Error::Config`] on an empty set —
    /// a pipeline with no partitions cannot route anything.
    pub fn from_letters<I>(letters: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let mut members = [false; PARTITION_COUNT];
        let mut len = 0;

        for letter in letters {
            let key = PartitionKey::try_from(letter)?;
            if !members[key.index()] {
                members[key.index()] = true;
                len += 1;
            }
        }

        if len == 0 {
            return Err(Error::Config(
                "partition key universe must not be empty".to_string(),
            ));
        }

        Ok(KeyUniverse { members, len })
    }

    /// Check whether a key belongs to this universe.
    #[inline]
    pub fn contains(&self, key: PartitionKey) -> bool {
        self.members[key.index()]
    }

    /// Number of keys in the universe.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate the member keys in letter order.
    pub fn keys(&self) -> impl Iterator<Item = PartitionKey> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| **member)
            .map(|(index, _)| PartitionKey::from_index(index))
    }
}

impl Default for KeyUniverse {
    fn default() -> Self {
        KeyUniverse::lowercase()
    }
}

impl fmt::Debug for KeyUniverse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: String = self.keys().map(PartitionKey::as_char).collect();
        f.debug_struct("KeyUniverse")
            .field("keys", &letters)
            .finish()
    }
}

/// Maps a decoded vote to its partition key.
#[derive(Clone, Debug)]
pub struct Router {
    universe: KeyUniverse,
}

impl Router {
    /// Create a router over the given key universe.
    pub fn new(universe: KeyUniverse) -> Self {
        Router { universe }
    }

    /// Route a vote to a partition key.
    ///
    /// Pure in `vote.letter`: repeated calls with equal input yield equal
    /// output. Fails with [`Error::InvalidKey`] if the letter is not a
    /// member of the configured universe.
    pub fn partition(&self, vote: &Vote) -> Result<PartitionKey> {
        let key = PartitionKey::new(vote.letter)?;
        if !self.universe.contains(key) {
            return Err(Error::InvalidKey(key.as_char().to_string()));
        }
        Ok(key)
    }

    pub fn universe(&self) -> &KeyUniverse {
        &self.universe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_universe_has_26_keys() {
        let universe = KeyUniverse::lowercase();
        assert_eq!(universe.len(), 26);
        assert!(!universe.is_empty());
        for letter in b'a'..=b'z' {
            assert!(universe.contains(PartitionKey::new(letter).unwrap()));
        }
    }

    #[test]
    fn test_universe_from_letters_subset() {
        let universe = KeyUniverse::from_letters(['a', 'b', 'c']).unwrap();
        assert_eq!(universe.len(), 3);
        assert!(universe.contains(PartitionKey::new(b'b').unwrap()));
        assert!(!universe.contains(PartitionKey::new(b'z').unwrap()));
    }

    #[test]
    fn test_universe_from_letters_collapses_duplicates() {
        let universe = KeyUniverse::from_letters(['a', 'a', 'a']).unwrap();
        assert_eq!(universe.len(), 1);
    }

    #[test]
    fn test_universe_rejects_invalid_letters() {
        assert!(matches!(
            KeyUniverse::from_letters(['a', 'B']),
            Err(Error::InvalidKey(_))
        ));
        assert!(KeyUniverse::from_letters(['3']).is_err());
    }

    #[test]
    fn test_universe_rejects_empty_set() {
        assert!(matches!(
            KeyUniverse::from_letters([]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_universe_keys_iterate_in_order() {
        let universe = KeyUniverse::from_letters(['c', 'a', 'b']).unwrap();
        let letters: Vec<char> = universe.keys().map(PartitionKey::as_char).collect();
        assert_eq!(letters, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_universe_debug_lists_keys() {
        let universe = KeyUniverse::from_letters(['x', 'y']).unwrap();
        let debug = format!("{:?}", universe);
        assert!(debug.contains("xy"));
    }

    #[test]
    fn test_partition_returns_leading_letter() {
        let router = Router::new(KeyUniverse::lowercase());
        let key = router.partition(&Vote::new(b'q', 7)).unwrap();
        assert_eq!(key.as_char(), 'q');
    }

    #[test]
    fn test_partition_is_deterministic() {
        let router = Router::new(KeyUniverse::lowercase());
        let vote = Vote::new(b'm', 3);
        let first = router.partition(&vote).unwrap();
        let second = router.partition(&vote).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_partition_ignores_count() {
        // Routing is a function of the letter field only
        let router = Router::new(KeyUniverse::lowercase());
        let low = router.partition(&Vote::new(b'f', 0)).unwrap();
        let high = router.partition(&Vote::new(b'f', u32::MAX)).unwrap();
        assert_eq!(low, high);
    }

    #[test]
    fn test_partition_rejects_letter_outside_alphabet() {
        let router = Router::new(KeyUniverse::lowercase());
        assert!(matches!(
            router.partition(&Vote::new(b'A', 1)),
            Err(Error::InvalidKey(_))
        ));
        assert!(router.partition(&Vote::new(0x00, 1)).is_err());
    }

    #[test]
    fn test_partition_rejects_letter_outside_configured_universe() {
        let universe = KeyUniverse::from_letters(['a', 'b']).unwrap();
        let router = Router::new(universe);
        let err = router.partition(&Vote::new(b'c', 1)).unwrap_err();
        assert_eq!(err, Error::InvalidKey("c".to_string()));
    }
}
