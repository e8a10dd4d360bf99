//! Faster (but not DoS-resistant) hashmap
use farmhash;
use std::collections::HashMap;
use std::hash::{Hash, Hasher, BuildHasherDefault};

/// Chain farmhash over every write
///
/// Farmhash isn't a streaming hash, so each write is hashed on its own and seeded with the
/// previous state. Composite keys (a lemma plus its category, or a pair of identifiers) write
/// several times, and all of them have to count.
pub struct FarmHasher(u64);

impl Default for FarmHasher {
    #[inline]
    fn default() -> FarmHasher { FarmHasher(0) }
}

impl Hasher for FarmHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = farmhash::hash64_with_seed(bytes, self.0);
    }
}

pub type Farm = BuildHasherDefault<FarmHasher>;
pub type FarmMap<X, Y> = HashMap<X, Y, Farm>;

pub fn new_farm<X: Hash+Eq, Y>() -> FarmMap<X, Y> {
    Default::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = FarmHasher::default();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn every_field_of_a_key_counts() {
        // str hashing ends with the same terminator byte; the lemma must still matter
        assert_ne!(hash_of(&("love", 1u8)), hash_of(&("cat", 1u8)));
        assert_ne!(hash_of(&("love", 1u8)), hash_of(&("love", 2u8)));
    }

    #[test]
    fn farm_map_behaves_like_a_map() {
        let mut map: FarmMap<String, usize> = new_farm();
        *map.entry("a".to_string()).or_insert(0) += 1;
        *map.entry("a".to_string()).or_insert(0) += 1;
        assert_eq!(map["a"], 2);
    }
}
