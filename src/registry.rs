//! Stable identifiers for word-senses
//!
//! A word-sense is a lemma together with its category, so "love" the verb and "love" the noun
//! get different identifiers. Identifiers are random UUIDs, never derived from the lemma, and
//! are handed out once per word-sense for the life of the registry.
use std::fmt;
use std::slice;
use std::sync::Arc;
use uuid::Uuid;
use classify::Category;
use farm::{FarmMap, new_farm};

/// Lemma plus category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordSense {
    pub lemma: String,
    pub category: Category,
}

impl WordSense {
    pub fn new(lemma: &str, category: Category) -> WordSense {
        WordSense { lemma: lemma.to_string(), category: category }
    }
}

/// Opaque identifier of a word-sense
///
/// Cheap to clone, because every pair key holds two of them. Ordered by its text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SenseId(Arc<str>);

impl SenseId {
    /// A fresh random identifier
    pub fn generate() -> SenseId {
        SenseId::from(Uuid::new_v4().to_string().as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'a> From<&'a str> for SenseId {
    fn from(id: &'a str) -> SenseId {
        SenseId(Arc::from(id))
    }
}

impl fmt::Display for SenseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append-only map from word-sense to identifier
#[derive(Debug)]
pub struct Registry {
    /// In order of first sighting
    entries: Vec<(WordSense, SenseId)>,
    index: FarmMap<WordSense, usize>,
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            entries: Vec::new(),
            index: new_farm(),
        }
    }

    /// The identifier of a word-sense, making one up the first time we see it
    pub fn get_or_create(&mut self, lemma: &str, category: Category) -> SenseId {
        let sense = WordSense::new(lemma, category);
        if let Some(&i) = self.index.get(&sense) {
            return self.entries[i].1.clone();
        }
        let id = SenseId::generate();
        self.push(sense, id.clone());
        id
    }

    /// Adopt an identifier that was already persisted
    ///
    /// Returns false (and keeps the existing identifier) if the word-sense is already known.
    pub fn seed(&mut self, lemma: &str, category: Category, id: SenseId) -> bool {
        let sense = WordSense::new(lemma, category);
        if self.index.contains_key(&sense) {
            return false;
        }
        self.push(sense, id);
        true
    }

    fn push(&mut self, sense: WordSense, id: SenseId) {
        self.index.insert(sense.clone(), self.entries.len());
        self.entries.push((sense, id));
    }

    pub fn get(&self, lemma: &str, category: Category) -> Option<&SenseId> {
        self.index.get(&WordSense::new(lemma, category))
            .map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, (WordSense, SenseId)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_sense_same_id() {
        let mut reg = Registry::new();
        let first = reg.get_or_create("love", Category::Verb);
        for _ in 0..5 {
            assert_eq!(reg.get_or_create("love", Category::Verb), first);
        }
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn category_splits_senses() {
        let mut reg = Registry::new();
        let verb = reg.get_or_create("love", Category::Verb);
        let noun = reg.get_or_create("love", Category::Noun);
        let name = reg.get_or_create("love", Category::NounPhrase);
        assert_ne!(verb, noun);
        assert_ne!(noun, name);
        assert_ne!(verb, name);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn ids_look_like_uuids() {
        let id = SenseId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_eq!(id.as_str(), id.as_str().to_lowercase());
    }

    #[test]
    fn seeded_ids_are_reused_not_replaced() {
        let mut reg = Registry::new();
        assert!(reg.seed("cat", Category::Noun, SenseId::from("persisted-cat")));
        assert!(!reg.seed("cat", Category::Noun, SenseId::from("other")));
        assert_eq!(reg.get_or_create("cat", Category::Noun).as_str(), "persisted-cat");
        assert_eq!(reg.get("cat", Category::Verb), None);
    }

    #[test]
    fn iteration_follows_first_sighting() {
        let mut reg = Registry::new();
        reg.get_or_create("b", Category::Noun);
        reg.get_or_create("a", Category::Verb);
        reg.get_or_create("b", Category::Noun);
        let lemmas: Vec<&str> = reg.iter().map(|&(ref s, _)| s.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["b", "a"]);
    }
}
