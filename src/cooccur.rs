//! Sentence-level cooccurrence counting
//!
//! Within a sentence every verb pairs with every later verb, every noun with every later noun,
//! and every verb with every noun (in either order). Names are registered but never paired.
//! Counts are kept per unordered pair of word-sense identifiers.
use std::collections::hash_map;
use std::fmt;
use classify::{classify, Category};
use farm::{FarmMap, new_farm};
use registry::{Registry, SenseId};
use tagged::Sentence;

/// Unordered pair of identifiers, stored smallest first
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey(SenseId, SenseId);

impl PairKey {
    pub fn new(a: SenseId, b: SenseId) -> PairKey {
        if b < a { PairKey(b, a) } else { PairKey(a, b) }
    }

    pub fn first(&self) -> &SenseId { &self.0 }
    pub fn second(&self) -> &SenseId { &self.1 }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// Which of the three tables a pair lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKind {
    VerbVerb,
    VerbNoun,
    NounNoun,
}

impl PairKind {
    /// Flush order
    pub const ALL: [PairKind; 3] = [PairKind::VerbVerb, PairKind::VerbNoun, PairKind::NounNoun];

    pub fn label(&self) -> &'static str {
        match *self {
            PairKind::VerbVerb => "verbs_pairs",
            PairKind::VerbNoun => "verb_nouns_pairs",
            PairKind::NounNoun => "nouns_pairs",
        }
    }
}

/// Running counts for one kind of pair
#[derive(Debug)]
pub struct PairTable {
    counts: FarmMap<PairKey, u64>,
}

impl Default for PairTable {
    fn default() -> Self {
        PairTable { counts: new_farm() }
    }
}

impl PairTable {
    pub fn increment(&mut self, a: &SenseId, b: &SenseId) {
        *self.counts.entry(PairKey::new(a.clone(), b.clone())).or_insert(0) += 1;
    }

    /// Count for a pair, in either order
    pub fn get(&self, a: &SenseId, b: &SenseId) -> u64 {
        self.counts.get(&PairKey::new(a.clone(), b.clone())).cloned().unwrap_or(0)
    }

    pub fn len(&self) -> usize { self.counts.len() }
    pub fn is_empty(&self) -> bool { self.counts.is_empty() }
    pub fn clear(&mut self) { self.counts.clear() }

    pub fn iter(&self) -> hash_map::Iter<'_, PairKey, u64> {
        self.counts.iter()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// The three tables, filled one sentence at a time
#[derive(Debug, Default)]
pub struct Cooccurrences {
    pub verb_verb: PairTable,
    pub verb_noun: PairTable,
    pub noun_noun: PairTable,
}

impl Cooccurrences {
    pub fn table(&self, kind: PairKind) -> &PairTable {
        match kind {
            PairKind::VerbVerb => &self.verb_verb,
            PairKind::VerbNoun => &self.verb_noun,
            PairKind::NounNoun => &self.noun_noun,
        }
    }

    /// Count the pairs among one sentence's verbs and nouns, both in sentence order
    pub fn accumulate(&mut self, verbs: &[SenseId], nouns: &[SenseId]) {
        for (i, a) in verbs.iter().enumerate() {
            for b in &verbs[i + 1..] {
                self.verb_verb.increment(a, b);
            }
        }
        // Cross category is the full product, not just later positions
        for v in verbs {
            for n in nouns {
                self.verb_noun.increment(v, n);
            }
        }
        for (i, a) in nouns.iter().enumerate() {
            for b in &nouns[i + 1..] {
                self.noun_noun.increment(a, b);
            }
        }
    }

    pub fn clear(&mut self) {
        self.verb_verb.clear();
        self.verb_noun.clear();
        self.noun_noun.clear();
    }

    pub fn len(&self) -> usize {
        self.verb_verb.len() + self.verb_noun.len() + self.noun_noun.len()
    }
}

/// Progress counters for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub files: usize,
    pub sentences: u64,
    pub tokens: u64,
    pub verbs: u64,
    pub nouns: u64,
    pub names: u64,
    pub discarded: u64,
}

/// Everything a corpus run accumulates
///
/// Pass it by `&mut` through the pipeline; two contexts never share state.
#[derive(Debug, Default)]
pub struct CorpusContext {
    pub registry: Registry,
    pub pairs: Cooccurrences,
    pub stats: RunStats,
}

impl CorpusContext {
    pub fn new() -> Self {
        CorpusContext::default()
    }

    /// Start from a registry that already holds persisted identifiers
    pub fn with_registry(registry: Registry) -> Self {
        CorpusContext { registry: registry, ..CorpusContext::default() }
    }

    /// Classify, register and count one sentence
    pub fn process_sentence(&mut self, sentence: &Sentence) {
        let mut verbs = Vec::new();
        let mut nouns = Vec::new();
        for token in sentence {
            self.stats.tokens += 1;
            match classify(&token.lemma, &token.tag) {
                Some(Category::Verb) => {
                    self.stats.verbs += 1;
                    verbs.push(self.registry.get_or_create(&token.lemma, Category::Verb));
                }
                Some(Category::Noun) => {
                    self.stats.nouns += 1;
                    nouns.push(self.registry.get_or_create(&token.lemma, Category::Noun));
                }
                Some(Category::NounPhrase) => {
                    self.stats.names += 1;
                    self.registry.get_or_create(&token.lemma, Category::NounPhrase);
                }
                None => self.stats.discarded += 1,
            }
        }
        self.pairs.accumulate(&verbs, &nouns);
        self.stats.sentences += 1;
    }

    /// Feed every sentence of one file
    pub fn process_sentences<I: IntoIterator<Item = Sentence>>(&mut self, sentences: I) {
        for sentence in sentences {
            self.process_sentence(&sentence);
        }
        self.stats.files += 1;
    }
}
