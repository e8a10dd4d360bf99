//! Word-sense cooccurrence statistics from a tagged corpus
//!
//! Sentences are read from tab separated `word lemma tag` files, verbs and nouns are
//! counted pairwise within each sentence, and the counts are merged into a SQLite database of
//! word-senses and word pairs. The binaries in `src/bin` are thin wrappers around this.


#[macro_use] extern crate log;
#[macro_use] extern crate rusqlite;
extern crate farmhash;
extern crate uuid;
pub mod errors;
pub mod farm;
pub mod tagged;
pub mod classify;
pub mod registry;
pub mod cooccur;
pub mod store;
pub mod corpus;
pub mod config;
pub mod ingest;
