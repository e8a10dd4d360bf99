//! Merge a run's vocabulary and pair counts into durable storage
//!
//! Storage only has to honor the small `Store` contract: upsert a word, read a pair's count,
//! insert a pair, bump a pair. The merge is read-then-write because what happens to an existing
//! row depends on the `MergePolicy`.
//!
//! Every table is flushed in its own transaction. A record that fails is logged and skipped,
//! the rest of the batch still goes in.
use std::path::Path;
use std::str::FromStr;
use rusqlite::{Connection, OptionalExtension};
use classify::Category;
use cooccur::{CorpusContext, PairKind, PairTable};
use errors::*;
use farm::{FarmMap, new_farm};
use registry::Registry;

/// What to do with a pair that is already persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Add this run's count to the stored one
    Add,
    /// Add 1 no matter how often the pair was seen in this run (the legacy behavior)
    One,
}

impl Default for MergePolicy {
    fn default() -> Self { MergePolicy::Add }
}

impl MergePolicy {
    /// How much to add to a stored count, given this run's count
    pub fn delta(&self, batch_count: u64) -> u64 {
        match *self {
            MergePolicy::Add => batch_count,
            MergePolicy::One => 1,
        }
    }
}

impl FromStr for MergePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<MergePolicy> {
        match s {
            "add" => Ok(MergePolicy::Add),
            "one" => Ok(MergePolicy::One),
            _ => Err(Error::Other(format!("Unknown merge policy {:?}; use add or one", s))),
        }
    }
}

/// One persisted vocabulary row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRow {
    pub id: String,
    pub lemma: String,
    pub category: String,
}

/// The read/write contract the flush relies on
pub trait Store {
    fn begin(&mut self) -> Result<()>;
    fn commit(&mut self) -> Result<()>;
    fn upsert_word(&mut self, id: &str, lemma: &str, category: &str) -> Result<()>;
    fn pair_count(&mut self, a: &str, b: &str) -> Result<Option<u64>>;
    fn insert_pair(&mut self, a: &str, b: &str, count: u64) -> Result<()>;
    fn increment_pair(&mut self, a: &str, b: &str, delta: u64) -> Result<()>;
    fn load_words(&mut self) -> Result<Vec<WordRow>>;
}

/// How a flush went
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FlushReport {
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
}

impl FlushReport {
    pub fn absorb(&mut self, other: FlushReport) {
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.failed += other.failed;
    }
}

/// Upsert every word-sense of the registry
pub fn flush_vocabulary<S: Store + ?Sized>(store: &mut S, registry: &Registry) -> Result<FlushReport> {
    info!("Process of inserting {} Dictionary values to DB started", registry.len());
    let mut report = FlushReport::default();
    store.begin()?;
    for &(ref sense, ref id) in registry.iter() {
        match store.upsert_word(id.as_str(), &sense.lemma, sense.category.as_str()) {
            Ok(()) => report.inserted += 1,
            Err(err) => {
                error!("Could not store the word {}, {} ({}): {}", sense.lemma, sense.category, id, err);
                report.failed += 1;
            }
        }
    }
    store.commit()?;
    info!("Insert in dictionary completed");
    Ok(report)
}

/// Merge one pair table
pub fn flush_pairs<S: Store + ?Sized>(store: &mut S, kind: PairKind, table: &PairTable,
                                      policy: MergePolicy) -> Result<FlushReport> {
    info!("Process of inserting {} {} values to DB started", table.len(), kind.label());
    let mut report = FlushReport::default();
    store.begin()?;
    for (key, &count) in table.iter() {
        let (a, b) = (key.first().as_str(), key.second().as_str());
        let merged = store.pair_count(a, b).and_then(|stored| match stored {
            Some(_) => store.increment_pair(a, b, policy.delta(count)).map(|()| false),
            None => store.insert_pair(a, b, count).map(|()| true),
        });
        match merged {
            Ok(true) => report.inserted += 1,
            Ok(false) => report.updated += 1,
            Err(err) => {
                error!("An error occurred at {} for {} with count {}: {}",
                    kind.label(), key, count, err);
                report.failed += 1;
            }
        }
    }
    store.commit()?;
    info!("Process of inserting the {} values to DB completed", kind.label());
    Ok(report)
}

/// Vocabulary first, then the pair tables in their fixed order
pub fn flush_all<S: Store + ?Sized>(store: &mut S, context: &CorpusContext,
                                    policy: MergePolicy) -> Result<FlushReport> {
    let mut report = flush_vocabulary(store, &context.registry)?;
    for &kind in PairKind::ALL.iter() {
        report.absorb(flush_pairs(store, kind, context.pairs.table(kind), policy)?);
    }
    Ok(report)
}

/// Build a registry out of the persisted vocabulary, so a new run reuses the same identifiers
pub fn load_registry<S: Store + ?Sized>(store: &mut S) -> Result<Registry> {
    let mut registry = Registry::new();
    for row in store.load_words()? {
        match row.category.parse::<Category>() {
            Ok(category) => {
                if !registry.seed(&row.lemma, category, row.id.as_str().into()) {
                    warn!("Word {}, {} is stored twice; keeping the first id", row.lemma, row.category);
                }
            }
            Err(err) => warn!("Ignoring stored word {} ({}): {}", row.lemma, row.id, err),
        }
    }
    info!("Loaded {} words from the database", registry.len());
    Ok(registry)
}

//
// SQLite
//

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS Word (
        id TEXT PRIMARY KEY,
        root TEXT NOT NULL,
        pos TEXT NOT NULL);
    CREATE TABLE IF NOT EXISTS WordPair (
        word1_id TEXT,
        word2_id TEXT,
        count INTEGER DEFAULT 0,
        PRIMARY KEY (word1_id, word2_id),
        FOREIGN KEY (word1_id) REFERENCES Word(id),
        FOREIGN KEY (word2_id) REFERENCES Word(id));
";

/// The word pair database read by the downstream frequency lookups
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<SqliteStore> {
        SqliteStore::with_connection(Connection::open(path)?)
    }

    /// A throwaway database
    pub fn open_in_memory() -> Result<SqliteStore> {
        SqliteStore::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<SqliteStore> {
        conn.execute_batch(SCHEMA)?;
        Ok(SqliteStore { conn: conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Words of `other` category that share the most pairs with (lemma, category)
    ///
    /// The word can sit on either side of a pair row, so both columns are searched. A word
    /// paired with itself is listed once.
    pub fn top_cooccurring(&self, lemma: &str, category: Category, other: Category,
                           limit: usize) -> Result<Vec<(String, u64)>> {
        let mut stmt = self.conn.prepare(
            "WITH Target AS (SELECT id FROM Word WHERE root = ?1 AND pos = ?2)
             SELECT w.root, wp.count FROM WordPair wp JOIN Word w ON wp.word2_id = w.id
                 WHERE wp.word1_id IN (SELECT id FROM Target) AND w.pos = ?3
             UNION ALL
             SELECT w.root, wp.count FROM WordPair wp JOIN Word w ON wp.word1_id = w.id
                 WHERE wp.word2_id IN (SELECT id FROM Target) AND w.pos = ?3
                     AND wp.word1_id <> wp.word2_id
             ORDER BY 2 DESC, 1 ASC
             LIMIT ?4")?;
        let rows = stmt.query_map(
            params![lemma, category.as_str(), other.as_str(), limit as i64],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
        let mut out = Vec::new();
        for row in rows {
            let (word, count) = row?;
            out.push((word, count.max(0) as u64));
        }
        Ok(out)
    }
}

impl Store for SqliteStore {
    fn begin(&mut self) -> Result<()> {
        Ok(self.conn.execute_batch("BEGIN")?)
    }

    fn commit(&mut self) -> Result<()> {
        Ok(self.conn.execute_batch("COMMIT")?)
    }

    fn upsert_word(&mut self, id: &str, lemma: &str, category: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO Word (id, root, pos) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET root = excluded.root, pos = excluded.pos",
            params![id, lemma, category])?;
        Ok(())
    }

    fn pair_count(&mut self, a: &str, b: &str) -> Result<Option<u64>> {
        let count: Option<i64> = self.conn.query_row(
            "SELECT count FROM WordPair WHERE word1_id = ?1 AND word2_id = ?2",
            params![a, b],
            |row| row.get(0)).optional()?;
        Ok(count.map(|c| c.max(0) as u64))
    }

    fn insert_pair(&mut self, a: &str, b: &str, count: u64) -> Result<()> {
        self.conn.execute(
            "INSERT INTO WordPair (word1_id, word2_id, count) VALUES (?1, ?2, ?3)",
            params![a, b, count as i64])?;
        Ok(())
    }

    fn increment_pair(&mut self, a: &str, b: &str, delta: u64) -> Result<()> {
        self.conn.execute(
            "UPDATE WordPair SET count = count + ?3 WHERE word1_id = ?1 AND word2_id = ?2",
            params![a, b, delta as i64])?;
        Ok(())
    }

    fn load_words(&mut self) -> Result<Vec<WordRow>> {
        let mut stmt = self.conn.prepare("SELECT id, root, pos FROM Word ORDER BY rowid")?;
        let rows = stmt.query_map(params![], |row| Ok(WordRow {
            id: row.get(0)?,
            lemma: row.get(1)?,
            category: row.get(2)?,
        }))?;
        let mut words = Vec::new();
        for row in rows {
            words.push(row?);
        }
        Ok(words)
    }
}

//
// In memory
//

/// Store kept in process, for dry runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub words: FarmMap<String, (String, String)>,
    pub pairs: FarmMap<(String, String), u64>,
    pub commits: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            words: new_farm(),
            pairs: new_farm(),
            commits: 0,
        }
    }

    pub fn count(&self, a: &str, b: &str) -> Option<u64> {
        self.pairs.get(&(a.to_string(), b.to_string())).cloned()
    }

    /// Total of all stored counts
    pub fn total(&self) -> u64 {
        self.pairs.values().sum()
    }
}

impl Store for MemoryStore {
    fn begin(&mut self) -> Result<()> { Ok(()) }

    fn commit(&mut self) -> Result<()> {
        self.commits += 1;
        Ok(())
    }

    fn upsert_word(&mut self, id: &str, lemma: &str, category: &str) -> Result<()> {
        self.words.insert(id.to_string(), (lemma.to_string(), category.to_string()));
        Ok(())
    }

    fn pair_count(&mut self, a: &str, b: &str) -> Result<Option<u64>> {
        Ok(self.count(a, b))
    }

    fn insert_pair(&mut self, a: &str, b: &str, count: u64) -> Result<()> {
        let key = (a.to_string(), b.to_string());
        if self.pairs.contains_key(&key) {
            return Err(Error::Other(format!("pair ({}, {}) already stored", a, b)));
        }
        self.pairs.insert(key, count);
        Ok(())
    }

    fn increment_pair(&mut self, a: &str, b: &str, delta: u64) -> Result<()> {
        if let Some(count) = self.pairs.get_mut(&(a.to_string(), b.to_string())) {
            *count += delta;
        }
        Ok(())
    }

    fn load_words(&mut self) -> Result<Vec<WordRow>> {
        let mut rows: Vec<WordRow> = self.words.iter()
            .map(|(id, &(ref lemma, ref category))| WordRow {
                id: id.clone(),
                lemma: lemma.clone(),
                category: category.clone(),
            })
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }
}
