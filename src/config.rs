//! Where the corpus and the database live, and how a run merges
//!
//! The binaries take these from the command line. When the corpus isn't given we fall back to
//! the usual checkout layout under `$ONTOLOGYPORTAL_GIT`, and the database sits in the corpus
//! directory.
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use errors::*;
use store::MergePolicy;

/// Environment variable pointing at the ontology portal checkout
pub const PORTAL_ENV: &str = "ONTOLOGYPORTAL_GIT";
/// Corpus location relative to the checkout
pub const CORPUS_SUBDIR: &str = "sigmanlp/corpora/COCA";
/// Database file name inside the corpus directory
pub const DATABASE_NAME: &str = "word_pairs.db";

/// Corpus root under a portal checkout
pub fn default_corpus_dir(portal: &OsStr) -> PathBuf {
    Path::new(portal).join(CORPUS_SUBDIR)
}

/// Everything an ingestion run needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub corpus_dir: PathBuf,
    pub database: PathBuf,
    pub merge: MergePolicy,
    /// Flush the pair tables after this many files (0: only at the end)
    pub checkpoint: usize,
    /// Count, but keep the results in memory
    pub dry_run: bool,
    /// Ignore identifiers already in the database
    pub fresh_ids: bool,
}

impl Settings {
    /// Settings with the database next to the corpus
    pub fn new<P: Into<PathBuf>>(corpus_dir: P) -> Settings {
        let corpus_dir = corpus_dir.into();
        Settings {
            database: corpus_dir.join(DATABASE_NAME),
            corpus_dir: corpus_dir,
            merge: MergePolicy::default(),
            checkpoint: 0,
            dry_run: false,
            fresh_ids: false,
        }
    }

    /// Work out the corpus directory from an explicit path or the portal checkout
    pub fn resolve(corpus: Option<&OsStr>, portal: Option<&OsStr>, database: Option<&OsStr>)
                   -> Result<Settings> {
        let corpus_dir = match (corpus, portal) {
            (Some(dir), _) => PathBuf::from(dir),
            (None, Some(portal)) => default_corpus_dir(portal),
            (None, None) => return Err(Error::Other(format!(
                "No corpus given. Pass --corpus or set {} to your checkout.", PORTAL_ENV))),
        };
        let mut settings = Settings::new(corpus_dir);
        if let Some(db) = database {
            settings.database = PathBuf::from(db);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_corpus_wins() {
        let s = Settings::resolve(Some(OsStr::new("/data/coca")), Some(OsStr::new("/git")), None).unwrap();
        assert_eq!(s.corpus_dir, PathBuf::from("/data/coca"));
        assert_eq!(s.database, PathBuf::from("/data/coca/word_pairs.db"));
        assert_eq!(s.merge, MergePolicy::Add);
        assert_eq!(s.checkpoint, 0);
    }

    #[test]
    fn portal_checkout_layout() {
        let s = Settings::resolve(None, Some(OsStr::new("/git")), Some(OsStr::new("/tmp/p.db"))).unwrap();
        assert_eq!(s.corpus_dir, PathBuf::from("/git/sigmanlp/corpora/COCA"));
        assert_eq!(s.database, PathBuf::from("/tmp/p.db"));
    }

    #[test]
    fn nothing_to_go_on() {
        assert!(Settings::resolve(None, None, None).is_err());
    }
}
