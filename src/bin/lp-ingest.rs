//! Count word-sense cooccurrences across a tagged corpus and merge them into the database
//!
//! Every `.txt` file under the corpus directory is read as one token per line. Within each
//! sentence, verbs are paired with verbs, verbs with nouns and nouns with nouns; the counts are
//! kept in memory and merged into `word_pairs.db` once the whole corpus has been read.
//!
//! Identifiers already in the database are reused, so running the same corpus twice doubles
//! the counts (with `--merge add`) instead of starting a second vocabulary.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate lexpairs;

use clap::Arg;

use lexpairs::errors::*;
use lexpairs::config::{Settings, PORTAL_ENV};
use lexpairs::cooccur::CorpusContext;
use lexpairs::corpus::corpus_files;
use lexpairs::ingest::ingest;
use lexpairs::store::{load_registry, MemoryStore, MergePolicy, SqliteStore};

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    inner_main().expect("Could not recover. Exiting.");
}
pub fn inner_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = app_from_crate!()
        .arg(Arg::with_name("corpus")
            .long("corpus")
            .takes_value(true)
            .help("directory holding the tagged corpus (default: $ONTOLOGYPORTAL_GIT/sigmanlp/corpora/COCA)"))
        .arg(Arg::with_name("portal")
            .long("portal")
            .env(PORTAL_ENV)
            .takes_value(true)
            .hidden(true))
        .arg(Arg::with_name("db")
            .long("db")
            .takes_value(true)
            .help("database to merge into (default: word_pairs.db in the corpus directory)"))
        .arg(Arg::with_name("merge")
            .long("merge")
            .takes_value(true)
            .possible_values(&["add", "one"])
            .default_value("add")
            .help("how to update a stored pair: add this run's count, or add one"))
        .arg(Arg::with_name("checkpoint")
            .long("checkpoint")
            .takes_value(true)
            .default_value("0")
            .help("flush the pair tables every N files (0: only at the end)"))
        .arg_from_usage("--dry-run 'count, but keep everything in memory'")
        .arg_from_usage("--fresh-ids 'do not reuse identifiers already in the database'")
        .get_matches();

    let mut settings = Settings::resolve(
        args.value_of_os("corpus"),
        args.value_of_os("portal"),
        args.value_of_os("db"))?;
    settings.merge = value_t!(args, "merge", MergePolicy).unwrap_or_else(|e| e.exit());
    settings.checkpoint = value_t!(args, "checkpoint", usize).unwrap_or_else(|e| e.exit());
    settings.dry_run = args.is_present("dry-run");
    settings.fresh_ids = args.is_present("fresh-ids");
    info!("Settings: {:?}", settings);

    let files = corpus_files(&settings.corpus_dir)?;
    info!("Found {} corpus files under {}", files.len(), settings.corpus_dir.display());

    let report = if settings.dry_run {
        let mut store = MemoryStore::new();
        let mut context = CorpusContext::new();
        let report = ingest(&files, &mut context, &mut store, settings.merge, settings.checkpoint)?;
        println!("{} words, {} pairs, {} cooccurrences",
            store.words.len(), store.pairs.len(), store.total());
        report
    } else {
        let mut store = SqliteStore::open(&settings.database)?;
        let mut context = if settings.fresh_ids {
            CorpusContext::new()
        } else {
            CorpusContext::with_registry(load_registry(&mut store)?)
        };
        ingest(&files, &mut context, &mut store, settings.merge, settings.checkpoint)?
    };

    info!("Done: {} inserted, {} updated, {} failed",
        report.inserted, report.updated, report.failed);
    Ok(())
}
