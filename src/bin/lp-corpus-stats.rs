//! Corpus statistics
//!
//! Reads a tagged corpus the same way lp-ingest does and prints how many files, sentences and
//! tokens it holds, how the tokens were classified, and how many distinct word-senses and pairs
//! they make. Nothing is written anywhere.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate lexpairs;

use lexpairs::errors::*;
use lexpairs::config::{Settings, PORTAL_ENV};
use lexpairs::cooccur::{CorpusContext, PairKind};
use lexpairs::corpus::corpus_files;
use lexpairs::tagged::SentenceStreamer;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    inner_main().expect("Could not recover. Exiting.");
}
pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .arg_from_usage("[corpus] 'directory holding the tagged corpus'")
        .get_matches();

    let portal = ::std::env::var_os(PORTAL_ENV);
    let settings = Settings::resolve(args.value_of_os("corpus"), portal.as_ref().map(|p| p.as_os_str()), None)?;

    let mut context = CorpusContext::new();
    for path in corpus_files(&settings.corpus_dir)? {
        match SentenceStreamer::open(&path) {
            Ok(sentences) => context.process_sentences(sentences),
            Err(err) => warn!("Could not open {}: {}", path.display(), err),
        }
    }

    let stats = &context.stats;
    println!("files\t{}", stats.files);
    println!("sentences\t{}", stats.sentences);
    println!("tokens\t{}", stats.tokens);
    println!("verbs\t{}", stats.verbs);
    println!("nouns\t{}", stats.nouns);
    println!("names\t{}", stats.names);
    println!("discarded\t{}", stats.discarded);
    println!("word-senses\t{}", context.registry.len());
    for &kind in PairKind::ALL.iter() {
        let table = context.pairs.table(kind);
        println!("{}\t{} distinct, {} total", kind.label(), table.len(), table.total());
    }
    Ok(())
}
