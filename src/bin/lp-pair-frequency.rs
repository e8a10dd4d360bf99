//! Most frequent cooccurring words
//!
//! Given a word and its category, list the words of another category that appear with it most
//! often, e.g. `lp-pair-frequency word_pairs.db love noun verb` for what one does to love.

// argument parsing
#[macro_use] extern crate clap;
extern crate env_logger;
// lastly, this library
extern crate lexpairs;

use lexpairs::errors::*;
use lexpairs::classify::Category;
use lexpairs::store::SqliteStore;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    inner_main().expect("Could not recover. Exiting.");
}
pub fn inner_main() -> Result<()> {
    env_logger::init();
    let args = app_from_crate!()
        .arg_from_usage("<database> 'word pair database written by lp-ingest'")
        .arg_from_usage("<word> 'lemma to look up'")
        .arg_from_usage("<category> 'category of the word: verb, noun or noun-phrase'")
        .arg_from_usage("<other> 'category of the words to list'")
        .arg_from_usage("-n, --limit=[N] 'how many words to list (default 10)'")
        .get_matches();

    let category = value_t!(args, "category", Category).unwrap_or_else(|e| e.exit());
    let other = value_t!(args, "other", Category).unwrap_or_else(|e| e.exit());
    let limit = if args.is_present("limit") {
        value_t!(args, "limit", usize).unwrap_or_else(|e| e.exit())
    } else {
        10
    };

    // Both are required, so clap already made sure they're here
    let database = args.value_of("database").unwrap_or_default();
    let word = args.value_of("word").unwrap_or_default();

    let store = SqliteStore::open(database)?;
    println!("Word | Count");
    println!("------------------");
    for (partner, count) in store.top_cooccurring(word, category, other, limit)? {
        println!("{} | {}", partner, count);
    }
    Ok(())
}
