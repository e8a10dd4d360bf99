extern crate lexpairs;
extern crate tempfile;

use std::fs;
use std::path::Path;

use lexpairs::classify::Category;
use lexpairs::cooccur::CorpusContext;
use lexpairs::corpus::corpus_files;
use lexpairs::ingest::ingest;
use lexpairs::store::{load_registry, MergePolicy, SqliteStore, Store};

fn write_corpus(root: &Path) {
    fs::create_dir_all(root.join("fic")).unwrap();
    fs::write(root.join("fic/w_fic_2001.txt"),
        &b"loves\tlove\tvvz\nMary\tMary\tnp1\ncat\tcat\tnn1\n.\t.\ty\n"[..]).unwrap();
    // five columns, Latin-1 text, no closing boundary
    fs::write(root.join("w_mag_1995.txt"),
        &b"1\t10\tcaf\xe9s\tcaf\xe9\tnn2\n1\t11\tserve\tserve\tvv0\n1\t12\tcats\tcat\tnn2\n"[..]).unwrap();
    fs::write(root.join("nouns.txt"), &b"cat\tcat\tnn1\ndog\tdog\tnn1\n"[..]).unwrap();
}

fn pair_total(store: &SqliteStore) -> i64 {
    store.connection()
        .query_row("SELECT COALESCE(SUM(count), 0) FROM WordPair", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn corpus_into_database_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("COCA");
    write_corpus(&root);
    let db = dir.path().join("word_pairs.db");

    let files = corpus_files(&root).unwrap();
    assert_eq!(files.len(), 2);

    let mut store = SqliteStore::open(&db).unwrap();
    let mut context = CorpusContext::new();
    let report = ingest(&files, &mut context, &mut store, MergePolicy::Add, 0).unwrap();
    assert_eq!(report.failed, 0);

    // love, Mary, cat, café, serve
    assert_eq!(context.registry.len(), 5);
    assert_eq!(store.load_words().unwrap().len(), 5);
    // love-cat; serve-café, serve-cat, café-cat
    assert_eq!(pair_total(&store), 4);
    let top = store.top_cooccurring("cat", Category::Noun, Category::Verb, 10).unwrap();
    assert_eq!(top, vec![("love".to_string(), 1), ("serve".to_string(), 1)]);
    drop(store);

    // A second run against the same database keeps the identifiers
    let mut store = SqliteStore::open(&db).unwrap();
    let registry = load_registry(&mut store).unwrap();
    assert_eq!(registry.get("caf\u{e9}", Category::Noun), context.registry.get("caf\u{e9}", Category::Noun));
    let mut again = CorpusContext::with_registry(registry);
    let report = ingest(&files, &mut again, &mut store, MergePolicy::Add, 0).unwrap();
    assert_eq!(report.updated, 4);
    assert_eq!(again.registry.len(), 5);
    assert_eq!(store.load_words().unwrap().len(), 5);
    assert_eq!(pair_total(&store), 8);
}
