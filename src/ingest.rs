//! Drive a whole corpus through the counter and into a store
use std::path::PathBuf;
use cooccur::CorpusContext;
use errors::*;
use store::{flush_all, FlushReport, MergePolicy, Store};
use tagged::SentenceStreamer;

/// Count every file, one after the other, then merge into `store`
///
/// With `checkpoint` > 0 the pair tables are flushed and emptied every `checkpoint` files, which
/// caps memory at the cost of more round trips. The registry is never emptied. Files that can't
/// be opened are reported and skipped, but still count towards the checkpoint.
pub fn ingest<S: Store + ?Sized>(files: &[PathBuf], context: &mut CorpusContext, store: &mut S,
                                 merge: MergePolicy, checkpoint: usize) -> Result<FlushReport> {
    let mut report = FlushReport::default();
    for (i, path) in files.iter().enumerate() {
        info!("Processing file {}/{} | name: {}", i + 1, files.len(), path.display());
        match SentenceStreamer::open(path) {
            Ok(sentences) => context.process_sentences(sentences),
            Err(err) => warn!("Could not open {}: {}", path.display(), err),
        }
        let last = i + 1 == files.len();
        if checkpoint > 0 && (i + 1) % checkpoint == 0 && !last {
            info!("Checkpoint after {} files", i + 1);
            report.absorb(flush_all(store, context, merge)?);
            context.pairs.clear();
        }
    }
    let stats = &context.stats;
    info!("Read {} sentences ({} tokens: {} verbs, {} nouns, {} names, {} discarded) from {} files",
        stats.sentences, stats.tokens, stats.verbs, stats.nouns, stats.names, stats.discarded,
        stats.files);
    report.absorb(flush_all(store, context, merge)?);
    if report.failed > 0 {
        warn!("{} records could not be stored", report.failed);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    extern crate tempfile;
    use super::*;
    use std::fs;
    use std::path::Path;
    use classify::Category;
    use store::MemoryStore;

    fn write(dir: &Path, name: &str, body: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    const EAT: &[u8] = b"eats\teat\tvvz\napples\tapple\tnn2\n.\t.\ty\n";

    #[test]
    fn checkpoints_add_up_like_one_flush() {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<PathBuf> = (0..3)
            .map(|i| write(dir.path(), &format!("f{}.txt", i), EAT))
            .collect();

        let mut whole_ctx = CorpusContext::new();
        let mut whole = MemoryStore::new();
        ingest(&files, &mut whole_ctx, &mut whole, MergePolicy::Add, 0).unwrap();

        let mut chunked_ctx = CorpusContext::new();
        let mut chunked = MemoryStore::new();
        ingest(&files, &mut chunked_ctx, &mut chunked, MergePolicy::Add, 1).unwrap();

        assert_eq!(whole.total(), 3);
        assert_eq!(chunked.total(), 3);
        assert_eq!(whole.commits, 4);
        assert_eq!(chunked.commits, 12);
        assert_eq!(chunked_ctx.stats.files, 3);
        assert!(chunked_ctx.registry.get("apple", Category::Noun).is_some());
    }

    #[test]
    fn unreadable_file_still_reaches_its_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write(dir.path(), "a.txt", EAT),
            dir.path().join("missing.txt"),
            write(dir.path(), "b.txt", EAT),
        ];
        let mut ctx = CorpusContext::new();
        let mut store = MemoryStore::new();
        ingest(&files, &mut ctx, &mut store, MergePolicy::Add, 2).unwrap();
        // flushed after the second (missing) file, then once more at the end
        assert_eq!(store.commits, 8);
        assert_eq!(store.total(), 2);
        assert_eq!(ctx.stats.files, 2);
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![dir.path().join("missing.txt"), write(dir.path(), "ok.txt", EAT)];
        let mut ctx = CorpusContext::new();
        let mut store = MemoryStore::new();
        let report = ingest(&files, &mut ctx, &mut store, MergePolicy::Add, 0).unwrap();
        assert_eq!(ctx.stats.files, 1);
        assert_eq!(report.inserted, 3);
    }
}
