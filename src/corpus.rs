//! Find the corpus files under a directory
use std::fs;
use std::path::{Path, PathBuf};
use errors::*;

/// Word lists we generate next to the corpus; they look like corpus files but aren't
pub const GENERATED: [&str; 2] = ["nouns.txt", "verbs.txt"];

/// Every tagged text file below `root`, in a stable order
///
/// Directories named like zip archives are reported but not entered: they are most likely
/// downloads nobody extracted.
pub fn corpus_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::MissingDirectory("corpus directory", root.to_path_buf()));
    }
    let mut files = vec![];
    visit(root, &mut files)?;
    Ok(files)
}

fn visit(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<::std::io::Result<Vec<PathBuf>>>()?;
    entries.sort();
    for path in entries {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                debug!("Skipping {} (name isn't unicode)", path.display());
                continue;
            }
        };
        if path.is_dir() {
            if name.ends_with(".zip") {
                warn!("Found {}. File not processed. Are you sure you unzipped it?", path.display());
            } else {
                visit(&path, files)?;
            }
        } else if name.ends_with(".txt") {
            if GENERATED.contains(&name.as_str()) {
                info!("Skipped: {}. This file is generated from, but not part of, the corpus.", name);
            } else {
                files.push(path);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate tempfile;
    use super::*;
    use std::fs::File;

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    #[test]
    fn finds_text_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("fic/1990")).unwrap();
        fs::create_dir_all(root.join("news.zip")).unwrap();
        touch(&root.join("fic/1990/w_fic_1990.txt"));
        touch(&root.join("acad.txt"));
        touch(&root.join("nouns.txt"));
        touch(&root.join("fic/verbs.txt"));
        touch(&root.join("README.md"));
        touch(&root.join("news.zip/w_news_2001.txt"));

        let found = corpus_files(root).unwrap();
        assert_eq!(found, vec![root.join("acad.txt"), root.join("fic/1990/w_fic_1990.txt")]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        match corpus_files(dir.path().join("nope")) {
            Err(Error::MissingDirectory(_, _)) => {}
            other => panic!("expected a missing directory, got {:?}", other),
        }
    }
}
