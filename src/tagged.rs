//! Tagged corpus reader
//!
//! Corpus files hold one token per line as tab separated fields. There are two layouts:
//! `word lemma tag`, and a five column one where the first two fields are text and token ids
//! which we ignore. Files are historical and not reliably UTF-8, so every line is decoded as
//! Latin-1, which can't fail. Lines may end in `\n`, `\r\n` or a bare `\r`.
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Surface forms that close a sentence (the marker is kept as the last token)
pub const BOUNDARIES: [&str; 7] = [".", "!", "?", "#", "<p>", "...", "...."];

/// One tagged token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub lemma: String,
    pub tag: String,
}

impl Token {
    pub fn new(surface: &str, lemma: &str, tag: &str) -> Token {
        Token {
            surface: surface.to_string(),
            lemma: lemma.to_string(),
            tag: tag.to_string(),
        }
    }

    /// Whether this token closes the current sentence
    pub fn is_boundary(&self) -> bool {
        BOUNDARIES.contains(&self.surface.as_str())
    }

    /// Read a token out of one decoded line, or None if the line has the wrong shape
    pub fn parse(line: &str) -> Option<Token> {
        let fields: Vec<&str> = line.trim().split('\t').collect();
        match fields.len() {
            3 => Some(Token::new(fields[0], fields[1], fields[2])),
            5 => Some(Token::new(fields[2], fields[3], fields[4])),
            _ => None,
        }
    }
}

/// Tokens up to and including a boundary marker
pub type Sentence = Vec<Token>;

/// Map every byte to the code point of the same value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Stream sentences from a tagged file, one line at a time
pub struct SentenceStreamer<R> {
    reader: R,
    line: Vec<u8>,
    /// Tokens from a chunk holding several `\r` separated lines
    pending: VecDeque<Token>,
    done: bool,
}

impl SentenceStreamer<BufReader<File>> {
    /// Open a corpus file (probably what you want)
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(SentenceStreamer::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> SentenceStreamer<R> {
    pub fn new(reader: R) -> Self {
        SentenceStreamer {
            reader: reader,
            line: Vec::with_capacity(256),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Next well formed token, None at the end of input
    fn next_token(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.done {
                return None;
            }
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    // A file with old Mac line endings arrives as one chunk
                    for part in self.line.split(|&b| b == b'\r') {
                        if let Some(token) = Token::parse(&decode_latin1(part)) {
                            self.pending.push_back(token);
                        }
                    }
                }
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    warn!("Stopped reading a corpus file early: {}", err);
                    self.done = true;
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for SentenceStreamer<R> {
    type Item = Sentence;

    fn next(&mut self) -> Option<Self::Item> {
        let mut sentence = Sentence::new();
        while let Some(token) = self.next_token() {
            let boundary = token.is_boundary();
            sentence.push(token);
            if boundary {
                return Some(sentence);
            }
        }
        // The last sentence doesn't need a boundary
        if sentence.is_empty() { None } else { Some(sentence) }
    }
}
