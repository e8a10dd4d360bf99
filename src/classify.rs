//! Map tags onto the word categories we count
use std::fmt;
use std::str::FromStr;
use errors::*;

/// Lexical category of a word-sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Verb,
    Noun,
    /// Proper names. Registered, but never paired.
    NounPhrase,
}

impl Category {
    /// The spelling stored in the vocabulary table
    pub fn as_str(&self) -> &'static str {
        match *self {
            Category::Verb => "verb",
            Category::Noun => "noun",
            Category::NounPhrase => "noun-phrase",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Category> {
        match s {
            "verb" => Ok(Category::Verb),
            "noun" => Ok(Category::Noun),
            "noun-phrase" => Ok(Category::NounPhrase),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

fn has_prefix(tag: &str, prefix: &str) -> bool {
    tag.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

/// Category of a token, or None if it doesn't count
///
/// Tokens without a lemma never count, whatever their tag.
pub fn classify(lemma: &str, tag: &str) -> Option<Category> {
    if lemma.is_empty() {
        None
    } else if has_prefix(tag, "vb") || has_prefix(tag, "vv") {
        Some(Category::Verb)
    } else if has_prefix(tag, "nn") {
        Some(Category::Noun)
    } else if has_prefix(tag, "np") {
        Some(Category::NounPhrase)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_tags() {
        for tag in &["vbz", "vvd", "VVG", "Vb0", "vv"] {
            assert_eq!(classify("be", tag), Some(Category::Verb), "tag {}", tag);
        }
    }

    #[test]
    fn noun_and_name_tags() {
        assert_eq!(classify("cat", "nn1"), Some(Category::Noun));
        assert_eq!(classify("cat", "NN2"), Some(Category::Noun));
        assert_eq!(classify("Mary", "np1"), Some(Category::NounPhrase));
        assert_eq!(classify("Mary", "NP"), Some(Category::NounPhrase));
    }

    #[test]
    fn discards() {
        assert_eq!(classify("", "vvz"), None);
        assert_eq!(classify("", "nn1"), None);
        assert_eq!(classify("the", "at"), None);
        assert_eq!(classify("quick", "jj"), None);
        assert_eq!(classify("x", "v"), None);
        assert_eq!(classify("x", ""), None);
        assert_eq!(classify("x", "\u{e9}n"), None);
    }

    #[test]
    fn category_names_round_trip() {
        for cat in &[Category::Verb, Category::Noun, Category::NounPhrase] {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), *cat);
        }
        assert!("adjective".parse::<Category>().is_err());
    }
}
