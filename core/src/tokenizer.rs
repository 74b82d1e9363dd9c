use std::collections::HashSet;

const PUNCTUATION: &[char] = &['.', ',', '?', ':', ';', '!', '-', '\'', '(', ')', '{', '}', '[', ']'];

fn is_punctuation(c: char) -> bool { PUNCTUATION.contains(&c) }

/// Lower-case a raw token and strip the punctuation around it.
///
/// Returns `None` for empty or punctuation-only tokens, and for tokens with punctuation
/// left inside the word once the ends are trimmed (`can't`, `well-known`).
pub fn normalize(raw: &str) -> Option<String> {
    let lowered = raw.to_lowercase();
    let word = lowered.trim_matches(is_punctuation);
    if word.is_empty() || word.contains(is_punctuation) {
        return None;
    }
    Some(word.to_string())
}

/// Words that are never indexed, however often they occur.
#[derive(Debug, Clone, Default)]
pub struct NoiseWords {
    words: HashSet<String>,
}

impl NoiseWords {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_lowercase());
    }

    pub fn contains(&self, keyword: &str) -> bool { self.words.contains(keyword) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

impl<S: AsRef<str>> FromIterator<S> for NoiseWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut noise = Self::new();
        for word in iter {
            noise.insert(word.as_ref());
        }
        noise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_punctuation() {
        assert_eq!(normalize("well."), Some("well".to_string()));
        assert_eq!(normalize("Fox!?"), Some("fox".to_string()));
        assert_eq!(normalize("end;"), Some("end".to_string()));
    }

    #[test]
    fn strips_leading_punctuation() {
        assert_eq!(normalize("(aside"), Some("aside".to_string()));
        assert_eq!(normalize("[note]."), Some("note".to_string()));
    }

    #[test]
    fn rejects_embedded_punctuation() {
        assert_eq!(normalize("can't"), None);
        assert_eq!(normalize("well-known"), None);
        assert_eq!(normalize("e.g."), None);
    }

    #[test]
    fn rejects_empty_and_punctuation_only() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("..."), None);
        assert_eq!(normalize("?!-"), None);
    }

    #[test]
    fn keeps_non_punctuation_characters() {
        assert_eq!(normalize("MP3,"), Some("mp3".to_string()));
        assert_eq!(normalize("\"quoted\""), Some("\"quoted\"".to_string()));
    }

    #[test]
    fn noise_words_are_case_insensitive() {
        let noise: NoiseWords = ["The", "a"].into_iter().collect();
        assert!(noise.contains("the"));
        assert!(noise.contains("a"));
        assert!(!noise.contains("fox"));
        assert_eq!(noise.len(), 2);
    }
}
