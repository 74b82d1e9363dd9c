use crate::postings::PostingsList;
use crate::source::TokenSource;
use crate::tokenizer::{normalize, NoiseWords};
use crate::{Keyword, Occurrence, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Build phase of the index. Consumed by [`IndexBuilder::finish`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    keywords: HashMap<Keyword, PostingsList>,
    noise_words: NoiseWords,
    num_docs: usize,
}

impl IndexBuilder {
    pub fn new(noise_words: NoiseWords) -> Self {
        Self { keywords: HashMap::new(), noise_words, num_docs: 0 }
    }

    /// Counts the keywords of one document. Rejected tokens and noise words are skipped.
    pub fn load_keywords<I, S>(&self, document: &str, tokens: I) -> HashMap<Keyword, Occurrence>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kws: HashMap<Keyword, Occurrence> = HashMap::new();
        for token in tokens {
            let Some(word) = normalize(token.as_ref()) else { continue };
            if self.noise_words.contains(&word) {
                continue;
            }
            kws.entry(word)
                .and_modify(|occ| occ.frequency += 1)
                .or_insert_with(|| Occurrence::new(document, 1));
        }
        kws
    }

    /// Folds one document's keyword counts into the global table.
    pub fn merge_keywords(&mut self, kws: HashMap<Keyword, Occurrence>) {
        for (keyword, occ) in kws {
            match self.keywords.entry(keyword) {
                Entry::Vacant(slot) => {
                    slot.insert(PostingsList::singleton(occ));
                }
                Entry::Occupied(mut slot) => {
                    slot.get_mut().insert(occ);
                }
            }
        }
    }

    pub fn add_document<I, S>(&mut self, document: &str, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let kws = self.load_keywords(document, tokens);
        tracing::debug!(document, keywords = kws.len(), "indexed document");
        self.merge_keywords(kws);
        self.num_docs += 1;
    }

    pub fn noise_words(&self) -> &NoiseWords { &self.noise_words }

    pub fn finish(self) -> SearchIndex {
        tracing::info!(documents = self.num_docs, keywords = self.keywords.len(), "index build complete");
        SearchIndex { keywords: self.keywords, num_docs: self.num_docs }
    }
}

/// Query phase of the index. Read-only, so it can be shared between threads.
#[derive(Debug, Default)]
pub struct SearchIndex {
    keywords: HashMap<Keyword, PostingsList>,
    num_docs: usize,
}

impl SearchIndex {
    pub fn postings(&self, keyword: &str) -> Option<&PostingsList> { self.keywords.get(keyword) }

    pub fn contains(&self, keyword: &str) -> bool { self.keywords.contains_key(keyword) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingsList)> {
        self.keywords.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// Keywords in lexicographic order, for stable listings.
    pub fn sorted_keywords(&self) -> Vec<&str> {
        let mut kws: Vec<&str> = self.keywords.keys().map(String::as_str).collect();
        kws.sort_unstable();
        kws
    }

    pub fn num_keywords(&self) -> usize { self.keywords.len() }

    pub fn num_docs(&self) -> usize { self.num_docs }
}

/// Indexes every document in manifest order and hands back the queryable index.
///
/// The first source error aborts the build; no partial index is returned.
pub fn build_index<I, S, T>(documents: I, noise_words: NoiseWords, source: &T) -> Result<SearchIndex>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    T: TokenSource + ?Sized,
{
    let mut builder = IndexBuilder::new(noise_words);
    for document in documents {
        let document = document.as_ref();
        let tokens = source.tokens(document)?;
        builder.add_document(document, tokens);
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(noise: &[&str]) -> IndexBuilder {
        IndexBuilder::new(noise.iter().collect())
    }

    #[test]
    fn counts_keywords_per_document() {
        let b = builder(&["the"]);
        let kws = b.load_keywords("doc2", "The quick, quick fox! can't".split_whitespace());
        assert_eq!(kws.len(), 2);
        assert_eq!(kws["quick"], Occurrence::new("doc2", 2));
        assert_eq!(kws["fox"], Occurrence::new("doc2", 1));
        assert!(!kws.contains_key("the"));
    }

    #[test]
    fn empty_and_noise_only_documents_merge_as_no_op() {
        let mut b = builder(&["a", "the"]);
        let kws = b.load_keywords("noise", ["A", "the", "...", ""]);
        assert!(kws.is_empty());
        b.merge_keywords(kws);
        b.add_document("empty", Vec::<String>::new());
        let index = b.finish();
        assert_eq!(index.num_keywords(), 0);
        assert_eq!(index.num_docs(), 1);
    }

    #[test]
    fn merge_keeps_postings_ordered() {
        let mut b = builder(&[]);
        b.add_document("d1", ["x", "y"]);
        b.add_document("d2", ["x", "x", "x"]);
        b.add_document("d3", ["x", "x", "y", "y", "y"]);
        let index = b.finish();

        let x: Vec<_> = index.postings("x").unwrap().iter().map(|o| (o.document.as_str(), o.frequency)).collect();
        assert_eq!(x, vec![("d2", 3), ("d3", 2), ("d1", 1)]);
        let y: Vec<_> = index.postings("y").unwrap().iter().map(|o| (o.document.as_str(), o.frequency)).collect();
        assert_eq!(y, vec![("d3", 3), ("d1", 1)]);
    }

    #[test]
    fn sorted_keywords_are_lexicographic() {
        let mut b = builder(&[]);
        b.add_document("d", ["pear", "apple", "fig"]);
        assert_eq!(b.finish().sorted_keywords(), vec!["apple", "fig", "pear"]);
    }
}
