//! Two-keyword OR search over a built [`SearchIndex`].

use crate::index::SearchIndex;
use crate::Occurrence;
use serde::Serialize;
use std::collections::HashMap;

/// Maximum number of documents returned by [`SearchIndex::top5_search`].
pub const TOP_K: usize = 5;

/// Which query keyword contributed a hit. `First` wins frequency ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit<'a> {
    pub document: &'a str,
    pub frequency: u32,
    pub source: Source,
}

impl<'a> Hit<'a> {
    fn tagged(occ: &'a Occurrence, source: Source) -> Self {
        Self { document: &occ.document, frequency: occ.frequency, source }
    }
}

impl SearchIndex {
    /// Every document matching `kw1` or `kw2`, best frequency first, one hit per document.
    ///
    /// Returns `None` when both keywords are empty or neither is indexed.
    pub fn ranked(&self, kw1: &str, kw2: &str) -> Option<Vec<Hit<'_>>> {
        if kw1.is_empty() && kw2.is_empty() {
            return None;
        }
        let first = self.postings(kw1);
        let second = self.postings(kw2);
        if first.is_none() && second.is_none() {
            return None;
        }

        let candidates = first
            .into_iter()
            .flatten()
            .map(|occ| Hit::tagged(occ, Source::First))
            .chain(second.into_iter().flatten().map(|occ| Hit::tagged(occ, Source::Second)));

        // A document found under both keywords keeps its larger frequency; on a tie the
        // hit seen first (from kw1) stays.
        let mut slots: Vec<Option<Hit<'_>>> = Vec::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for hit in candidates {
            match seen.get(hit.document) {
                Some(&at) if slots[at].as_ref().is_some_and(|kept| kept.frequency >= hit.frequency) => {}
                Some(&at) => {
                    slots[at] = None;
                    seen.insert(hit.document, slots.len());
                    slots.push(Some(hit));
                }
                None => {
                    seen.insert(hit.document, slots.len());
                    slots.push(Some(hit));
                }
            }
        }

        let mut hits: Vec<Hit<'_>> = slots.into_iter().flatten().collect();
        hits.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.source.cmp(&b.source)));
        Some(hits)
    }

    /// Names of the (at most [`TOP_K`]) best documents for `kw1 OR kw2`.
    pub fn top5_search(&self, kw1: &str, kw2: &str) -> Option<Vec<String>> {
        let hits = self.ranked(kw1, kw2)?;
        tracing::debug!(kw1, kw2, matched = hits.len(), "search");
        Some(hits.into_iter().take(TOP_K).map(|h| h.document.to_string()).collect())
    }
}
