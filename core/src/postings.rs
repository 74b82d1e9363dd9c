//! Per-keyword postings kept in non-increasing frequency order.
//!
//! The order is never restored by a full sort. Each new occurrence is appended and then
//! moved to its rank with a binary search over the entries that were already in place.

use crate::Occurrence;
use serde::Serialize;
use std::cmp::Ordering;

/// Moves the last element of `occs` to its rank among the elements before it.
///
/// `occs[..n - 1]` must already be non-increasing by frequency. Returns the midpoint
/// indexes probed by the binary search, or `None` when the list has fewer than two
/// elements and nothing needs to move. Equal frequencies stop the search immediately and
/// the new occurrence lands in front of the peer it hit.
pub fn insert_last_occurrence(occs: &mut Vec<Occurrence>) -> Option<Vec<usize>> {
    if occs.len() < 2 {
        return None;
    }
    let last = occs.pop()?;

    let mut probes = Vec::new();
    let mut lo: isize = 0;
    let mut hi: isize = occs.len() as isize - 1;
    let mut at = 0usize;
    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let m = mid as usize;
        probes.push(m);
        match last.frequency.cmp(&occs[m].frequency) {
            Ordering::Less => {
                lo = mid + 1;
                at = m + 1;
            }
            Ordering::Greater => {
                hi = mid - 1;
                at = m;
            }
            Ordering::Equal => {
                at = m;
                break;
            }
        }
    }
    occs.insert(at, last);
    Some(probes)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PostingsList {
    occurrences: Vec<Occurrence>,
}

impl PostingsList {
    pub fn new() -> Self { Self::default() }

    pub fn singleton(occ: Occurrence) -> Self {
        Self { occurrences: vec![occ] }
    }

    /// Adds one occurrence at its frequency rank and returns the probe sequence.
    pub fn insert(&mut self, occ: Occurrence) -> Option<Vec<usize>> {
        self.occurrences.push(occ);
        insert_last_occurrence(&mut self.occurrences)
    }

    pub fn as_slice(&self) -> &[Occurrence] { &self.occurrences }

    pub fn iter(&self) -> std::slice::Iter<'_, Occurrence> { self.occurrences.iter() }

    pub fn len(&self) -> usize { self.occurrences.len() }

    pub fn is_empty(&self) -> bool { self.occurrences.is_empty() }

    pub fn is_ordered(&self) -> bool {
        self.occurrences.windows(2).all(|w| w[0].frequency >= w[1].frequency)
    }
}

impl<'a> IntoIterator for &'a PostingsList {
    type Item = &'a Occurrence;
    type IntoIter = std::slice::Iter<'a, Occurrence>;

    fn into_iter(self) -> Self::IntoIter { self.occurrences.iter() }
}

impl std::fmt::Display for PostingsList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, occ) in self.occurrences.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{occ}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occs(freqs: &[u32]) -> Vec<Occurrence> {
        freqs.iter().enumerate().map(|(i, &f)| Occurrence::new(format!("doc{i}"), f)).collect()
    }

    fn freqs(occs: &[Occurrence]) -> Vec<u32> {
        occs.iter().map(|o| o.frequency).collect()
    }

    #[test]
    fn short_lists_are_not_probed() {
        let mut empty = Vec::new();
        assert_eq!(insert_last_occurrence(&mut empty), None);
        let mut one = occs(&[3]);
        assert_eq!(insert_last_occurrence(&mut one), None);
        assert_eq!(freqs(&one), vec![3]);
    }

    #[test]
    fn smallest_goes_to_the_end() {
        let mut list = occs(&[5, 4, 3, 2, 1, 0]);
        let probes = insert_last_occurrence(&mut list);
        assert_eq!(probes, Some(vec![2, 3, 4]));
        assert_eq!(freqs(&list), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn largest_goes_to_the_front() {
        let mut list = occs(&[5, 4, 3, 2, 1, 6]);
        let probes = insert_last_occurrence(&mut list);
        assert_eq!(probes, Some(vec![2, 0]));
        assert_eq!(freqs(&list), vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(list[0].document, "doc5");
    }

    #[test]
    fn equal_frequency_stops_at_first_probe_hit() {
        let mut list = occs(&[5, 4, 3, 2, 1, 3]);
        let probes = insert_last_occurrence(&mut list);
        assert_eq!(probes, Some(vec![2]));
        assert_eq!(freqs(&list), vec![5, 4, 3, 3, 2, 1]);
        assert_eq!(list[2].document, "doc5");
    }

    #[test]
    fn middle_insert_between_neighbours() {
        let mut list = occs(&[82, 76, 71, 71, 70, 65, 61, 56, 54, 51, 48, 45, 41, 36, 34, 30, 25, 20, 20, 18, 17, 12, 57]);
        let probes = insert_last_occurrence(&mut list);
        assert_eq!(probes, Some(vec![10, 4, 7, 5, 6]));
        assert!(list.windows(2).all(|w| w[0].frequency >= w[1].frequency));
        assert_eq!(list[7].frequency, 57);
    }

    #[test]
    fn postings_stay_ordered_after_every_insert() {
        let mut postings = PostingsList::new();
        for (i, f) in [3u32, 9, 1, 4, 4, 7, 2, 9, 1, 5].into_iter().enumerate() {
            postings.insert(Occurrence::new(format!("d{i}"), f));
            assert!(postings.is_ordered(), "out of order after inserting {f}: {postings}");
        }
        assert_eq!(postings.len(), 10);
    }

    #[test]
    fn display_matches_pair_notation() {
        let mut postings = PostingsList::singleton(Occurrence::new("a.txt", 1));
        postings.insert(Occurrence::new("b.txt", 2));
        assert_eq!(postings.to_string(), "[(b.txt,2), (a.txt,1)]");
    }
}
