//! Word-frequency counting and k-way merging of sorted count dumps.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::io::{BufRead, Write};

use log::debug;

use crate::chain_hash_map::ChainHashMap;
use crate::map::Map;
use crate::persist::{self, PersistError};

/// Count lowercased word tokens in `text`.
///
/// Tokens are maximal alphanumeric runs; runs containing a digit are
/// skipped, so only plain words are counted. Each increment goes through
/// the contract's `get_or` + `insert`, which the chained table serves in
/// amortized O(1).
pub fn count_words(text: &str) -> ChainHashMap<String, u64> {
    let mut counts = ChainHashMap::new();
    for token in text.split(|c: char| !c.is_alphanumeric()) {
        if token.is_empty() || !token.chars().all(char::is_alphabetic) {
            continue;
        }
        let word = token.to_lowercase();
        let next = *counts.get_or(&word, &0) + 1;
        counts.insert(word, next);
    }
    counts
}

/// Dump `counts` sorted by word, one `<word> <count>` line each: the
/// input shape [`merge_sorted_counts`] expects.
pub fn write_sorted_counts<W: Write>(
    counts: &ChainHashMap<String, u64>,
    out: W,
) -> Result<(), PersistError> {
    persist::write_pairs(&counts.sorted_pairs(), out)
}

// One source's current line during a merge. Heap order is by word, with
// the source index as a deterministic tie-break.
struct Head {
    word: String,
    count: u64,
    source: usize,
}

impl PartialEq for Head {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word && self.source == other.source
    }
}

impl Eq for Head {}

impl PartialOrd for Head {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Head {
    fn cmp(&self, other: &Self) -> Ordering {
        self.word
            .cmp(&other.word)
            .then(self.source.cmp(&other.source))
    }
}

/// Merge several sorted `<word> <count>` dumps into one sorted stream,
/// summing the counts of words that appear in more than one source.
///
/// Each input must already be sorted by word (the shape
/// [`write_sorted_counts`] produces); the merge itself never builds an
/// in-memory container, it only walks the line format.
pub fn merge_sorted_counts<R, W>(mut sources: Vec<R>, mut out: W) -> Result<(), PersistError>
where
    R: BufRead,
    W: Write,
{
    let mut lines = vec![0usize; sources.len()];
    let mut heap = BinaryHeap::with_capacity(sources.len());
    for index in 0..sources.len() {
        if let Some(head) = next_head(&mut sources[index], &mut lines[index], index)? {
            heap.push(Reverse(head));
        }
    }

    while let Some(Reverse(head)) = heap.pop() {
        let Head {
            word,
            mut count,
            source,
        } = head;
        if let Some(next) = next_head(&mut sources[source], &mut lines[source], source)? {
            heap.push(Reverse(next));
        }
        // fold in every other source currently holding the same word
        loop {
            match heap.peek() {
                Some(Reverse(peek)) if peek.word == word => {}
                _ => break,
            }
            let Reverse(dup) = heap.pop().expect("peeked head exists");
            count += dup.count;
            if let Some(next) = next_head(&mut sources[dup.source], &mut lines[dup.source], dup.source)?
            {
                heap.push(Reverse(next));
            }
        }
        writeln!(out, "{} {}", word, count)?;
    }
    out.flush()?;
    debug!("merged {} sources", sources.len());
    Ok(())
}

fn next_head<R: BufRead>(
    source: &mut R,
    line_no: &mut usize,
    index: usize,
) -> Result<Option<Head>, PersistError> {
    let mut line = String::new();
    if source.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    *line_no += 1;
    let (word, count) = persist::parse_line(line.trim_end(), *line_no)?;
    Ok(Some(Head {
        word,
        count,
        source: index,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_lowercased_and_digit_free() {
        let counts = count_words("The cat, the Cat and 2 dogs; cat42 too");
        assert_eq!(counts.get(&"the".to_string()), Ok(&2));
        assert_eq!(counts.get(&"cat".to_string()), Ok(&2));
        assert_eq!(counts.get(&"and".to_string()), Ok(&1));
        assert!(counts.get(&"cat42".to_string()).is_err());
        assert!(counts.get(&"2".to_string()).is_err());
    }

    #[test]
    fn total_count_matches_sum_of_values() {
        let counts = count_words("a b a c b a");
        assert_eq!(counts.sum_values(), 6);
        assert_eq!(counts.len(), 3);
    }
}
