//*** START FILE: src/lexicon/ordering.rs ***//
//! Alphabetical order for a constructed language.
//!
//! Each spelled character is scored by its position in the language's own
//! alphabet, so digraph-free custom orders (`ö` after `o`, say) sort the way
//! the language's author listed them rather than by code point.

use crate::types::lexicon_entry::LexiconEntry;
use std::cmp::Ordering;
use std::collections::HashMap;

pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnoöpqrstuvwxyz";

/// Sentinels appended after the alphabet proper.
pub const WORD_JOINER: char = '\u{2060}';
pub const SPACE: char = ' ';

const DIACRITIC_FIRST: u32 = 0x0300;
const DIACRITIC_LAST: u32 = 0x036F;
const RADIX: f64 = 100.0;

pub fn is_combining_diacritic(c: char) -> bool {
    (DIACRITIC_FIRST..=DIACRITIC_LAST).contains(&(c as u32))
}

/// The ordering component. Built once per language and shared read-only.
#[derive(Debug, Clone)]
pub struct LexicalOrder {
    list: Vec<String>,
    positions: HashMap<char, usize>,
}

impl LexicalOrder {
    /// Uses `ordered_chars` exactly as given; callers that want the joiner
    /// and space sentinels include them.
    pub fn new(ordered_chars: Vec<String>) -> Self {
        let mut positions = HashMap::new();
        for (i, symbol) in ordered_chars.iter().enumerate() {
            if let Some(base) = symbol.chars().next() {
                positions.entry(base).or_insert(i);
            }
        }
        LexicalOrder {
            list: ordered_chars,
            positions,
        }
    }

    /// One entry per character of `alphabet` (defaulting when blank),
    /// followed by the word-joiner and space sentinels.
    pub fn from_alphabet(alphabet: &str) -> Self {
        let alphabet = alphabet.trim();
        let alphabet = if alphabet.is_empty() { DEFAULT_ALPHABET } else { alphabet };
        let mut list: Vec<String> = alphabet.chars().map(|c| c.to_string()).collect();
        list.push(WORD_JOINER.to_string());
        list.push(SPACE.to_string());
        LexicalOrder::new(list)
    }

    /// The list as stored in the language document (`lexical_order_list`).
    pub fn as_list(&self) -> &[String] {
        &self.list
    }

    /// Score of one logical character: a base symbol and an optional
    /// combining diacritic.
    fn value(&self, base: char, diacritic: Option<char>) -> f64 {
        match self.positions.get(&base) {
            Some(&pos) => {
                let offset = diacritic.map_or(0, |d| d as u32 - DIACRITIC_FIRST);
                (pos as f64) * RADIX + offset as f64
            }
            // after every known symbol, whatever diacritic it carries
            None => ((self.list.len() + 1) as f64) * RADIX,
        }
    }

    /// Numeric sort key of a spelled word. Character k (by offset from the
    /// start) is weighted by 100^-k; stress marks and spaces add nothing.
    pub fn lexical_index(&self, spelled: &str) -> f64 {
        let lowered: Vec<char> = spelled.to_lowercase().chars().collect();
        let mut terms: Vec<(usize, f64)> = Vec::with_capacity(lowered.len());
        let mut offset = 0;
        while offset < lowered.len() {
            let base = lowered[offset];
            let diacritic = lowered.get(offset + 1).copied().filter(|c| is_combining_diacritic(*c));
            if base != 'ˈ' && base != SPACE {
                terms.push((offset, self.value(base, diacritic)));
            }
            offset += if diacritic.is_some() { 2 } else { 1 };
        }
        // Horner from the least significant end keeps the sum stable.
        let mut index = 0.0;
        let mut next_offset = lowered.len();
        for (offset, value) in terms.into_iter().rev() {
            index /= RADIX.powi((next_offset - offset) as i32);
            index += value;
            next_offset = offset;
        }
        index / RADIX.powi(next_offset as i32)
    }

    pub fn cmp_spelled(&self, a: &str, b: &str) -> Ordering {
        self.lexical_index(a).total_cmp(&self.lexical_index(b))
    }

    pub fn cmp_entries(&self, a: &LexiconEntry, b: &LexiconEntry) -> Ordering {
        self.cmp_spelled(&a.spelled, &b.spelled)
    }

    pub fn less_than(&self, a: &LexiconEntry, b: &LexiconEntry) -> bool {
        self.cmp_entries(a, b) == Ordering::Less
    }

    pub fn greater_than(&self, a: &LexiconEntry, b: &LexiconEntry) -> bool {
        self.cmp_entries(a, b) == Ordering::Greater
    }

    /// `<` or value-equal. Sort ties that are not value-equal answer false.
    pub fn less_or_equal(&self, a: &LexiconEntry, b: &LexiconEntry) -> bool {
        self.less_than(a, b) || a == b
    }

    pub fn greater_or_equal(&self, a: &LexiconEntry, b: &LexiconEntry) -> bool {
        self.greater_than(a, b) || a == b
    }

    /// Stable sort by lexical index; ties keep their input order.
    pub fn sort_entries(&self, entries: &mut [LexiconEntry]) {
        let mut keyed: Vec<(f64, usize)> = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (self.lexical_index(&e.spelled), i))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        let mut sorted: Vec<LexiconEntry> = keyed.iter().map(|&(_, i)| entries[i].clone()).collect();
        entries.swap_with_slice(&mut sorted);
    }
}

impl Default for LexicalOrder {
    fn default() -> Self {
        LexicalOrder::from_alphabet(DEFAULT_ALPHABET)
    }
}

//*** END FILE: src/lexicon/ordering.rs ***//
