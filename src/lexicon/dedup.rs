//*** START FILE: src/lexicon/dedup.rs ***//
use crate::types::lexicon_entry::LexiconEntry;
use std::collections::HashSet;

/// Drops value-equal entries, keeping the first occurrence of each. Running
/// it again on its own output changes nothing.
pub fn dedup_lexicon(entries: Vec<LexiconEntry>) -> Vec<LexiconEntry> {
    let mut seen: HashSet<LexiconEntry> = HashSet::with_capacity(entries.len());
    let mut kept = Vec::with_capacity(entries.len());
    for entry in entries {
        if seen.insert(entry.clone()) {
            kept.push(entry);
        }
    }
    kept
}

//*** END FILE: src/lexicon/dedup.rs ***//
