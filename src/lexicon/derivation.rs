//*** START FILE: src/lexicon/derivation.rs ***//
//! Word formation from existing roots.
//!
//! A rule reads `english[, english…] : pos = part part …`, where each part
//! names a root by gloss (spaces written as `_`), optionally narrowed by
//! `:pos` and extended by a `-TAG` derivational affix. The parts' phonetic
//! forms are concatenated into the new root.

use crate::errors::{LexiconError, Result};
use crate::lexicon::declension::{Decliner, WordInput};
use crate::lexicon::compile_regex;
use crate::lexicon::spelling::{translate_replacement, Speller};
use crate::types::affix::{Affix, AffixMap, AffixPosition, DerivationalAffix, DerivationalAffixMap};
use crate::types::lexicon_entry::LexiconEntry;
use regex::Regex;
use serde_json::json;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, info};

/// Collapses every noun tag (gendered or not) to `n`; numerals stay `num`.
pub fn coarse_part_of_speech(part_of_speech: &str) -> String {
    let part_of_speech = part_of_speech.trim();
    if part_of_speech.starts_with('n') && part_of_speech != "num" {
        "n".to_string()
    } else {
        part_of_speech.to_string()
    }
}

/// Gloss as written in derivation rules.
pub fn gloss_key(english: &str) -> String {
    english.replace(' ', "_")
}

/// Insertion-ordered map; re-inserting a key replaces the value in place.
#[derive(Debug)]
struct OrderedIndex<K> {
    keys: Vec<K>,
    entries: Vec<LexiconEntry>,
    positions: HashMap<K, usize>,
}

impl<K: Clone + Eq + Hash> OrderedIndex<K> {
    fn new() -> Self {
        OrderedIndex {
            keys: Vec::new(),
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn insert(&mut self, key: K, entry: LexiconEntry) {
        match self.positions.get(&key) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.positions.insert(key.clone(), self.keys.len());
                self.keys.push(key);
                self.entries.push(entry);
            }
        }
    }

    fn get(&self, key: &K) -> Option<&LexiconEntry> {
        self.positions.get(key).map(|&i| &self.entries[i])
    }

    fn find(&self, predicate: impl Fn(&K) -> bool) -> Option<&LexiconEntry> {
        self.keys.iter().position(predicate).map(|i| &self.entries[i])
    }
}

/// Root words by gloss and by (gloss, coarse part of speech).
#[derive(Debug)]
struct WordIndex {
    by_gloss: OrderedIndex<String>,
    by_pair: OrderedIndex<(String, String)>,
}

impl WordIndex {
    fn new(lexicon: &[LexiconEntry]) -> Self {
        let mut index = WordIndex {
            by_gloss: OrderedIndex::new(),
            by_pair: OrderedIndex::new(),
        };
        for entry in lexicon.iter().filter(|e| e.is_root()) {
            index.register(entry);
        }
        index
    }

    fn register(&mut self, entry: &LexiconEntry) {
        let key = gloss_key(&entry.english);
        self.by_pair
            .insert((key.clone(), coarse_part_of_speech(&entry.part_of_speech)), entry.clone());
        self.by_gloss.insert(key, entry.clone());
    }

    /// Exact gloss first, then the first gloss starting with `word`.
    fn resolve(&self, word: &str, part_of_speech: Option<&str>) -> Result<&LexiconEntry> {
        let found = match part_of_speech {
            Some(pos) => {
                let pair = (word.to_string(), pos.to_string());
                self.by_pair
                    .get(&pair)
                    .or_else(|| self.by_pair.find(|(gloss, p)| gloss.starts_with(word) && p == pos))
            }
            None => self
                .by_gloss
                .get(&word.to_string())
                .or_else(|| self.by_gloss.find(|gloss| gloss.starts_with(word))),
        };
        found.ok_or_else(|| LexiconError::UnresolvedWord {
            word: word.to_string(),
            part_of_speech: part_of_speech.map(str::to_string),
        })
    }
}

/// One right-hand-side part: `word[:pos][-TAG]` (the two suffixes in either order).
#[derive(Debug, PartialEq)]
struct Component<'t> {
    word: &'t str,
    part_of_speech: Option<String>,
    affix: Option<&'t str>,
}

fn parse_component(token: &str) -> Component<'_> {
    let (mut word, mut affix) = match token.split_once('-') {
        Some((word, affix)) => (word, Some(affix)),
        None => (token, None),
    };
    let mut part_of_speech = None;
    if let Some((tag, pos)) = affix.and_then(|a| a.split_once(':')) {
        affix = Some(tag);
        part_of_speech = Some(pos);
    }
    if let Some((w, pos)) = word.split_once(':') {
        word = w;
        part_of_speech = Some(pos);
    }
    Component {
        word: word.trim(),
        part_of_speech: part_of_speech.map(coarse_part_of_speech),
        affix: affix.map(str::trim),
    }
}

const HYPHENATED_WORDS: &str = r"([a-z]+)-([a-z]+)";

/// Splits a rule's right-hand side into components. Hyphens between two
/// lowercase words separate words; a hyphen before a tag attaches an affix.
fn tokenize(hyphenated: &Regex, rhs: &str) -> Vec<String> {
    hyphenated
        .replace_all(rhs, "${1} ${2}")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Derivation engine over one derivational affix map.
pub struct Deriver<'a> {
    affixes: &'a DerivationalAffixMap,
    patterns: HashMap<String, Regex>,
    hyphenated: Regex,
    speller: &'a Speller,
}

impl<'a> Deriver<'a> {
    pub fn new(affixes: &'a DerivationalAffixMap, speller: &'a Speller) -> Result<Self> {
        let mut patterns = HashMap::new();
        for affix in affixes.values() {
            if let Some(pattern) = affix.rule.pronunciation_regex() {
                if !patterns.contains_key(pattern) {
                    patterns.insert(pattern.to_string(), compile_regex(pattern)?);
                }
            }
        }
        Ok(Deriver {
            affixes,
            patterns,
            hyphenated: compile_regex(HYPHENATED_WORDS)?,
            speller,
        })
    }

    fn apply_affix(&self, affix: &DerivationalAffix, phonetic: &str) -> String {
        let prepend = affix.position == AffixPosition::Prefix;
        let add = match &affix.rule {
            Affix::Conditional {
                pronunciation_regex,
                t_pronunciation_add,
                f_pronunciation_add,
                ..
            } => {
                let matched = self.patterns.get(pronunciation_regex).is_some_and(|r| r.is_match(phonetic));
                if matched { t_pronunciation_add } else { f_pronunciation_add }
            }
            Affix::Plain { pronunciation_add, .. } => pronunciation_add,
            Affix::Replacement {
                pronunciation_regex,
                pronunciation_replacement,
                ..
            } => {
                return match self.patterns.get(pronunciation_regex) {
                    Some(regex) => regex
                        .replace_all(phonetic, translate_replacement(pronunciation_replacement))
                        .into_owned(),
                    None => phonetic.to_string(),
                };
            }
            Affix::Empty {} => return phonetic.to_string(),
        };
        if prepend {
            format!("{}{}", add, phonetic)
        } else {
            format!("{}{}", phonetic, add)
        }
    }

    /// Phonetic form of one rule's right-hand side.
    fn build_phonetic(&self, rhs: &str, index: &WordIndex) -> Result<String> {
        let mut phonetic = String::new();
        for token in tokenize(&self.hyphenated, rhs) {
            let component = parse_component(&token);
            let affix = match component.affix {
                Some(tag) => Some(
                    self.affixes
                        .get(tag)
                        .ok_or_else(|| LexiconError::UnknownDerivationalAffix(tag.to_string()))?,
                ),
                None => None,
            };
            let root = index.resolve(component.word, component.part_of_speech.as_deref())?;
            let part = match affix {
                Some(affix) => self.apply_affix(affix, &root.phonetic),
                None => root.phonetic.clone(),
            };
            phonetic.push_str(&part);
        }
        Ok(phonetic)
    }

    /// Builds the new roots for `rules`, in order. Each new root is visible
    /// to the rules after it. With a decliner, each root is followed by its
    /// declined forms.
    pub fn derive(
        &self,
        rules: &[String],
        lexicon: &[LexiconEntry],
        decliner: Option<&Decliner<'_>>,
    ) -> Result<Vec<LexiconEntry>> {
        let mut index = WordIndex::new(lexicon);
        let mut derived = Vec::new();
        let mut roots = 0;

        for line in rules {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || LexiconError::MalformedDerivation(line.to_string());
            let (lhs, rhs) = line.split_once('=').ok_or_else(malformed)?;
            let (english, part_of_speech) = lhs.split_once(':').ok_or_else(malformed)?;
            let phonetic = self.build_phonetic(rhs, &index)?;
            if phonetic.is_empty() {
                return Err(malformed());
            }
            let spelled = self.speller.spell(&phonetic);
            debug!(rule = line, %phonetic, %spelled, "derived word");

            for gloss in english.split(',') {
                let entry = LexiconEntry::root(&phonetic, &spelled, gloss, part_of_speech)
                    .with_provenance(true, false)
                    .with_metadata(json!({ "source": { "derived_word": line } }));
                index.register(&entry);
                roots += 1;
                if let Some(decliner) = decliner {
                    let family = decliner.decline(&WordInput::Entry(entry.clone()), true)?;
                    derived.push(entry);
                    derived.extend(family);
                } else {
                    derived.push(entry);
                }
            }
        }
        info!(roots, entries = derived.len(), "derived words");
        Ok(derived)
    }
}

/// `derive(rules, derivational_affix_map, lexicon, affix_map, sound_map, also_decline)`.
pub fn derive(
    rules: &[String],
    affixes: &DerivationalAffixMap,
    lexicon: &[LexiconEntry],
    affix_map: &AffixMap,
    speller: &Speller,
    also_decline: bool,
) -> Result<Vec<LexiconEntry>> {
    let deriver = Deriver::new(affixes, speller)?;
    if also_decline {
        let decliner = Decliner::new(affix_map, speller)?;
        deriver.derive(rules, lexicon, Some(&decliner))
    } else {
        deriver.derive(rules, lexicon, None)
    }
}

//*** END FILE: src/lexicon/derivation.rs ***//
