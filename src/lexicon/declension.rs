//*** START FILE: src/lexicon/declension.rs ***//
//! Combinatorial declension.
//!
//! Every non-empty combination of a part of speech's affix slots is applied
//! to the word, one slot after the other, and every intermediate form along
//! the way is kept. With P slots that is `2^P - 1` combinations, each
//! branching by the number of rules per slot.

use crate::errors::{LexiconError, Result};
use crate::lexicon::compile_regex;
use crate::lexicon::spelling::{translate_replacement, Speller};
use crate::types::affix::{Affix, AffixKind, AffixMap};
use crate::types::lexicon_entry::LexiconEntry;
use crate::types::sound_map::PRIMARY_STRESS;
use regex::Regex;
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A word in one of the shapes the declension engine accepts.
#[derive(Debug, Clone)]
pub enum WordInput {
    /// `english[, english…] : part_of_speech = phonetic [< etymology]`
    Notation(String),
    /// A partial record carrying only the three fields declension needs.
    Fields {
        phonetic: String,
        part_of_speech: String,
        english: String,
    },
    Entry(LexiconEntry),
}

impl WordInput {
    /// Reads a document value: a notation string, a full entry record, or a
    /// `{phonetic, part_of_speech, english}` map.
    pub fn from_value(value: &Value) -> Result<Self> {
        if let Some(text) = value.as_str() {
            return Ok(WordInput::Notation(text.to_string()));
        }
        if let Ok(entry) = serde_json::from_value::<LexiconEntry>(value.clone()) {
            return Ok(WordInput::Entry(entry));
        }
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        match (field("phonetic"), field("part_of_speech"), field("english")) {
            (Some(phonetic), Some(part_of_speech), Some(english)) => Ok(WordInput::Fields {
                phonetic,
                part_of_speech,
                english,
            }),
            _ => Err(LexiconError::UnsupportedWordShape(value.to_string())),
        }
    }
}

/// A word reduced to what declension works from.
struct RootWord {
    phonetic: String,
    part_of_speech: String,
    glosses: Vec<String>,
    derived_word: bool,
    source: Value,
}

/// Splits `english : pos = phonetic < etymology` into its parts.
pub fn parse_word_notation(line: &str) -> Result<(Vec<String>, String, String)> {
    let malformed = || LexiconError::MalformedWord(line.to_string());
    let (english, rest) = line.split_once(':').ok_or_else(malformed)?;
    let (part_of_speech, phonetic) = rest.split_once('=').ok_or_else(malformed)?;
    let phonetic = phonetic.split('<').next().unwrap_or_default().trim();
    let glosses = english.trim().split(',').map(|g| g.trim().to_string()).collect();
    Ok((glosses, part_of_speech.trim().to_string(), phonetic.to_string()))
}

/// What one declension rule does to the phonetic form.
#[derive(Debug, Clone)]
enum Transform {
    Conditional {
        pattern: Regex,
        if_match: String,
        otherwise: String,
    },
    Substitute {
        pattern: Regex,
        replacement: String,
    },
    Add(String),
    Keep,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    declension: String,
    transform: Transform,
}

#[derive(Debug, Clone)]
struct CompiledSlot {
    kind: AffixKind,
    rules: Vec<CompiledRule>,
}

/// One produced form before it is spelled and glossed.
#[derive(Debug, Clone)]
struct Variant {
    phonetic: String,
    declension: Vec<String>,
    part_of_speech: String,
}

/// Declension engine over one affix map. Regexes are compiled once here and
/// shared by every word declined afterwards.
pub struct Decliner<'a> {
    slots: HashMap<String, Vec<CompiledSlot>>,
    speller: &'a Speller,
}

fn compile_rule(kind: AffixKind, declension: &str, affix: &Affix) -> Result<Option<Transform>> {
    let transform = match affix {
        Affix::Conditional { .. } if kind == AffixKind::Replacement => {
            warn!(declension, "conditional affix in a replacement slot is ignored");
            return Ok(None);
        }
        Affix::Conditional {
            pronunciation_regex,
            t_pronunciation_add,
            f_pronunciation_add,
            ..
        } => Transform::Conditional {
            pattern: compile_regex(pronunciation_regex)?,
            if_match: t_pronunciation_add.clone(),
            otherwise: f_pronunciation_add.clone(),
        },
        Affix::Replacement {
            pronunciation_regex,
            pronunciation_replacement,
            ..
        } => Transform::Substitute {
            pattern: compile_regex(pronunciation_regex)?,
            replacement: translate_replacement(pronunciation_replacement),
        },
        Affix::Plain { pronunciation_add, .. } => Transform::Add(pronunciation_add.clone()),
        Affix::Empty {} => Transform::Keep,
    };
    Ok(Some(transform))
}

impl<'a> Decliner<'a> {
    pub fn new(affix_map: &AffixMap, speller: &'a Speller) -> Result<Self> {
        let mut slots = HashMap::with_capacity(affix_map.len());
        for (part_of_speech, affix_slots) in affix_map {
            let mut compiled = Vec::with_capacity(affix_slots.len());
            for slot in affix_slots {
                let mut rules = Vec::with_capacity(slot.rules.len());
                for rule in &slot.rules {
                    if let Some(transform) = compile_rule(slot.kind, &rule.declension, &rule.affix)? {
                        rules.push(CompiledRule {
                            declension: rule.declension.clone(),
                            transform,
                        });
                    }
                }
                compiled.push(CompiledSlot { kind: slot.kind, rules });
            }
            // by slot key; stable, so slots of one kind keep document order
            compiled.sort_by(|a, b| a.kind.as_str().cmp(b.kind.as_str()));
            slots.insert(part_of_speech.clone(), compiled);
        }
        Ok(Decliner { slots, speller })
    }

    pub fn has_rules(&self, part_of_speech: &str) -> bool {
        self.slots.get(part_of_speech).is_some_and(|s| !s.is_empty())
    }

    fn normalize(&self, word: &WordInput, derived_word: bool) -> Result<RootWord> {
        let source_of = |phonetic: &str, english: &str, part_of_speech: &str| {
            LexiconEntry::new(phonetic, &self.speller.spell(phonetic), english, part_of_speech, Vec::new()).as_value()
        };
        let root = match word {
            WordInput::Notation(line) => {
                let (glosses, part_of_speech, phonetic) = parse_word_notation(line)?;
                let first = glosses.first().cloned().unwrap_or_default();
                RootWord {
                    source: source_of(&phonetic, &first, &part_of_speech),
                    phonetic,
                    part_of_speech,
                    glosses,
                    derived_word,
                }
            }
            WordInput::Fields {
                phonetic,
                part_of_speech,
                english,
            } => RootWord {
                source: source_of(phonetic, english, part_of_speech),
                phonetic: phonetic.clone(),
                part_of_speech: part_of_speech.clone(),
                glosses: vec![english.clone()],
                derived_word,
            },
            WordInput::Entry(entry) => RootWord {
                phonetic: entry.phonetic.clone(),
                part_of_speech: entry.part_of_speech.clone(),
                glosses: vec![entry.english.clone()],
                derived_word: entry.derived_word,
                source: entry.as_value(),
            },
        };
        Ok(root)
    }

    /// Every declined form of `word`. A part of speech without affix rules
    /// yields nothing. `derived_word` marks the output as coming from a
    /// derived root; entry input carries its own flag instead.
    pub fn decline(&self, word: &WordInput, derived_word: bool) -> Result<Vec<LexiconEntry>> {
        let root = self.normalize(word, derived_word)?;
        let slots = match self.slots.get(&root.part_of_speech) {
            Some(slots) if !slots.is_empty() => slots,
            _ => {
                debug!(part_of_speech = %root.part_of_speech, "no affix rules, nothing to decline");
                return Ok(Vec::new());
            }
        };

        let mut variants = Vec::new();
        for size in 1..=slots.len() {
            for combination in combinations(slots.len(), size) {
                let chosen: Vec<&CompiledSlot> = combination.iter().map(|&i| &slots[i]).collect();
                expand(&chosen, &root.phonetic, &root.part_of_speech, &[], &mut variants);
            }
        }
        let variants = dedup_variants(variants);

        let metadata = json!({ "source": { "declined_word": root.source } });
        let mut entries = Vec::with_capacity(variants.len() * root.glosses.len());
        for variant in variants {
            let spelled = self.speller.spell(&variant.phonetic);
            for english in &root.glosses {
                entries.push(
                    LexiconEntry::new(
                        &variant.phonetic,
                        &spelled,
                        english,
                        &variant.part_of_speech,
                        variant.declension.clone(),
                    )
                    .with_provenance(root.derived_word, true)
                    .with_metadata(metadata.clone()),
                );
            }
        }
        debug!(phonetic = %root.phonetic, count = entries.len(), "declined word");
        Ok(entries)
    }
}

/// `decline(word, affix_map, sound_map)` without keeping the engine around.
pub fn decline(word: &WordInput, affix_map: &AffixMap, speller: &Speller) -> Result<Vec<LexiconEntry>> {
    Decliner::new(affix_map, speller)?.decline(word, false)
}

/// Index sets of every `size`-combination of `0..n`, in lexicographic order.
fn combinations(n: usize, size: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if size == 0 || size > n {
        return out;
    }
    let mut indices: Vec<usize> = (0..size).collect();
    loop {
        out.push(indices.clone());
        // rightmost index that can still advance
        let Some(pos) = (0..size).rev().find(|&i| indices[i] < n - size + i) else {
            return out;
        };
        indices[pos] += 1;
        for i in pos + 1..size {
            indices[i] = indices[i - 1] + 1;
        }
    }
}

/// Applies `slots[0]` to `phonetic` and recurses into the rest. Deeper forms
/// are pushed before the form of this level.
fn expand(slots: &[&CompiledSlot], phonetic: &str, part_of_speech: &str, prior: &[String], out: &mut Vec<Variant>) {
    let Some((slot, rest)) = slots.split_first() else {
        return;
    };
    if slot.kind == AffixKind::Particle {
        return;
    }
    // affixes attach to the unstressed form; conditions see the form as is
    let stripped = phonetic.strip_prefix(PRIMARY_STRESS).unwrap_or(phonetic);
    let prepend = slot.kind == AffixKind::Prefix;

    for rule in &slot.rules {
        let new_word = match &rule.transform {
            Transform::Conditional {
                pattern,
                if_match,
                otherwise,
            } => {
                let add = if pattern.is_match(phonetic) { if_match } else { otherwise };
                attach(stripped, add, prepend)
            }
            Transform::Substitute { pattern, replacement } => {
                pattern.replace_all(stripped, replacement.as_str()).into_owned()
            }
            Transform::Add(add) => attach(stripped, add, prepend),
            Transform::Keep => phonetic.to_string(),
        };
        let mut declension = prior.to_vec();
        declension.push(rule.declension.clone());
        expand(rest, &new_word, part_of_speech, &declension, out);
        out.push(Variant {
            phonetic: new_word,
            declension,
            part_of_speech: part_of_speech.to_string(),
        });
    }
}

fn attach(stem: &str, add: &str, prepend: bool) -> String {
    if prepend {
        format!("{}{}", add, stem)
    } else {
        format!("{}{}", stem, add)
    }
}

/// Groups variants by phonetic form (first appearance order) and drops a
/// variant when its group already holds one of the same part of speech whose
/// declension sequence agrees with it up to the shorter of the two. So
/// `["Plural"]` absorbs a later `["Plural", "Definite"]` of the same sound.
fn dedup_variants(variants: Vec<Variant>) -> Vec<Variant> {
    let mut groups: Vec<Vec<Variant>> = Vec::new();
    let mut by_phonetic: HashMap<String, usize> = HashMap::new();
    for variant in variants {
        match by_phonetic.get(&variant.phonetic) {
            Some(&i) => {
                let duplicate = groups[i].iter().any(|kept| {
                    kept.part_of_speech == variant.part_of_speech
                        && kept.declension.iter().zip(&variant.declension).all(|(a, b)| a == b)
                });
                if !duplicate {
                    groups[i].push(variant);
                }
            }
            None => {
                by_phonetic.insert(variant.phonetic.clone(), groups.len());
                groups.push(vec![variant]);
            }
        }
    }
    groups.into_iter().flatten().collect()
}

//*** END FILE: src/lexicon/declension.rs ***//
