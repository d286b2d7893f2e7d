//*** START FILE: src/parsing/grammar_table.rs ***//
//! Walks the grammar document's instruction lines and builds the affix map.
//!
//! ```text
//! TABLE TYPE = affix
//! part-of-speech = n
//! rows = Nominative/Accusative
//! cols = Singular/Plural
//! N.S ~ -
//! N.P ~ -s
//! A.S ~ -m
//! A.P ~ -ms
//! ```
//!
//! A table ends at the next `TABLE TYPE`, at a `part-of-speech` line once
//! cells have been read, or at the end of the document. Particle rules
//! become lexicon entries rather than affix slots.

use crate::errors::{LexiconError, Result};
use crate::lexicon::compile_regex;
use crate::parsing::affix_rules::AffixRuleCompiler;
use crate::types::affix::{Affix, AffixKind, AffixMap, AffixSlot, DeclensionRule};
use crate::types::lexicon_entry::LexiconEntry;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Part of speech given to particle entries.
pub const PARTICLE_PART_OF_SPEECH: &str = "Special";

/// Output of the grammar tables: combinable affix slots per part of speech,
/// plus the entries the tables define directly (particles and word tables).
#[derive(Debug, Clone, Default)]
pub struct GrammarTables {
    pub affix_map: AffixMap,
    pub entries: Vec<LexiconEntry>,
}

/// `1` -> `1st`, `2` -> `2nd`, `3` -> `3rd`, other digits take `th`.
pub fn number_word(digit: &str) -> String {
    match digit.trim() {
        "1" => "1st".to_string(),
        "2" => "2nd".to_string(),
        "3" => "3rd".to_string(),
        other => format!("{}th", other),
    }
}

/// Upper-case letters of a label, with spaces turned into `.`.
fn abbreviate(label: &str) -> String {
    let mut abbreviation = String::new();
    for c in label.chars() {
        if c == ' ' {
            abbreviation.push('.');
        } else if c.to_uppercase().eq(std::iter::once(c)) {
            abbreviation.push(c);
        }
    }
    abbreviation.trim_end_matches('.').trim().to_string()
}

/// First letter upper case, the rest lower case.
pub(crate) fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Which slot the rules read so far belong to. `Pending` holds empty cells
/// seen before the table's first real rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Pending,
    Kind(AffixKind),
}

struct TableState {
    table_type: String,
    part_of_speech: String,
    declensions: HashMap<String, String>,
    working: Vec<(Bucket, Vec<DeclensionRule>)>,
    current: Option<Bucket>,
    last: Bucket,
}

impl TableState {
    fn new() -> Self {
        TableState {
            table_type: String::new(),
            part_of_speech: String::new(),
            declensions: HashMap::new(),
            working: Vec::new(),
            current: None,
            last: Bucket::Pending,
        }
    }

    fn reset_rules(&mut self) {
        self.working.clear();
        self.declensions.clear();
        self.current = None;
        self.last = Bucket::Pending;
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<DeclensionRule> {
        let index = match self.working.iter().position(|(b, _)| *b == bucket) {
            Some(index) => index,
            None => {
                self.working.push((bucket, Vec::new()));
                self.working.len() - 1
            }
        };
        &mut self.working[index].1
    }

    /// Files one compiled cell. Empty cells follow the previous cell's kind;
    /// empties at the start of a table wait for the first real kind.
    fn add_rule(&mut self, kind: Option<AffixKind>, rule: DeclensionRule) {
        if let Some(current) = self.current {
            self.last = current;
        }
        let bucket = match kind {
            None => self.last,
            Some(kind) => {
                let bucket = Bucket::Kind(kind);
                if self.last == Bucket::Pending {
                    if let Some(pending) = self.working.iter_mut().find(|(b, _)| *b == Bucket::Pending) {
                        pending.0 = bucket;
                    }
                }
                bucket
            }
        };
        self.current = Some(bucket);
        self.bucket_mut(bucket).push(rule);
    }
}

struct Directives {
    cell: Regex,
    ordinal: Regex,
    ordinal_label: Regex,
}

/// Builds the affix map and table-defined entries from grammar instructions.
/// `parts_of_speech` is every tag the word list uses; rules for the generic
/// noun tag `n` are copied to each noun tag in it.
pub fn compile_affix_table(
    instructions: &[String],
    parts_of_speech: &BTreeSet<String>,
    compiler: &AffixRuleCompiler<'_>,
) -> Result<GrammarTables> {
    let directives = Directives {
        cell: compile_regex(r"^\s*[0-9A-Z.]+\s+~\s+.*$")?,
        ordinal: compile_regex(r"^\s*(\d)\w+\s*$")?,
        ordinal_label: compile_regex(r"^\s*(\d)\w+\s+(\w+.*)\s*$")?,
    };
    let noun_tags: Vec<String> = parts_of_speech
        .iter()
        .filter(|pos| pos.starts_with('n') && pos.as_str() != "num")
        .cloned()
        .collect();

    let mut tables = GrammarTables::default();
    let mut state = TableState::new();

    for raw in instructions {
        let line = raw.trim();
        if line.starts_with("TABLE TYPE") {
            flush(&mut state, &noun_tags, compiler, &mut tables);
            state.reset_rules();
            state.table_type = value_of(line).to_string();
            state.part_of_speech.clear();
            debug!(table_type = %state.table_type, "grammar table");
        } else if line.starts_with("rows") || line.starts_with("cols") || line.starts_with("blocks") {
            for label in value_of(line).split('/') {
                add_declension_label(&directives, label, &mut state.declensions);
            }
        } else if line.starts_with("part-of-speech") {
            if !state.working.is_empty() {
                flush(&mut state, &noun_tags, compiler, &mut tables);
                state.reset_rules();
            }
            state.part_of_speech = value_of(line).to_string();
            if state.part_of_speech == "pron" {
                // person is implied for pronoun tables
                for digit in ["1", "2", "3"] {
                    state
                        .declensions
                        .insert(digit.to_string(), format!("{} Person", number_word(digit)));
                }
            }
        } else if directives.cell.is_match(line) {
            read_cell(line, &mut state, compiler, &mut tables)?;
        }
    }
    flush(&mut state, &noun_tags, compiler, &mut tables);

    info!(
        parts_of_speech = tables.affix_map.len(),
        entries = tables.entries.len(),
        "compiled grammar tables"
    );
    Ok(tables)
}

/// Text after the first `=`, trimmed; empty without one.
fn value_of(line: &str) -> &str {
    line.split_once('=').map(|(_, value)| value.trim()).unwrap_or_default()
}

fn add_declension_label(directives: &Directives, label: &str, declensions: &mut HashMap<String, String>) {
    if let Some(caps) = directives.ordinal.captures(label) {
        declensions.insert(caps[1].to_string(), number_word(&caps[1]));
    } else if let Some(caps) = directives.ordinal_label.captures(label) {
        declensions.insert(caps[1].to_string(), number_word(&caps[1]));
        let rest = caps[2].trim();
        declensions.insert(abbreviate(rest), capitalize(rest));
    } else {
        let label = label.trim();
        declensions.insert(abbreviate(label), capitalize(label));
    }
}

/// Resolves a dotted abbreviation path, longest known prefix first, into
/// declension names joined by spaces.
fn resolve_declension(path: &str, declensions: &HashMap<String, String>, line: &str) -> Result<String> {
    let parts: Vec<&str> = path.split('.').filter(|p| !p.is_empty()).collect();
    let mut names: Vec<&str> = Vec::new();
    let mut start = 0;
    while start < parts.len() {
        let found = (start + 1..=parts.len())
            .rev()
            .find_map(|end| declensions.get(&parts[start..end].join(".")).map(|name| (end, name)));
        match found {
            Some((end, name)) => {
                names.push(name);
                start = end;
            }
            None => {
                return Err(LexiconError::UnmappedDeclension {
                    abbreviation: parts[start..].join("."),
                    line: line.to_string(),
                })
            }
        }
    }
    Ok(names.join(" "))
}

fn read_cell(
    line: &str,
    state: &mut TableState,
    compiler: &AffixRuleCompiler<'_>,
    tables: &mut GrammarTables,
) -> Result<()> {
    let Some((path, content)) = line.split_once('~') else {
        return Ok(());
    };
    let declension = resolve_declension(path.trim(), &state.declensions, line)?;

    let table_type = state.table_type.clone();
    match table_type.as_str() {
        "affix" | "prefix" | "postfix" => {
            let rule_text = match content.split_once('=') {
                Some((_, rule)) => rule.split('=').next().unwrap_or_default().trim(),
                None => content.trim(),
            };
            let (kind, affix) = compiler.compile(rule_text)?;
            state.add_rule(kind, DeclensionRule::new(declension, affix));
        }
        "word" => {
            let (english, phonetic) = content
                .split_once('=')
                .ok_or_else(|| LexiconError::MalformedWord(line.to_string()))?;
            if state.part_of_speech.is_empty() {
                return Err(LexiconError::MissingPartOfSpeech(line.to_string()));
            }
            let phonetic = phonetic.split('=').next().unwrap_or_default().trim();
            let spelled = compiler.speller().spell(phonetic);
            tables.entries.push(LexiconEntry::new(
                phonetic,
                &spelled,
                english,
                &state.part_of_speech,
                vec![declension],
            ));
        }
        other => debug!(table_type = other, line, "cell outside an affix or word table"),
    }
    Ok(())
}

/// Moves the finished table into the affix map and emits its particles.
fn flush(state: &mut TableState, noun_tags: &[String], compiler: &AffixRuleCompiler<'_>, tables: &mut GrammarTables) {
    if state.working.is_empty() {
        return;
    }
    let part_of_speech = state.part_of_speech.clone();
    if part_of_speech.is_empty() {
        warn!(table_type = %state.table_type, "affix table without part of speech");
    }
    let targets: Vec<String> = if part_of_speech == "n" {
        if noun_tags.is_empty() {
            warn!("noun affix table but no noun words");
        }
        noun_tags.to_vec()
    } else {
        vec![part_of_speech]
    };
    for target in &targets {
        tables.affix_map.entry(target.clone()).or_default();
    }

    for (bucket, rules) in state.working.drain(..) {
        let kind = match bucket {
            Bucket::Kind(kind) => kind,
            // only empty cells: the word is used unchanged
            Bucket::Pending => AffixKind::Suffix,
        };
        if kind == AffixKind::Particle {
            for rule in &rules {
                particle_entries(rule, compiler, &mut tables.entries);
            }
            continue;
        }
        for target in &targets {
            tables
                .affix_map
                .entry(target.clone())
                .or_default()
                .push(AffixSlot::new(kind, rules.clone()));
        }
    }
}

fn particle_entry(phonetic: &str, spelled: &str, label: &str) -> LexiconEntry {
    LexiconEntry::new(
        phonetic,
        spelled,
        &format!("<{} Particle>", label),
        PARTICLE_PART_OF_SPEECH,
        vec![label.to_string()],
    )
}

fn particle_entries(rule: &DeclensionRule, compiler: &AffixRuleCompiler<'_>, entries: &mut Vec<LexiconEntry>) {
    let declension = &rule.declension;
    match &rule.affix {
        Affix::Conditional {
            pronunciation_regex,
            t_pronunciation_add,
            t_spelling_add,
            f_pronunciation_add,
            f_spelling_add,
            ..
        } => {
            let (if_match, otherwise) = if pronunciation_regex.contains(&compiler.patterns().ipa.vowel) {
                ("Vowel", "Consonant")
            } else {
                ("Consonant", "Vowel")
            };
            entries.push(particle_entry(
                t_pronunciation_add,
                t_spelling_add,
                &format!("{} {}", if_match, declension),
            ));
            entries.push(particle_entry(
                f_pronunciation_add,
                f_spelling_add,
                &format!("{} {}", otherwise, declension),
            ));
        }
        Affix::Plain {
            pronunciation_add,
            spelling_add,
        } => entries.push(particle_entry(pronunciation_add, spelling_add, declension)),
        Affix::Empty {} => {}
        Affix::Replacement { .. } => warn!(%declension, "replacement rule cannot be a particle"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::spelling::Speller;
    use crate::parsing::phonology::PhonePatterns;
    use crate::types::sound_map::SoundMap;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(|l| l.to_string()).collect()
    }

    fn pos(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|s| s.to_string()).collect()
    }

    fn run(text: &str, tags: &[&str]) -> Result<GrammarTables> {
        let patterns = PhonePatterns::default();
        let speller = Speller::new(&[SoundMap::literal("ʃ", "sh")]).unwrap();
        let compiler = AffixRuleCompiler::new(&patterns, &speller).unwrap();
        compile_affix_table(&lines(text), &pos(tags), &compiler)
    }

    #[test]
    fn labels_and_names() {
        assert_eq!(abbreviate("Nominative"), "N");
        assert_eq!(abbreviate("First Person"), "F.P");
        assert_eq!(capitalize("first Person"), "First person");
        assert_eq!(number_word("2"), "2nd");
        assert_eq!(number_word("7"), "7th");
    }

    #[test]
    fn noun_table_is_copied_to_every_noun_tag() {
        let tables = run(
            "TABLE TYPE = affix\npart-of-speech = n\ncols = Singular/Plural\nS ~ -\nP ~ -s",
            &["n", "nm", "nf", "num", "v"],
        )
        .unwrap();
        let keys: Vec<&str> = tables.affix_map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["n", "nf", "nm"]);
        let slots = &tables.affix_map["nm"];
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].kind, AffixKind::Suffix);
        let labels: Vec<&str> = slots[0].rules.iter().map(|r| r.declension.as_str()).collect();
        assert_eq!(labels, vec!["Singular", "Plural"]);
        assert!(slots[0].rules[0].affix.is_empty());
    }

    #[test]
    fn composite_declension_names() {
        let tables = run(
            "TABLE TYPE = affix\npart-of-speech = v\nrows = Past/Present\ncols = First Person/Second Person\nP.F.P ~ -a\nP.S.P ~ -b",
            &["v"],
        )
        .unwrap();
        // `P` means Present: the later label with the same abbreviation wins
        let rules = &tables.affix_map["v"][0].rules;
        assert_eq!(rules[0].declension, "Present First person");
        assert_eq!(rules[1].declension, "Present Second person");
    }

    #[test]
    fn part_of_speech_line_ends_a_table() {
        let tables = run(
            "TABLE TYPE = affix\npart-of-speech = v\ncols = Past\nP ~ -d\npart-of-speech = adj\ncols = Comparative\nC ~ -er",
            &["v", "adj"],
        )
        .unwrap();
        assert_eq!(tables.affix_map["v"][0].rules[0].declension, "Past");
        assert_eq!(tables.affix_map["adj"][0].rules[0].declension, "Comparative");
        assert_eq!(tables.affix_map["adj"].len(), 1);
    }

    #[test]
    fn leading_empty_cells_join_the_first_kind() {
        let tables = run(
            "TABLE TYPE = affix\npart-of-speech = v\ncols = Present/Past/Future\nP ~ -\nP.A ~ -\nF ~ ʃa-",
            &["v"],
        );
        // `P.A` is not a label, `Past` abbreviates to `P` as well
        assert!(matches!(tables, Err(LexiconError::UnmappedDeclension { .. })));

        let tables = run(
            "TABLE TYPE = affix\npart-of-speech = v\ncols = Present/Future\nP ~ -\nF ~ ʃa-",
            &["v"],
        )
        .unwrap();
        let slots = &tables.affix_map["v"];
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].kind, AffixKind::Prefix);
        assert_eq!(slots[0].rules.len(), 2);
    }

    #[test]
    fn particles_become_entries() {
        let tables = run(
            "TABLE TYPE = affix\npart-of-speech = n\ncols = Definite/Indefinite\nD ~ ʃa -\nI ~ IF #V THEN n - ELSE na -",
            &["n"],
        )
        .unwrap();
        assert!(tables.affix_map["n"].is_empty());
        let glosses: Vec<&str> = tables.entries.iter().map(|e| e.english.as_str()).collect();
        assert_eq!(
            glosses,
            vec!["<Definite Particle>", "<Vowel Indefinite Particle>", "<Consonant Indefinite Particle>"]
        );
        assert_eq!(tables.entries[0].phonetic, "ʃa");
        assert_eq!(tables.entries[0].spelled, "sha");
        assert_eq!(tables.entries[0].part_of_speech, PARTICLE_PART_OF_SPEECH);
        assert_eq!(tables.entries[1].phonetic, "n");
    }

    #[test]
    fn pronoun_tables_know_person() {
        let tables = run(
            "TABLE TYPE = word\npart-of-speech = pron\ncols = Singular/Plural\n1.S ~ I = ʃi\n3.P ~ they = ʃe",
            &["pron"],
        )
        .unwrap();
        assert_eq!(tables.entries.len(), 2);
        assert_eq!(tables.entries[0].english, "I");
        assert_eq!(tables.entries[0].spelled, "shi");
        assert_eq!(tables.entries[0].declension, vec!["1st Person Singular"]);
        assert_eq!(tables.entries[1].declension, vec!["3rd Person Plural"]);
    }

    #[test]
    fn ordinal_labels() {
        let tables = run(
            "TABLE TYPE = affix\npart-of-speech = v\nrows = 1st/2nd Person\n1 ~ -a\n2.P ~ -b",
            &["v"],
        )
        .unwrap();
        let rules = &tables.affix_map["v"][0].rules;
        assert_eq!(rules[0].declension, "1st");
        assert_eq!(rules[1].declension, "2nd Person");
    }

    #[test]
    fn word_table_without_part_of_speech_is_fatal() {
        let err = run("TABLE TYPE = word\ncols = Singular\nS ~ I = ʃi", &[]).unwrap_err();
        assert!(matches!(err, LexiconError::MissingPartOfSpeech(_)));
    }

    #[test]
    fn unmapped_abbreviation_is_fatal() {
        let err = run("TABLE TYPE = affix\npart-of-speech = v\ncols = Past\nX ~ -d", &["v"]).unwrap_err();
        assert!(matches!(err, LexiconError::UnmappedDeclension { ref abbreviation, .. } if abbreviation == "X"));
    }
}
//*** END FILE: src/parsing/grammar_table.rs ***//
