//*** START FILE: src/parsing/word_list.rs ***//
//! Root words and derivational affixes from the save's plain-text lists.

use crate::errors::Result;
use crate::lexicon::compile_regex;
use crate::lexicon::declension::parse_word_notation;
use crate::lexicon::ordering::WORD_JOINER;
use crate::lexicon::spelling::Speller;
use crate::parsing::affix_rules::AffixRuleCompiler;
use crate::types::affix::DerivationalAffixMap;
use crate::types::lexicon_entry::LexiconEntry;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Rewrites `(a, b)` as `(a; b)` so parenthesized notes survive the
/// comma split of a gloss list.
pub fn protect_parenthesized_commas(text: &str) -> Result<String> {
    let commas = compile_regex(r"(\(\s*\w+\s*),(\s*\w+\s*\))")?;
    Ok(commas.replace_all(text, "${1};${2}").into_owned())
}

/// Splits a list field into lines, skipping blank ones.
pub fn list_lines(text: &str) -> Result<Vec<String>> {
    Ok(protect_parenthesized_commas(text)?
        .split('\n')
        .map(|line| line.replace(WORD_JOINER, ""))
        .filter(|line| !line.trim().is_empty())
        .collect())
}

/// Every part of speech tag the word list uses.
pub fn part_of_speech_set(lines: &[String]) -> Result<BTreeSet<String>> {
    let mut tags = BTreeSet::new();
    for line in lines {
        let (_, part_of_speech, _) = parse_word_notation(line)?;
        tags.insert(part_of_speech);
    }
    Ok(tags)
}

/// One root entry per gloss of every `english[, …] : pos = phonetic` line.
pub fn parse_word_list(lines: &[String], speller: &Speller) -> Result<Vec<LexiconEntry>> {
    let mut entries = Vec::new();
    for line in lines {
        let (glosses, part_of_speech, phonetic) = parse_word_notation(line)?;
        let spelled = speller.spell(&phonetic);
        for gloss in &glosses {
            entries.push(LexiconEntry::root(&phonetic, &spelled, gloss, &part_of_speech));
        }
    }
    info!(lines = lines.len(), entries = entries.len(), "parsed word list");
    Ok(entries)
}

pub fn parse_derivational_affixes(lines: &[String], compiler: &AffixRuleCompiler<'_>) -> Result<DerivationalAffixMap> {
    let mut affixes = DerivationalAffixMap::new();
    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        let (tag, affix) = compiler.compile_derivational(line)?;
        debug!(%tag, "derivational affix");
        affixes.insert(tag, affix);
    }
    Ok(affixes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LexiconError;
    use crate::parsing::phonology::PhonePatterns;
    use crate::types::affix::AffixPosition;
    use crate::types::sound_map::SoundMap;

    #[test]
    fn commas_inside_parentheses_are_kept() {
        let text = "bank (river, edge), shore : n = ʃor";
        assert_eq!(
            protect_parenthesized_commas(text).unwrap(),
            "bank (river; edge), shore : n = ʃor"
        );
    }

    #[test]
    fn word_lines_become_roots() {
        let speller = Speller::new(&[SoundMap::literal("ʃ", "sh")]).unwrap();
        let lines = list_lines("dog, hound : n = ʃa\u{2060}ko < old ʃako\n\nrun : v = ti\n").unwrap();
        assert_eq!(lines.len(), 2);
        let entries = parse_word_list(&lines, &speller).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].english, "dog");
        assert_eq!(entries[1].english, "hound");
        assert_eq!(entries[1].phonetic, "ʃako");
        assert_eq!(entries[1].spelled, "shako");
        assert!(entries[2].is_root());

        let tags: Vec<String> = part_of_speech_set(&lines).unwrap().into_iter().collect();
        assert_eq!(tags, vec!["n", "v"]);
    }

    #[test]
    fn word_line_without_part_of_speech_fails() {
        let speller = Speller::new(&[]).unwrap();
        let err = parse_word_list(&["dog = ʃa".to_string()], &speller).unwrap_err();
        assert!(matches!(err, LexiconError::MalformedWord(_)));
    }

    #[test]
    fn derivational_affix_list() {
        let patterns = PhonePatterns::default();
        let speller = Speller::new(&[]).unwrap();
        let compiler = AffixRuleCompiler::new(&patterns, &speller).unwrap();
        let lines = vec!["AUG = -on".to_string(), "  ".to_string(), "NEG = ne-".to_string()];
        let affixes = parse_derivational_affixes(&lines, &compiler).unwrap();
        assert_eq!(affixes.len(), 2);
        assert_eq!(affixes["NEG"].position, AffixPosition::Prefix);
    }
}
//*** END FILE: src/parsing/word_list.rs ***//
