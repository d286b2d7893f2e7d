//*** START FILE: src/parsing/spelling_rules.rs ***//
//! Compiles spelling rule notation into the ordered sound map.
//!
//! Supported line shapes:
//!
//! ```text
//! / comment
//! ʃ > sh                  literal
//! t{s,ʃ} > ch             braced alternation, one rule per member
//! a(ː) > aa               optional tail, long form first
//! Vː > VV                 doubled class
//! Cʲ > Cy                 class followed by a replacement letter
//! ŋ > ng / _#             context-conditioned (see `sound_change`)
//! ```

use crate::errors::{LexiconError, Result};
use crate::lexicon::compile_regex;
use crate::parsing::phonology::{CharClass, PhonePatterns};
use crate::types::sound_map::SoundMap;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

/// Sound map plus the classes learnt while building it.
#[derive(Debug, Clone)]
pub struct CompiledSpelling {
    pub sound_map: Vec<SoundMap>,
    pub patterns: PhonePatterns,
}

struct Notation {
    comment: Regex,
    group: Regex,
    braced_with_prefix: Regex,
    braced: Regex,
    optional_tail: Regex,
    class_phoneme: Regex,
    class_roman: Regex,
    followed_by: Regex,
    not_followed_by: Regex,
    preceded_at_end: Regex,
}

impl Notation {
    fn new() -> Result<Self> {
        Ok(Notation {
            comment: compile_regex(r"^\s*/")?,
            group: compile_regex(r"^([VC])(.+?)\s*>\s*(.*)$")?,
            braced_with_prefix: compile_regex(r"^(\S+)\{(.*)\}")?,
            braced: compile_regex(r"^\s*\{(.*)\}")?,
            optional_tail: compile_regex(r"^\s*(\S+)\s*\(\s*(\S+)\s*\)\s*$")?,
            class_phoneme: compile_regex(r"^(\S+)([CV])")?,
            class_roman: compile_regex(r"^(\S+)([CV])(\S+)")?,
            followed_by: compile_regex(r"^_(\S+)")?,
            not_followed_by: compile_regex(r"^!_\{(\S+)\}")?,
            preceded_at_end: compile_regex(r"^(\S+)_#")?,
        })
    }

    /// `V..`/`C..` rules whose right side starts with the same class letter.
    fn group_rule(&self, line: &str) -> Option<SoundMap> {
        let caps = self.group.captures(line)?;
        let class = &caps[1];
        let pattern = &caps[2];
        let rest = caps[3].trim_end();
        let after_class = rest.strip_prefix(class)?;

        if after_class.starts_with(class) {
            return Some(SoundMap::new(
                &format!("$1{}", pattern),
                "$1$1",
                &format!("({}){}", class, pattern),
                &format!(r"({})\1", class),
            ));
        }
        let replacement = after_class.chars().next()?;
        Some(SoundMap::new(
            &format!("$1{}", pattern),
            &format!("$1{}", replacement),
            &format!("({}){}", class, pattern),
            &format!("({}){}", class, replacement),
        ))
    }

    /// Expands the left side of a rule into the phonemes it stands for.
    fn phonemes(&self, left: &str) -> Vec<String> {
        if let Some(caps) = self.braced_with_prefix.captures(left) {
            let prefix = caps[1].trim();
            return caps[2].split(',').map(|part| format!("{}{}", prefix, part)).collect();
        }
        if let Some(caps) = self.braced.captures(left) {
            return caps[1].split(',').map(str::to_string).collect();
        }
        if let Some(caps) = self.optional_tail.captures(left) {
            // the longer form must be tried first
            return vec![format!("{}{}", &caps[1], &caps[2]), caps[1].to_string()];
        }
        vec![left.to_string()]
    }

    /// Builds the rule for `phoneme > roman / change`.
    fn sound_change(&self, phoneme: &str, roman: &str, change: &str, line: &str) -> Result<SoundMap> {
        if change == "_#" {
            if let (Some(p), Some(r)) = (self.class_phoneme.captures(phoneme), self.class_roman.captures(roman)) {
                return Ok(SoundMap::new(
                    &format!("{}$1", &p[1]),
                    &format!("{}$1{}", &r[1], &r[3]),
                    &format!("{}({})", &p[1], &p[2]),
                    &format!("{}({}){}", &r[1], &r[2], &r[3]),
                ));
            }
        }
        let map = match change {
            "#_" => SoundMap::new(phoneme, roman, &format!("^{}", phoneme), &format!("^{}", roman)),
            "_#" => SoundMap::new(phoneme, roman, &format!("{}$", phoneme), &format!("{}$", roman)),
            "#_#" => SoundMap::new(phoneme, roman, &format!("^{}$", phoneme), &format!("^{}$", roman)),
            "C_" => SoundMap::new(
                &format!("$1{}", phoneme),
                &format!("$1{}", roman),
                &format!("(C){}", phoneme),
                &format!("(C){}", roman),
            ),
            // the consonant is captured so the replacement keeps it
            "C_#" => SoundMap::new(
                &format!("$1{}", phoneme),
                &format!("$1{}", roman),
                &format!("(C){}$", phoneme),
                &format!("(C){}$", roman),
            ),
            "VV" => SoundMap::new("$1", "$1$1", "(V)", r"(V)\1"),
            _ => return self.context_change(phoneme, roman, change, line),
        };
        Ok(map)
    }

    fn context_change(&self, phoneme: &str, roman: &str, change: &str, line: &str) -> Result<SoundMap> {
        if let Some(caps) = self.followed_by.captures(change) {
            let next = &caps[1];
            return Ok(SoundMap::new(
                &format!("{}$1", phoneme),
                &format!("{}$1", roman),
                &format!("{}({})", phoneme, next),
                &format!("{}({})", roman, next),
            ));
        }
        if let Some(caps) = self.not_followed_by.captures(change) {
            let excluded: String = caps[1].split(',').collect();
            return Ok(SoundMap::new(
                &format!("{}$1", phoneme),
                &format!("{}$1", roman),
                &format!("{}([^{}])", phoneme, excluded),
                &format!("{}([^{}])", roman, excluded),
            ));
        }
        if let Some(caps) = self.preceded_at_end.captures(change) {
            let before = &caps[1];
            return Ok(SoundMap::new(
                &format!("{}{}", before, phoneme),
                &format!("{}{}", before, roman),
                &format!("{}{}$", before, phoneme),
                &format!("{}{}$", before, roman),
            ));
        }
        Err(LexiconError::UnmatchedSoundChange {
            pattern: change.to_string(),
            rule: line.to_string(),
        })
    }
}

/// Compiles spelling rule lines in order. Blank lines and `/` comments are
/// skipped; the two stress-mark rules always lead the result. `C` and `V`
/// in the compiled patterns are replaced by the IPA classes of `ipa`
/// (pronunciation patterns get the spelling classes instead).
pub fn compile_sound_map(lines: &[String], ipa: &CharClass) -> Result<CompiledSpelling> {
    let notation = Notation::new()?;
    let mut sound_map = SoundMap::stress_marks();
    let mut spelled_vowels: BTreeSet<String> = BTreeSet::new();

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() || notation.comment.is_match(line) {
            continue;
        }
        if let Some(rule) = notation.group_rule(line) {
            debug!(line, spelling_regex = %rule.spelling_regex, "group spelling rule");
            sound_map.push(rule);
            continue;
        }

        let parts: Vec<&str> = line.split('>').collect();
        if parts.len() < 2 {
            return Err(LexiconError::UnmatchedSpellingRule(line.to_string()));
        }
        let right = parts[1].trim();
        for phoneme in notation.phonemes(parts[0].trim()) {
            let (rule, roman) = match right.split_once('/') {
                Some((roman, change)) => {
                    let roman = roman.trim();
                    (notation.sound_change(&phoneme, roman, change.trim(), line)?, roman)
                }
                None => (SoundMap::literal(&phoneme, right), right),
            };
            debug!(line, spelling_regex = %rule.spelling_regex, romanization = %rule.romanization, "spelling rule");
            sound_map.push(rule);
            if ipa.contains(&phoneme) {
                spelled_vowels.insert(roman.to_string());
            }
        }
    }

    let spelling = CharClass::spelling(spelled_vowels);
    for rule in sound_map.iter_mut() {
        rule.phoneme = ipa.substitute(&rule.phoneme);
        rule.spelling_regex = ipa.substitute(&rule.spelling_regex);
        rule.pronunciation_regex = spelling.substitute(&rule.pronunciation_regex);
    }

    Ok(CompiledSpelling {
        sound_map,
        patterns: PhonePatterns {
            ipa: ipa.clone(),
            spelling,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::spelling::Speller;
    use crate::types::vulgarlang::VulgarlangSave;

    fn ipa() -> CharClass {
        let save: VulgarlangSave = serde_json::from_value(serde_json::json!({
            "customVowels": {"value": "a e i o u"}
        }))
        .unwrap();
        CharClass::ipa(&save)
    }

    fn compile(lines: &[&str]) -> Result<CompiledSpelling> {
        let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        compile_sound_map(&lines, &ipa())
    }

    fn spell(lines: &[&str], phonetic: &str) -> String {
        let compiled = compile(lines).unwrap();
        Speller::new(&compiled.sound_map).unwrap().spell(phonetic)
    }

    #[test]
    fn stress_rules_lead_and_comments_are_skipped() {
        let compiled = compile(&["/ a comment", "", "k > c"]).unwrap();
        assert_eq!(compiled.sound_map.len(), 3);
        assert_eq!(compiled.sound_map[0].phoneme, "ˈ");
        assert_eq!(compiled.sound_map[2], SoundMap::literal("k", "c"));
    }

    #[test]
    fn literal_rules_spell() {
        assert_eq!(spell(&["ʃ > sh", "k > c"], "ˈʃak"), "shac");
    }

    #[test]
    fn braces_and_optional_tail_expand() {
        let compiled = compile(&["t{s,ʃ} > ch", "a(ː) > aa"]).unwrap();
        let phonemes: Vec<&str> = compiled.sound_map[2..].iter().map(|m| m.phoneme.as_str()).collect();
        assert_eq!(phonemes, vec!["ts", "tʃ", "aː", "a"]);
        assert_eq!(spell(&["t{s,ʃ} > ch"], "tʃats"), "chach");
    }

    #[test]
    fn doubled_vowel_group() {
        let compiled = compile(&["Vː > VV"]).unwrap();
        let rule = &compiled.sound_map[2];
        assert_eq!(rule.romanization, "$1$1");
        assert_eq!(rule.spelling_regex, "([aeiou])ː");
        assert!(rule.pronunciation_regex.ends_with(r"\1"));
        assert_eq!(spell(&["Vː > VV"], "taːk"), "taak");
    }

    #[test]
    fn class_with_replacement_letter() {
        assert_eq!(spell(&["Cʲ > Cy"], "tʲa"), "tya");
    }

    #[test]
    fn word_boundaries() {
        assert_eq!(spell(&["ŋ > ng / _#", "ŋ > n"], "ŋaŋ"), "nang");
        assert_eq!(spell(&["h > x / #_"], "hah"), "xah");
        assert_eq!(spell(&["a > ah / #_#"], "a"), "ah");
    }

    #[test]
    fn consonant_contexts_keep_the_consonant() {
        assert_eq!(spell(&["j > i / C_"], "tja"), "tia");
        assert_eq!(spell(&["j > y / C_#"], "atj"), "aty");
    }

    #[test]
    fn following_context() {
        assert_eq!(spell(&["s > z / _a"], "sasi"), "zasi");
        assert_eq!(spell(&["n > m / !_{a,e}"], "nina"), "mina");
        assert_eq!(spell(&["s > ss / a_#"], "tas"), "tass");
    }

    #[test]
    fn spelled_vowels_are_learnt() {
        let compiled = compile(&["a > á", "o > ö", "k > c"]).unwrap();
        assert_eq!(compiled.patterns.spelling.vowel, "[áö]");
        assert_eq!(compiled.patterns.spelling.consonant, "[^áö]");
    }

    #[test]
    fn unknown_context_is_fatal() {
        let err = compile(&["a > b / ?_?"]).unwrap_err();
        assert!(matches!(err, LexiconError::UnmatchedSoundChange { ref pattern, .. } if pattern == "?_?"));
    }

    #[test]
    fn rule_without_arrow_is_fatal() {
        let err = compile(&["abc"]).unwrap_err();
        assert!(matches!(err, LexiconError::UnmatchedSpellingRule(_)));
    }
}
//*** END FILE: src/parsing/spelling_rules.rs ***//
