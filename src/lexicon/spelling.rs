//*** START FILE: src/lexicon/spelling.rs ***//
use crate::errors::Result;
use crate::lexicon::compile_regex;
use crate::types::sound_map::SoundMap;
use regex::Regex;

#[derive(Debug, Clone)]
struct SpellingStep {
    pattern: Regex,
    replacement: String,
}

/// A sound map compiled for spelling. Rules run in order, each one over the
/// output of the previous one.
#[derive(Debug, Clone)]
pub struct Speller {
    steps: Vec<SpellingStep>,
}

impl Speller {
    pub fn new(sound_map: &[SoundMap]) -> Result<Self> {
        let mut steps = Vec::with_capacity(sound_map.len());
        for rule in sound_map {
            if rule.spelling_regex.is_empty() {
                continue;
            }
            let pattern = compile_regex(&rule.spelling_regex)?;
            steps.push(SpellingStep {
                pattern,
                replacement: translate_replacement(&rule.romanization),
            });
        }
        Ok(Speller { steps })
    }

    /// Romanizes a phonetic string.
    pub fn spell(&self, phonetic: &str) -> String {
        let mut spelled = phonetic.to_string();
        for step in &self.steps {
            spelled = step.pattern.replace_all(&spelled, step.replacement.as_str()).into_owned();
        }
        spelled.trim().to_string()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// `spell(phonetic, sound_map)` for callers holding a compiled speller.
pub fn spell(phonetic: &str, speller: &Speller) -> String {
    speller.spell(phonetic)
}

/// Rewrites document replacement text (`$1`, `$12`) into the regex crate's
/// braced group syntax so a following letter is not read as part of a group
/// name. Any other `$` is kept literal.
pub fn translate_replacement(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let mut digits = String::new();
        while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
            digits.push(d);
            chars.next();
        }
        if digits.is_empty() {
            out.push_str("$$");
        } else {
            out.push_str("${");
            out.push_str(&digits);
            out.push('}');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LexiconError;

    #[test]
    fn plain_rule_spells_word() {
        let speller = Speller::new(&[SoundMap::literal("k", "c")]).unwrap();
        assert_eq!(speller.spell("kat"), "cat");
    }

    #[test]
    fn rules_apply_in_order() {
        let speller = Speller::new(&[SoundMap::literal("ʃ", "sh"), SoundMap::literal("s", "z")]).unwrap();
        // the second rule sees the output of the first
        assert_eq!(speller.spell("ʃip"), "zhip");
    }

    #[test]
    fn stress_marks_are_removed() {
        let mut map = SoundMap::stress_marks();
        map.push(SoundMap::literal("k", "c"));
        let speller = Speller::new(&map).unwrap();
        assert_eq!(speller.spell("ˈkaˌta"), "cata");
    }

    #[test]
    fn group_references_followed_by_letters() {
        let rule = SoundMap::new("$1ː", "$1h", "([aeiou])ː", "([aeiou])h");
        let speller = Speller::new(&[rule]).unwrap();
        assert_eq!(speller.spell("taːk"), "tahk");
    }

    #[test]
    fn translate_keeps_plain_dollars_literal() {
        assert_eq!(translate_replacement("$1$1$2"), "${1}${1}${2}");
        assert_eq!(translate_replacement("a$b"), "a$$b");
        assert_eq!(translate_replacement("x"), "x");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = Speller::new(&[SoundMap::literal("(", "x")]).unwrap_err();
        assert!(matches!(err, LexiconError::InvalidRegex { .. }));
    }
}
//*** END FILE: src/lexicon/spelling.rs ***//
