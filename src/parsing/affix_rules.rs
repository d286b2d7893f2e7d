//*** START FILE: src/parsing/affix_rules.rs ***//
//! Affix notation, as written in grammar table cells and in the derivational
//! affix list:
//!
//! ```text
//! na-                          prefix
//! -s                           suffix
//! la -                         particle (a separate word)
//! IF #V THEN n- ELSE na-       prefix chosen by the word's first sound
//! IF V# THEN -s ELSE -es       suffix chosen by the word's last sound
//! V(C)*# > __                  lengthen the last vowel
//! -                            nothing
//! ```

use crate::errors::{LexiconError, Result};
use crate::lexicon::compile_regex;
use crate::lexicon::spelling::Speller;
use crate::parsing::phonology::PhonePatterns;
use crate::types::affix::{Affix, AffixKind, AffixPosition, DerivationalAffix};
use regex::Regex;
use tracing::debug;

/// Where a conditional rule looks and what it looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    InitialVowel,
    FinalVowel,
    InitialConsonant,
    FinalConsonant,
}

struct Form {
    pattern: Regex,
    kind: AffixKind,
    boundary: Option<Boundary>,
}

/// Compiles affix notation against one language's sound map and classes.
pub struct AffixRuleCompiler<'a> {
    patterns: &'a PhonePatterns,
    speller: &'a Speller,
    cell_forms: Vec<Form>,
    derivational_forms: Vec<Form>,
    lengthening: Regex,
}

fn form(pattern: &str, kind: AffixKind, boundary: Option<Boundary>) -> Result<Form> {
    Ok(Form {
        pattern: compile_regex(pattern)?,
        kind,
        boundary,
    })
}

impl<'a> AffixRuleCompiler<'a> {
    pub fn new(patterns: &'a PhonePatterns, speller: &'a Speller) -> Result<Self> {
        use AffixKind::{Particle, Prefix, Suffix};
        use Boundary::*;

        // most specific first
        let cell_forms = vec![
            form(r"^\s*IF\s*#V\s*THEN\s*(\S+)-\s*ELSE\s*(\S+\s*)-\s*$", Prefix, Some(InitialVowel))?,
            form(r"^\s*IF\s*#V\s*THEN\s*(\S+\s+)-\s*ELSE\s*(\S+\s*)-\s*$", Particle, Some(InitialVowel))?,
            form(r"^\s*IF\s*V#\s*THEN\s*-(\S+)\s*ELSE\s*-(\s*\S+)\s*$", Suffix, Some(FinalVowel))?,
            form(r"^\s*IF\s*#C\s*THEN\s*(\S+)-\s*ELSE\s*(\S+\s*)-\s*$", Prefix, Some(InitialConsonant))?,
            form(r"^\s*IF\s*#C\s*THEN\s*(\S+\s+)-\s*ELSE\s*(\S+\s*)-\s*$", Particle, Some(InitialConsonant))?,
            form(r"^\s*IF\s*C#\s*THEN\s*-(\S+)\s*ELSE\s*-(\s*\S+)\s*$", Suffix, Some(FinalConsonant))?,
            form(r"^\s*(\S+)-\s*$", Prefix, None)?,
            form(r"^\s*(\S+\s+)-\s*$", Particle, None)?,
            form(r"^\s*-(\S+)\s*$", Suffix, None)?,
        ];
        let derivational_forms = vec![
            form(r"^\s*IF\s*#V\s*THEN\s*(\S+)-\s*ELSE\s*(\S+)-\s*$", Prefix, Some(InitialVowel))?,
            form(r"^\s*IF\s*V#\s*THEN\s*-(\S+)\s*ELSE\s*-(\S+)\s*$", Suffix, Some(FinalVowel))?,
            form(r"^\s*IF\s*#C\s*THEN\s*(\S+)-\s*ELSE\s*(\S+)-\s*$", Prefix, Some(InitialConsonant))?,
            form(r"^\s*IF\s*C#\s*THEN\s*-(\S+)\s*ELSE\s*-(\S+)\s*$", Suffix, Some(FinalConsonant))?,
            form(r"^\s*(\S+)-\s*$", Prefix, None)?,
            form(r"^\s*-(\S+)\s*$", Suffix, None)?,
        ];
        Ok(AffixRuleCompiler {
            patterns,
            speller,
            cell_forms,
            derivational_forms,
            lengthening: compile_regex(r"^V\(C\)\*#\s+>\s+__")?,
        })
    }

    pub fn speller(&self) -> &Speller {
        self.speller
    }

    pub fn patterns(&self) -> &PhonePatterns {
        self.patterns
    }

    fn conditional(&self, boundary: Boundary, if_match: &str, otherwise: &str) -> Affix {
        let ipa = &self.patterns.ipa;
        let spelling = &self.patterns.spelling;
        let (pronunciation_regex, spelling_regex) = match boundary {
            Boundary::InitialVowel => (format!("^{}", ipa.vowel), format!("^{}", spelling.vowel)),
            Boundary::FinalVowel => (format!("{}$", ipa.vowel), format!("{}$", spelling.vowel)),
            Boundary::InitialConsonant => (format!("^{}", ipa.consonant), format!("^{}", spelling.consonant)),
            Boundary::FinalConsonant => (format!("{}$", ipa.consonant), format!("{}$", spelling.consonant)),
        };
        Affix::Conditional {
            pronunciation_regex,
            spelling_regex,
            t_pronunciation_add: if_match.to_string(),
            t_spelling_add: self.speller.spell(if_match.trim()),
            f_pronunciation_add: otherwise.to_string(),
            f_spelling_add: self.speller.spell(otherwise.trim()),
        }
    }

    fn plain(&self, add: &str) -> Affix {
        Affix::Plain {
            pronunciation_add: add.to_string(),
            spelling_add: self.speller.spell(add.trim()),
        }
    }

    fn from_forms(&self, forms: &[Form], rule: &str) -> Option<(AffixKind, Affix)> {
        forms.iter().find_map(|form| {
            let caps = form.pattern.captures(rule)?;
            let affix = match form.boundary {
                Some(boundary) => self.conditional(boundary, &caps[1], &caps[2]),
                None => self.plain(&caps[1]),
            };
            Some((form.kind, affix))
        })
    }

    /// Compiles one table cell. An empty or `-` cell gives no kind and an
    /// empty rule; the caller decides which slot it belongs to.
    pub fn compile(&self, rule: &str) -> Result<(Option<AffixKind>, Affix)> {
        if let Some((kind, affix)) = self.from_forms(&self.cell_forms, rule) {
            debug!(rule, %kind, "affix rule");
            return Ok((Some(kind), affix));
        }
        if self.lengthening.is_match(rule) {
            let ipa = &self.patterns.ipa;
            let spelling = &self.patterns.spelling;
            return Ok((
                Some(AffixKind::Replacement),
                Affix::Replacement {
                    pronunciation_regex: format!(r"({})({}+)(\S*)\s*$", ipa.vowel, ipa.consonant),
                    spelling_regex: format!(r"({})({}+)(\S*)\s*$", spelling.vowel, spelling.consonant),
                    pronunciation_replacement: "$1$1$2$3".to_string(),
                    spelling_replacement: "$1$1$2$3".to_string(),
                },
            ));
        }
        let trimmed = rule.trim();
        if trimmed.is_empty() || trimmed == "-" {
            return Ok((None, Affix::Empty {}));
        }
        Err(LexiconError::InvalidAffixRule(rule.to_string()))
    }

    /// Compiles one `TAG = rule` line of the derivational affix list.
    pub fn compile_derivational(&self, line: &str) -> Result<(String, DerivationalAffix)> {
        let invalid = || LexiconError::InvalidDerivationalAffix(line.to_string());
        let (tag, rule) = line.split_once('=').ok_or_else(invalid)?;
        let (kind, rule) = self.from_forms(&self.derivational_forms, rule.trim()).ok_or_else(invalid)?;
        let position = match kind {
            AffixKind::Prefix => AffixPosition::Prefix,
            _ => AffixPosition::Suffix,
        };
        Ok((tag.trim().to_string(), DerivationalAffix { position, rule }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::sound_map::SoundMap;

    fn fixture() -> (PhonePatterns, Speller) {
        let speller = Speller::new(&[SoundMap::literal("ʃ", "sh")]).unwrap();
        (PhonePatterns::default(), speller)
    }

    #[test]
    fn plain_forms() {
        let (patterns, speller) = fixture();
        let compiler = AffixRuleCompiler::new(&patterns, &speller).unwrap();
        let (kind, affix) = compiler.compile("ʃa-").unwrap();
        assert_eq!(kind, Some(AffixKind::Prefix));
        assert_eq!(
            affix,
            Affix::Plain {
                pronunciation_add: "ʃa".into(),
                spelling_add: "sha".into()
            }
        );
        assert_eq!(compiler.compile("-s").unwrap().0, Some(AffixKind::Suffix));
        let (kind, affix) = compiler.compile("la -").unwrap();
        assert_eq!(kind, Some(AffixKind::Particle));
        assert!(matches!(affix, Affix::Plain { ref pronunciation_add, .. } if pronunciation_add == "la "));
    }

    #[test]
    fn conditional_vowel_prefix() {
        let (patterns, speller) = fixture();
        let compiler = AffixRuleCompiler::new(&patterns, &speller).unwrap();
        let (kind, affix) = compiler.compile("IF #V THEN n- ELSE na-").unwrap();
        assert_eq!(kind, Some(AffixKind::Prefix));
        match affix {
            Affix::Conditional {
                pronunciation_regex,
                t_pronunciation_add,
                f_pronunciation_add,
                ..
            } => {
                assert_eq!(pronunciation_regex, format!("^{}", patterns.ipa.vowel));
                assert_eq!(t_pronunciation_add, "n");
                assert_eq!(f_pronunciation_add, "na");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn conditional_suffixes_and_particles() {
        let (patterns, speller) = fixture();
        let compiler = AffixRuleCompiler::new(&patterns, &speller).unwrap();
        assert_eq!(compiler.compile("IF V# THEN -s ELSE -es").unwrap().0, Some(AffixKind::Suffix));
        assert_eq!(compiler.compile("IF #V THEN l - ELSE la -").unwrap().0, Some(AffixKind::Particle));
        // a bare `-` branch adds nothing and is not a suffix
        assert!(compiler.compile("IF C# THEN -a ELSE -").is_err());
        let (_, affix) = compiler.compile("IF #C THEN ʃ- ELSE z-").unwrap();
        assert_eq!(affix.pronunciation_regex(), Some(format!("^{}", patterns.ipa.consonant).as_str()));
    }

    #[test]
    fn lengthening_and_empty() {
        let (patterns, speller) = fixture();
        let compiler = AffixRuleCompiler::new(&patterns, &speller).unwrap();
        let (kind, affix) = compiler.compile("V(C)*# > __").unwrap();
        assert_eq!(kind, Some(AffixKind::Replacement));
        assert!(matches!(affix, Affix::Replacement { .. }));
        assert_eq!(compiler.compile("-").unwrap(), (None, Affix::Empty {}));
        assert_eq!(compiler.compile("  ").unwrap(), (None, Affix::Empty {}));
    }

    #[test]
    fn unknown_notation_is_fatal() {
        let (patterns, speller) = fixture();
        let compiler = AffixRuleCompiler::new(&patterns, &speller).unwrap();
        let err = compiler.compile("a-b-c d").unwrap_err();
        assert!(matches!(err, LexiconError::InvalidAffixRule(_)));
    }

    #[test]
    fn derivational_lines() {
        let (patterns, speller) = fixture();
        let compiler = AffixRuleCompiler::new(&patterns, &speller).unwrap();
        let (tag, affix) = compiler.compile_derivational("AUG = -ʃa").unwrap();
        assert_eq!(tag, "AUG");
        assert_eq!(affix.position, AffixPosition::Suffix);
        assert_eq!(
            affix.rule,
            Affix::Plain {
                pronunciation_add: "ʃa".into(),
                spelling_add: "sha".into()
            }
        );
        let (_, affix) = compiler.compile_derivational("NEG = IF #V THEN n- ELSE na-").unwrap();
        assert_eq!(affix.position, AffixPosition::Prefix);
        assert!(matches!(affix.rule, Affix::Conditional { .. }));
        let err = compiler.compile_derivational("BAD = ~~").unwrap_err();
        assert!(matches!(err, LexiconError::InvalidDerivationalAffix(_)));
    }
}
//*** END FILE: src/parsing/affix_rules.rs ***//
