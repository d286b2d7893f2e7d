//*** START FILE: src/lexicon/pronunciation.rs ***//
//! Sounding out: spelled text back to its phonetic form.
//!
//! Each sound map rule's `pronunciation_regex` is searched in the spelled
//! text and replaced by its `phoneme`. Rules run last to first, so the
//! spelling steps are undone in reverse. Pronunciation patterns carry
//! backreferences (`(V)\1` for doubled vowels), which is why they go
//! through `fancy_regex` rather than `regex`.

use crate::errors::{LexiconError, Result};
use crate::types::sound_map::{SoundMap, UNMATCHABLE_PATTERN};
use fancy_regex::Regex;
use tracing::debug;

/// Replacement text split once into literal runs and group references.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Group(usize),
}

/// Reads `$1`, `$12` as group references. Any other `$` is literal.
fn parse_replacement(text: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }
        let mut digits = String::new();
        while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
            digits.push(d);
            chars.next();
        }
        match digits.parse::<usize>() {
            Ok(group) => {
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Group(group));
            }
            Err(_) => literal.push('$'),
        }
    }
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    pieces
}

#[derive(Debug, Clone)]
struct PronunciationStep {
    pattern: Regex,
    replacement: Vec<Piece>,
}

impl PronunciationStep {
    fn apply(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in self.pattern.captures_iter(text) {
            let caps = caps.map_err(|e| LexiconError::pronunciation_regex(self.pattern.as_str(), e))?;
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            for piece in &self.replacement {
                match piece {
                    Piece::Literal(s) => out.push_str(s),
                    Piece::Group(i) => out.push_str(caps.get(*i).map_or("", |m| m.as_str())),
                }
            }
            last = whole.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }
}

/// A sound map compiled for sounding out.
#[derive(Debug, Clone)]
pub struct Pronouncer {
    steps: Vec<PronunciationStep>,
}

impl Pronouncer {
    /// Rules with no pronunciation pattern, or the stress-mark placeholder,
    /// never fire and are left out.
    pub fn new(sound_map: &[SoundMap]) -> Result<Self> {
        let mut steps = Vec::with_capacity(sound_map.len());
        for rule in sound_map {
            if rule.pronunciation_regex.is_empty() || rule.pronunciation_regex == UNMATCHABLE_PATTERN {
                continue;
            }
            let pattern = Regex::new(&rule.pronunciation_regex)
                .map_err(|e| LexiconError::pronunciation_regex(&rule.pronunciation_regex, e))?;
            steps.push(PronunciationStep {
                pattern,
                replacement: parse_replacement(&rule.phoneme),
            });
        }
        debug!(rules = steps.len(), "compiled pronunciation rules");
        Ok(Pronouncer { steps })
    }

    /// Phonetic form of a spelled word.
    pub fn sound_out(&self, spelled: &str) -> Result<String> {
        let mut phonetic = spelled.to_string();
        for step in self.steps.iter().rev() {
            phonetic = step.apply(&phonetic)?;
        }
        Ok(phonetic)
    }
}

/// `sound_out(spelled, sound_map)` for a one-off word.
pub fn sound_out(spelled: &str, sound_map: &[SoundMap]) -> Result<String> {
    Pronouncer::new(sound_map)?.sound_out(spelled)
}

//*** END FILE: src/lexicon/pronunciation.rs ***//
