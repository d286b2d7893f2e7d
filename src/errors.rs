//*** START FILE: src/errors.rs ***//
//! Error type shared by every stage of lexicon generation.
//!
//! All failures are fatal for the run: a malformed rule, an unresolvable
//! reference or an unsupported input shape aborts instead of producing a
//! partially-correct lexicon.

use std::path::PathBuf;

/// Result alias defaulting to [`LexiconError`].
pub type Result<T, E = LexiconError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    /// A spelling rule line has no `>` separating pattern and romanization.
    #[error("Unmatched spelling rule: '{0}'")]
    UnmatchedSpellingRule(String),

    /// The context part of a spelling rule (`... / _#`) is not a known marker.
    #[error("Unmatched sound change pattern '{pattern}' in spelling rule '{rule}'")]
    UnmatchedSoundChange { pattern: String, rule: String },

    #[error("Invalid affix rule: '{0}'")]
    InvalidAffixRule(String),

    #[error("Invalid derivation rule: '{0}'")]
    InvalidDerivationalAffix(String),

    /// A grammar cell abbreviation path has a fragment missing from the
    /// row/column/block map.
    #[error("Unmapped declension abbreviation '{abbreviation}' in line '{line}'")]
    UnmappedDeclension { abbreviation: String, line: String },

    #[error("Grammar rule found without part of speech set: '{0}'")]
    MissingPartOfSpeech(String),

    /// A compiled rule produced a pattern the regex engine rejects.
    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A pronunciation pattern failed to compile or to run while sounding
    /// a word out.
    #[error("Pronunciation pattern '{pattern}' failed: {source}")]
    PronunciationRegex {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    #[error("Malformed word notation: '{0}'")]
    MalformedWord(String),

    #[error("Malformed derived word rule: '{0}'")]
    MalformedDerivation(String),

    /// A derivation token matched no root word, even by prefix.
    #[error("Unable to locate '{word}'{}", with_part_of_speech(.part_of_speech))]
    UnresolvedWord {
        word: String,
        part_of_speech: Option<String>,
    },

    #[error("Unknown derivational affix '{0}'")]
    UnknownDerivationalAffix(String),

    /// A word handed to the declension engine is neither notation text,
    /// a field map nor a lexicon entry.
    #[error("Unsupported word shape for declension: {0}")]
    UnsupportedWordShape(String),

    #[error("Failed to parse config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn with_part_of_speech(part_of_speech: &Option<String>) -> String {
    match part_of_speech {
        Some(pos) => format!(" with part of speech '{}'", pos),
        None => String::new(),
    }
}

impl LexiconError {
    pub(crate) fn invalid_regex(pattern: &str, source: regex::Error) -> Self {
        LexiconError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        }
    }

    pub(crate) fn pronunciation_regex(pattern: &str, source: fancy_regex::Error) -> Self {
        LexiconError::PronunciationRegex {
            pattern: pattern.to_string(),
            source,
        }
    }
}

//*** END FILE: src/errors.rs ***//
