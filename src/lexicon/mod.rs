//*** START FILE: src/lexicon/mod.rs ***//
//! The morphological engine over compiled rule tables: spelling and sounding
//! out, ordering, declension, derivation and deduplication.

pub mod declension;
pub mod dedup;
pub mod derivation;
pub mod ordering;
pub mod pronunciation;
pub mod spelling;

pub use declension::{decline, Decliner, WordInput};
pub use dedup::dedup_lexicon;
pub use derivation::{derive, Deriver};
pub use ordering::LexicalOrder;
pub use pronunciation::{sound_out, Pronouncer};
pub use spelling::{spell, Speller};

use crate::errors::{LexiconError, Result};
use regex::Regex;

/// Compiles a pattern, reporting the offending text on failure.
pub(crate) fn compile_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| LexiconError::invalid_regex(pattern, e))
}
//*** END FILE: src/lexicon/mod.rs ***//
