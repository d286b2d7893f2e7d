//*** START FILE: src/types/lexicon_entry.rs ***//
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::hash::{Hash, Hasher};

/// Declension label carried by bare root words.
pub const ROOT_DECLENSION: &str = "root";

/// One word sense of the language. A word with N glosses becomes N entries.
///
/// Equality and hashing use `spelled`, `phonetic`, `english`,
/// `part_of_speech` and the concatenated declension labels; provenance flags
/// and `metadata` do not take part. Ordering is not defined here: it needs
/// the language alphabet, see [`crate::lexicon::ordering::LexicalOrder`].
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LexiconEntry {
    pub phonetic: String,
    pub spelled: String,
    pub english: String,
    pub part_of_speech: String,
    #[serde(rename = "declensions", default)]
    pub declension: Vec<String>,
    #[serde(default)]
    pub derived_word: bool,
    #[serde(default)]
    pub declined_word: bool,
    #[serde(default = "empty_metadata")]
    pub metadata: Value,
}

fn empty_metadata() -> Value {
    json!({})
}

impl LexiconEntry {
    /// Builds an entry with no provenance; text fields are trimmed.
    pub fn new(
        phonetic: &str,
        spelled: &str,
        english: &str,
        part_of_speech: &str,
        declension: Vec<String>,
    ) -> Self {
        LexiconEntry {
            phonetic: phonetic.trim().to_string(),
            spelled: spelled.trim().to_string(),
            english: english.trim().to_string(),
            part_of_speech: part_of_speech.trim().to_string(),
            declension,
            derived_word: false,
            declined_word: false,
            metadata: empty_metadata(),
        }
    }

    pub fn root(phonetic: &str, spelled: &str, english: &str, part_of_speech: &str) -> Self {
        LexiconEntry::new(phonetic, spelled, english, part_of_speech, vec![ROOT_DECLENSION.to_string()])
    }

    pub fn with_provenance(mut self, derived_word: bool, declined_word: bool) -> Self {
        self.derived_word = derived_word;
        self.declined_word = declined_word;
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn is_root(&self) -> bool {
        self.declension.iter().any(|d| d == ROOT_DECLENSION)
    }

    /// Declension labels joined without separator, as used by equality.
    pub fn declension_key(&self) -> String {
        self.declension.concat()
    }

    /// The `source` record stored in `metadata`, if any.
    pub fn source(&self) -> Option<&Value> {
        self.metadata.get("source")
    }

    /// Document form of the entry.
    pub fn as_value(&self) -> Value {
        // Serializing plain strings, bools and an existing Value cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl PartialEq for LexiconEntry {
    fn eq(&self, other: &Self) -> bool {
        self.spelled == other.spelled
            && self.phonetic == other.phonetic
            && self.english == other.english
            && self.part_of_speech == other.part_of_speech
            && self.declension_key() == other.declension_key()
    }
}

impl Eq for LexiconEntry {}

impl Hash for LexiconEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.phonetic.hash(state);
        self.english.hash(state);
        self.part_of_speech.hash(state);
        self.declension_key().hash(state);
    }
}

//*** END FILE: src/types/lexicon_entry.rs ***//
