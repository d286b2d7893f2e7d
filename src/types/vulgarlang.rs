//*** START FILE: src/types/vulgarlang.rs ***//
//! The language generator's save file, reduced to the fields lexicon
//! generation reads. Every field is `{ "value": ... }` in the file; missing
//! fields read as empty so partially filled saves still load.

use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TextField {
    #[serde(default)]
    pub value: String,
}

impl TextField {
    pub fn lines(&self) -> Vec<String> {
        self.value.split('\n').map(|s| s.to_string()).collect()
    }

    pub fn symbols(&self) -> Vec<String> {
        self.value.split_whitespace().map(|s| s.to_string()).collect()
    }
}

/// One operation of the grammar editor's rich-text document.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct GrammarOp {
    pub insert: Option<Value>,
    pub attributes: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GrammarEditor {
    #[serde(default)]
    pub ops: Vec<GrammarOp>,
}

impl GrammarEditor {
    /// Text lines of the grammar document in order. Formatting-only
    /// operations (those carrying `attributes`) are dropped.
    pub fn instructions(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter(|op| op.attributes.is_none())
            .filter_map(|op| op.insert.as_ref().and_then(|v| v.as_str()))
            .flat_map(|text| text.split('\n'))
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct VulgarlangSave {
    pub words: TextField,
    pub derived_words: TextField,
    pub spelling_rules: TextField,
    pub grammar_editor: GrammarEditor,
    pub custom_alphabet_order: TextField,
    pub derivational_affixes: TextField,
    pub noun_genders: TextField,
    pub anglicized_name: TextField,
    pub ipa_lang_name: TextField,
    pub custom_consonants: TextField,
    pub custom_vowels: TextField,
    pub word_initial_consonants: TextField,
    pub mid_word_consonants: TextField,
    pub word_final_consonants: TextField,
    pub bws_vowels: TextField,
    #[serde(rename = "bws2ndVowels")]
    pub bws_2nd_vowels: TextField,
}

//*** END FILE: src/types/vulgarlang.rs ***//
