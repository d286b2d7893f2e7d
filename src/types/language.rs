//*** START FILE: src/types/language.rs ***//
use crate::types::affix::{AffixMap, DerivationalAffixMap};
use crate::types::lexicon_entry::LexiconEntry;
use crate::types::sound_map::SoundMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const DOCUMENT_VERSION: f64 = 1.0;

/// The generated language document. Field names are the contract shared with
/// the editor and the other tools, keep them stable.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LanguageDescription {
    pub version: f64,
    pub english_name: String,
    pub phonetic_characters: String,
    pub native_name_phonetic: String,
    pub native_name_english: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_voices: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default)]
    pub derived: bool,
    #[serde(default)]
    pub declined: bool,
    #[serde(default)]
    pub noun_gender_list: Vec<String>,
    #[serde(default)]
    pub part_of_speech_list: Vec<String>,
    #[serde(default)]
    pub phoneme_inventory: Vec<String>,
    #[serde(default)]
    pub phonetic_inventory: BTreeMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjective_position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_post_position: Option<String>,
    pub sound_map_list: Vec<SoundMap>,
    pub lexical_order_list: Vec<String>,
    pub affix_map: AffixMap,
    pub derivational_affix_map: DerivationalAffixMap,
    pub lexicon: Vec<LexiconEntry>,
    #[serde(default)]
    pub derived_word_list: Vec<String>,
    #[serde(default = "empty_object")]
    pub metadata: Value,
}

fn empty_object() -> Value {
    json!({})
}

impl Default for LanguageDescription {
    fn default() -> Self {
        LanguageDescription {
            version: DOCUMENT_VERSION,
            english_name: String::new(),
            phonetic_characters: "ipa".to_string(),
            native_name_phonetic: String::new(),
            native_name_english: String::new(),
            preferred_voices: None,
            preferred_language: None,
            derived: false,
            declined: false,
            noun_gender_list: Vec::new(),
            part_of_speech_list: Vec::new(),
            phoneme_inventory: Vec::new(),
            phonetic_inventory: BTreeMap::new(),
            word_order: None,
            adjective_position: None,
            pre_post_position: None,
            sound_map_list: Vec::new(),
            lexical_order_list: Vec::new(),
            affix_map: AffixMap::new(),
            derivational_affix_map: DerivationalAffixMap::new(),
            lexicon: Vec::new(),
            derived_word_list: Vec::new(),
            metadata: empty_object(),
        }
    }
}
//*** END FILE: src/types/language.rs ***//
