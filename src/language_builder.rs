//*** START FILE: src/language_builder.rs ***//
//! Builds a language document from a generator save, and keeps the lexicon
//! of a built document in step with its rules afterwards.

use crate::errors::Result;
use crate::lexicon::declension::{Decliner, WordInput};
use crate::lexicon::ordering::{LexicalOrder, DEFAULT_ALPHABET};
use crate::lexicon::{dedup_lexicon, derive, Speller};
use crate::parsing::affix_rules::AffixRuleCompiler;
use crate::parsing::grammar_table::{capitalize, compile_affix_table};
use crate::parsing::phonology::{phoneme_inventory, phonetic_inventory, CharClass};
use crate::parsing::spelling_rules::compile_sound_map;
use crate::parsing::word_list::{list_lines, parse_derivational_affixes, parse_word_list, part_of_speech_set};
use crate::types::language::LanguageDescription;
use crate::types::lexicon_entry::LexiconEntry;
use crate::types::vulgarlang::VulgarlangSave;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Add the words of the derived word list.
    pub derive: bool,
    /// Add every declined form of every word. Large.
    pub decline: bool,
    /// Amazon Polly voice.
    pub voice: Option<String>,
    /// espeak-ng language code, stored beside the Polly voice.
    pub espeak_language: Option<String>,
    pub preferred_language: Option<String>,
    /// Used when the save has no custom alphabet order.
    pub default_alphabet: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            derive: true,
            decline: false,
            voice: None,
            espeak_language: None,
            preferred_language: None,
            default_alphabet: DEFAULT_ALPHABET.to_string(),
        }
    }
}

/// Builds the language document for a save. `document` is the save as read
/// from disk; it is embedded in the result's metadata.
pub fn build_language(document: &Value, options: &BuildOptions) -> Result<LanguageDescription> {
    let save: VulgarlangSave = serde_json::from_value(document.clone())?;

    // --- 1. Lexical order ---
    let alphabet = save.custom_alphabet_order.value.trim();
    let order = LexicalOrder::from_alphabet(if alphabet.is_empty() {
        options.default_alphabet.as_str()
    } else {
        alphabet
    });

    // --- 2. Word lists and parts of speech ---
    let word_lines = list_lines(&save.words.value)?;
    let derived_word_list = list_lines(&save.derived_words.value)?;
    let parts_of_speech = part_of_speech_set(&word_lines)?;

    // --- 3. Sound map ---
    let ipa = CharClass::ipa(&save);
    let spelling = compile_sound_map(&save.spelling_rules.lines(), &ipa)?;
    let speller = Speller::new(&spelling.sound_map)?;
    info!(rules = spelling.sound_map.len(), "compiled sound map");

    // --- 4. Grammar tables and derivational affixes ---
    let compiler = AffixRuleCompiler::new(&spelling.patterns, &speller)?;
    let tables = compile_affix_table(&save.grammar_editor.instructions(), &parts_of_speech, &compiler)?;
    let derivational_affix_map = parse_derivational_affixes(&save.derivational_affixes.lines(), &compiler)?;
    info!(affixes = derivational_affix_map.len(), "compiled derivational affixes");

    // --- 5. Lexicon ---
    let mut lexicon = tables.entries;
    lexicon.extend(parse_word_list(&word_lines, &speller)?);
    if options.derive {
        let derived = derive(
            &derived_word_list,
            &derivational_affix_map,
            &lexicon,
            &tables.affix_map,
            &speller,
            options.decline,
        )?;
        lexicon.extend(derived);
    }
    if options.decline {
        let decliner = Decliner::new(&tables.affix_map, &speller)?;
        let declined = decline_entries(&decliner, &lexicon)?;
        lexicon.extend(declined);
    }

    // --- 6. Clean up and order ---
    let generated = lexicon.len();
    let mut lexicon = dedup_lexicon(lexicon);
    order.sort_entries(&mut lexicon);
    info!(entries = lexicon.len(), duplicates = generated - lexicon.len(), "built lexicon");

    // --- 7. Assemble the document ---
    let native_name_phonetic = save.ipa_lang_name.value.trim().to_string();
    let preferred_voices = options.voice.as_ref().map(|voice| {
        let mut voices = BTreeMap::from([("Polly".to_string(), voice.clone())]);
        if let Some(espeak) = &options.espeak_language {
            voices.insert("espeak-ng".to_string(), espeak.clone());
        }
        voices
    });

    Ok(LanguageDescription {
        english_name: save.anglicized_name.value.trim().to_string(),
        native_name_english: capitalize(&speller.spell(&native_name_phonetic)),
        native_name_phonetic,
        preferred_voices,
        preferred_language: options.preferred_language.clone(),
        derived: options.derive,
        declined: options.decline,
        noun_gender_list: save
            .noun_genders
            .lines()
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect(),
        part_of_speech_list: parts_of_speech.into_iter().collect(),
        phoneme_inventory: phoneme_inventory(&save),
        phonetic_inventory: phonetic_inventory(&save.custom_consonants.symbols(), &save.custom_vowels.symbols())
            .into_map(),
        sound_map_list: spelling.sound_map,
        lexical_order_list: order.as_list().to_vec(),
        affix_map: tables.affix_map,
        derivational_affix_map,
        lexicon,
        derived_word_list,
        metadata: json!({ "source": [{ "vulgarlang": document }] }),
        ..LanguageDescription::default()
    })
}

/// Declined forms of every entry that is not itself a declined form.
fn decline_entries(decliner: &Decliner<'_>, entries: &[LexiconEntry]) -> Result<Vec<LexiconEntry>> {
    let mut declined = Vec::new();
    for entry in entries.iter().filter(|e| !e.declined_word) {
        declined.extend(decliner.decline(&WordInput::Entry(entry.clone()), entry.derived_word)?);
    }
    Ok(declined)
}

/// Dedups and re-sorts the lexicon with the document's own alphabet.
fn tidy_lexicon(language: &mut LanguageDescription) {
    let lexicon = std::mem::take(&mut language.lexicon);
    language.lexicon = dedup_lexicon(lexicon);
    LexicalOrder::new(language.lexical_order_list.clone()).sort_entries(&mut language.lexicon);
}

/// Adds the declined forms of every word. Returns how many entries the
/// lexicon grew by.
pub fn decline_lexicon(language: &mut LanguageDescription) -> Result<usize> {
    let speller = Speller::new(&language.sound_map_list)?;
    let decliner = Decliner::new(&language.affix_map, &speller)?;
    let declined = decline_entries(&decliner, &language.lexicon)?;
    let before = language.lexicon.len();
    language.lexicon.extend(declined);
    tidy_lexicon(language);
    language.declined = true;
    let added = language.lexicon.len().saturating_sub(before);
    info!(added, "declined lexicon");
    Ok(added)
}

/// Adds the words of the document's derived word list, declined as well
/// when the document is declined.
pub fn derive_lexicon(language: &mut LanguageDescription) -> Result<usize> {
    let speller = Speller::new(&language.sound_map_list)?;
    let derived = derive(
        &language.derived_word_list,
        &language.derivational_affix_map,
        &language.lexicon,
        &language.affix_map,
        &speller,
        language.declined,
    )?;
    let before = language.lexicon.len();
    language.lexicon.extend(derived);
    tidy_lexicon(language);
    language.derived = true;
    let added = language.lexicon.len().saturating_sub(before);
    info!(added, "derived lexicon");
    Ok(added)
}

pub fn remove_declined_entries(language: &mut LanguageDescription) -> usize {
    let before = language.lexicon.len();
    language.lexicon.retain(|e| !e.declined_word);
    tidy_lexicon(language);
    language.declined = false;
    before - language.lexicon.len()
}

/// Drops derived roots and everything declined from them.
pub fn remove_derived_entries(language: &mut LanguageDescription) -> usize {
    let before = language.lexicon.len();
    language.lexicon.retain(|e| !e.derived_word);
    tidy_lexicon(language);
    language.derived = false;
    before - language.lexicon.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn save() -> Value {
        json!({
            "words": {"value": "dog, hound : n = do\ncat : nf = ka\nrun : v = ʃi"},
            "derivedWords": {"value": "puppy : n = dog-DIM"},
            "spellingRules": {"value": "ʃ > sh\nk > c"},
            "grammarEditor": {"ops": [
                {"insert": "TABLE TYPE = affix\npart-of-speech = n\ncols = Singular/Plural\nS ~ -\nP ~ -s\n"}
            ]},
            "derivationalAffixes": {"value": "DIM = -ito"},
            "nounGenders": {"value": "Masculine\nFeminine\n"},
            "anglicizedName": {"value": " Testish "},
            "ipaLangName": {"value": "ʃala"},
            "customConsonants": {"value": "k d s ʃ"},
            "customVowels": {"value": "a o i"}
        })
    }

    fn spelled(language: &LanguageDescription) -> Vec<&str> {
        language.lexicon.iter().map(|e| e.spelled.as_str()).collect()
    }

    #[test]
    fn roots_and_derived_words() {
        let language = build_language(&save(), &BuildOptions::default()).unwrap();
        assert_eq!(language.english_name, "Testish");
        assert_eq!(language.native_name_english, "Shala");
        assert_eq!(language.noun_gender_list, vec!["Masculine", "Feminine"]);
        assert_eq!(language.part_of_speech_list, vec!["n", "nf", "v"]);
        assert!(language.derived);
        assert!(!language.declined);
        assert_eq!(spelled(&language), vec!["ca", "do", "do", "doito", "shi"]);
        assert!(language.affix_map.contains_key("nf"));
        assert!(language.preferred_voices.is_none());
    }

    #[test]
    fn declined_build_contains_every_form() {
        let options = BuildOptions {
            decline: true,
            voice: Some("Joanna".into()),
            espeak_language: Some("en".into()),
            ..BuildOptions::default()
        };
        let language = build_language(&save(), &options).unwrap();
        // three forms each for dog, hound, cat and puppy, and run as is
        assert_eq!(language.lexicon.len(), 13);
        assert!(language.lexicon.iter().any(|e| e.spelled == "doitos" && e.derived_word && e.declined_word));
        let voices = language.preferred_voices.unwrap();
        assert_eq!(voices["Polly"], "Joanna");
        assert_eq!(voices["espeak-ng"], "en");
    }

    #[test]
    fn maintenance_round_trip() {
        let mut language = build_language(&save(), &BuildOptions::default()).unwrap();
        let roots = language.lexicon.len();

        let added = decline_lexicon(&mut language).unwrap();
        assert_eq!(added, 8);
        assert!(language.declined);

        assert_eq!(remove_declined_entries(&mut language), 8);
        assert_eq!(language.lexicon.len(), roots);
        assert!(!language.declined);

        assert_eq!(remove_derived_entries(&mut language), 1);
        assert!(!language.derived);
        assert!(language.lexicon.iter().all(|e| !e.derived_word));

        assert_eq!(derive_lexicon(&mut language).unwrap(), 1);
        assert_eq!(language.lexicon.len(), roots);
    }
}
//*** END FILE: src/language_builder.rs ***//
