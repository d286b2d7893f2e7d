//! End-to-end generation from a save document.

use conlang_lexicon::language_builder::{build_language, decline_lexicon, remove_declined_entries, BuildOptions};
use conlang_lexicon::language_io::{load_language, save_language};
use conlang_lexicon::lexicon::{LexicalOrder, Pronouncer};
use conlang_lexicon::types::affix::AffixKind;
use conlang_lexicon::{LanguageDescription, LexiconEntry, LexiconError};
use serde_json::{json, Value};

fn grammar(lines: &[&str]) -> Value {
    let mut text = lines.join("\n");
    text.push('\n');
    json!({"ops": [
        {"insert": "Nouns"},
        {"insert": "\n", "attributes": {"header": 2}},
        {"insert": text}
    ]})
}

fn save() -> Value {
    json!({
        "words": {"value": "dog, hound : n = do\ncat : nf = ka\neat : v = ʃi\nwater : n = apa\nbird : n = pit"},
        "derivedWords": {"value": "puppy : n = dog-DIM"},
        "spellingRules": {"value": "/ romanization\nʃ > sh\nk > c"},
        "grammarEditor": grammar(&[
            "TABLE TYPE = affix",
            "part-of-speech = n",
            "cols = Singular/Plural",
            "S ~ -",
            "P ~ IF V# THEN -s ELSE -es",
            "TABLE TYPE = affix",
            "part-of-speech = v",
            "cols = Past/Negative",
            "P ~ -ta",
            "N ~ la -",
            "TABLE TYPE = word",
            "part-of-speech = pron",
            "cols = Singular/Plural",
            "1.S ~ I = mi",
            "2.S ~ you = ti",
        ]),
        "derivationalAffixes": {"value": "DIM = -ito"},
        "nounGenders": {"value": "Masculine\nFeminine"},
        "anglicizedName": {"value": "Testish"},
        "ipaLangName": {"value": "ʃala"},
        "customConsonants": {"value": "k d p t s ʃ l m"},
        "customVowels": {"value": "a o i"}
    })
}

fn find<'a>(language: &'a LanguageDescription, english: &str, declension: &[&str]) -> Option<&'a LexiconEntry> {
    language
        .lexicon
        .iter()
        .find(|e| e.english == english && e.declension == declension)
}

fn assert_sorted(language: &LanguageDescription) {
    let order = LexicalOrder::new(language.lexical_order_list.clone());
    let indices: Vec<f64> = language.lexicon.iter().map(|e| order.lexical_index(&e.spelled)).collect();
    assert!(indices.windows(2).all(|w| w[0] <= w[1]), "lexicon out of order");
}

#[test]
fn root_build() {
    let language = build_language(&save(), &BuildOptions::default()).unwrap();

    // five words with six glosses, one derived word, one particle, two pronouns
    assert_eq!(language.lexicon.len(), 10);
    assert_eq!(language.part_of_speech_list, vec!["n", "nf", "v"]);
    assert_eq!(language.native_name_english, "Shala");
    assert_eq!(language.lexical_order_list.last().map(String::as_str), Some(" "));
    assert_sorted(&language);

    let cat = find(&language, "cat", &["root"]).unwrap();
    assert_eq!(cat.spelled, "ca");
    let particle = find(&language, "<Negative Particle>", &["Negative"]).unwrap();
    assert_eq!(particle.phonetic, "la");
    assert_eq!(particle.part_of_speech, "Special");
    let you = find(&language, "you", &["2nd Person Singular"]).unwrap();
    assert_eq!(you.part_of_speech, "pron");
    let puppy = find(&language, "puppy", &["root"]).unwrap();
    assert_eq!(puppy.phonetic, "doito");
    assert!(puppy.derived_word);
    assert_eq!(puppy.metadata["source"]["derived_word"], "puppy : n = dog-DIM");

    let noun_slots = &language.affix_map["nf"];
    assert_eq!(noun_slots.len(), 1);
    assert_eq!(noun_slots[0].kind, AffixKind::Suffix);
    assert_eq!(language.affix_map["v"].len(), 1);
    assert!(!language.affix_map.contains_key("pron"));
    assert_eq!(language.metadata["source"][0]["vulgarlang"]["anglicizedName"]["value"], "Testish");
}

#[test]
fn declined_build() {
    let options = BuildOptions {
        decline: true,
        ..BuildOptions::default()
    };
    let language = build_language(&save(), &options).unwrap();

    // dog, hound, cat, water, bird and puppy gain two forms each, eat one
    assert_eq!(language.lexicon.len(), 23);
    assert_sorted(&language);

    assert_eq!(find(&language, "dog", &["Plural"]).unwrap().phonetic, "dos");
    assert_eq!(find(&language, "bird", &["Plural"]).unwrap().phonetic, "pites");
    assert_eq!(find(&language, "cat", &["Plural"]).unwrap().spelled, "cas");
    assert_eq!(find(&language, "eat", &["Past"]).unwrap().spelled, "shita");
    assert!(find(&language, "eat", &["Negative"]).is_none());

    let singular = find(&language, "water", &["Singular"]).unwrap();
    assert_eq!(singular.phonetic, "apa");
    assert!(singular.declined_word);
    assert_eq!(singular.metadata["source"]["declined_word"]["english"], "water");

    let puppies = find(&language, "puppy", &["Plural"]).unwrap();
    assert!(puppies.derived_word && puppies.declined_word);
}

#[test]
fn document_survives_disk_and_maintenance() {
    let language = build_language(&save(), &BuildOptions::default()).unwrap();
    let path = std::env::temp_dir().join(format!("conlang_lexicon_pipeline_{}.json", std::process::id()));
    save_language(&language, &path).unwrap();
    let mut loaded = load_language(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded.lexicon, language.lexicon);
    assert_eq!(loaded.affix_map, language.affix_map);
    assert_eq!(loaded.sound_map_list, language.sound_map_list);
    assert_eq!(loaded.derivational_affix_map, language.derivational_affix_map);

    let added = decline_lexicon(&mut loaded).unwrap();
    assert_eq!(added, 13);
    assert_sorted(&loaded);
    assert_eq!(remove_declined_entries(&mut loaded), 13);
    assert_eq!(loaded.lexicon, language.lexicon);
}

#[test]
fn spelled_words_sound_out_to_their_phonetic_form() {
    let language = build_language(&save(), &BuildOptions::default()).unwrap();
    let pronouncer = Pronouncer::new(&language.sound_map_list).unwrap();

    for entry in &language.lexicon {
        assert_eq!(pronouncer.sound_out(&entry.spelled).unwrap(), entry.phonetic, "{}", entry.english);
    }
    assert_eq!(pronouncer.sound_out("shita").unwrap(), "ʃita");
}

#[test]
fn unmapped_cell_aborts_the_build() {
    let mut document = save();
    document["grammarEditor"] = grammar(&["TABLE TYPE = affix", "part-of-speech = v", "cols = Past", "X ~ -ta"]);
    let err = build_language(&document, &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, LexiconError::UnmappedDeclension { .. }));
}

#[test]
fn unknown_derivational_affix_aborts_the_build() {
    let mut document = save();
    document["derivedWords"] = json!({"value": "puppy : n = dog-TINY"});
    let err = build_language(&document, &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, LexiconError::UnknownDerivationalAffix(ref tag) if tag == "TINY"));

    let options = BuildOptions {
        derive: false,
        ..BuildOptions::default()
    };
    assert!(build_language(&document, &options).is_ok());
}
