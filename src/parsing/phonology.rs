//*** START FILE: src/parsing/phonology.rs ***//
//! IPA symbol tables, phonetic inventories and the vowel/consonant character
//! classes that `C` and `V` stand for in rule notation.

use crate::types::vulgarlang::VulgarlangSave;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

const PULMONIC_CONSONANTS: &[&str] = &[
    "b", "\u{03b2}", "\u{0299}", "c", "\u{00e7}", "d", "\u{0256}", "\u{1d91}", "\u{02a3}", "\u{02a5}", "\u{02a4}",
    "\u{ab66}", "f", "\u{0278}", "g", "\u{0262}", "\u{0270}", "h", "\u{0266}", "\u{0127}", "\u{0267}", "j",
    "\u{029d}", "\u{025f}", "k", "l", "\u{026b}", "\u{026c}", "\u{026e}", "\u{1df05}", "\u{026d}", "\u{a78e}",
    "\u{029f}", "\u{1df04}", "m", "\u{0271}", "n", "\u{0273}", "\u{0272}", "\u{014b}", "\u{0274}", "p", "q", "r",
    "\u{0279}", "\u{027e}", "\u{027d}", "\u{027b}", "\u{027a}", "\u{1df08}", "\u{0281}", "\u{0280}", "s", "\u{0282}",
    "\u{0283}", "t", "\u{0288}", "\u{02a6}", "\u{02a8}", "\u{02a7}", "\u{ab67}", "v", "\u{2c71}", "\u{028b}", "x",
    "\u{0263}", "\u{03c7}", "\u{028e}", "\u{1df06}", "z", "\u{0290}", "\u{0292}", "\u{03b8}", "\u{00f0}", "\u{0294}",
    "\u{0295}", "R",
];

const NON_PULMONIC_CONSONANTS: &[&str] = &[
    "\u{0253}", "\u{0257}", "\u{0284}", "\u{0260}", "\u{029b}", "w", "\u{028d}", "\u{0265}", "\u{02a1}", "\u{02a2}",
    "\u{0255}", "\u{0291}", "\u{029c}", "\u{0298}", "\u{01c0}", "\u{01c3}", "\u{01c2}", "\u{01c1}", "\u{1df0a}",
];

const VOWELS: &[&str] = &[
    "a", "\u{00e6}", "\u{0251}", "\u{0252}", "\u{0250}", "e", "\u{025b}", "\u{025c}", "\u{025e}", "\u{0259}", "i",
    "\u{0268}", "\u{026a}", "y", "\u{028f}", "\u{00f8}", "\u{0258}", "\u{0275}", "\u{0153}", "\u{0276}", "\u{0264}",
    "o", "\u{0254}", "u", "\u{0289}", "\u{028a}", "\u{026f}", "\u{028c}", "\u{025a}", "\u{02de}",
];

const SUPRASEGMENTALS: &[&str] = &["\u{02d0}", "\u{02d1}", "\u{02c8}", "\u{02cc}", "\u{035c}", "\u{0361}"];

const DIACRITICS: &[&str] = &[
    "\u{02f3}", "\u{0325}", "\u{030a}", "\u{0324}", "\u{032a}", "\u{0329}", "\u{032c}", "\u{02f7}", "\u{0330}",
    "\u{02fd}", "\u{033a}", "\u{032f}", "\u{02b0}", "\u{033c}", "\u{033b}", "\u{02d2}", "\u{0339}", "\u{0303}",
    "\u{02b2}", "\u{02d3}", "\u{031c}", "\u{02d6}", "\u{031f}", "\u{207f}", "\u{00a8}", "\u{0308}", "\u{02e0}",
    "\u{02cd}", "\u{0320}", "\u{20e1}", "\u{02df}", "\u{033d}", "\u{02e4}", "\u{ab68}", "\u{0319}",
];

/// Length, half-length, rhotic hook and non-syllabic marks: a vowel followed
/// by one of these is still a single vowel, not a diphthong.
const VOWEL_MODIFIERS: &[char] = &['\u{02d0}', '\u{02d1}', '\u{02de}', '\u{032f}'];

pub const DEFAULT_IPA_VOWEL_CLASS: &str = "[aioeu\u{032f}\u{02d0}]";
pub const DEFAULT_IPA_CONSONANT_CLASS: &str = "[^aioeu\u{02d0}\u{032f}]";
pub const DEFAULT_SPELLING_VOWEL_CLASS: &str = "[aeiou\u{0304}]";
pub const DEFAULT_SPELLING_CONSONANT_CLASS: &str = "[^aeiou\u{0304}]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    PulmonicConsonant,
    NonPulmonicConsonant,
    Vowel,
    Suprasegmental,
    Diacritic,
}

/// Looks a single IPA symbol up in the static tables.
pub fn classify(symbol: &str) -> Option<SymbolClass> {
    let tables: [(&[&str], SymbolClass); 5] = [
        (PULMONIC_CONSONANTS, SymbolClass::PulmonicConsonant),
        (NON_PULMONIC_CONSONANTS, SymbolClass::NonPulmonicConsonant),
        (VOWELS, SymbolClass::Vowel),
        (SUPRASEGMENTALS, SymbolClass::Suprasegmental),
        (DIACRITICS, SymbolClass::Diacritic),
    ];
    tables
        .iter()
        .find(|(table, _)| table.contains(&symbol))
        .map(|(_, class)| *class)
}

pub fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Splits text into symbols of one base character each, keeping any
/// combining marks that follow it attached.
pub fn logical_symbols(text: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for c in text.chars() {
        match symbols.last_mut() {
            Some(last) if is_combining_mark(c) => last.push(c),
            _ => symbols.push(c.to_string()),
        }
    }
    symbols
}

/// The consonant/vowel inventory as stored in the language document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhoneticInventory {
    pub p_consonants: Vec<String>,
    pub np_consonants: Vec<String>,
    pub vowels: Vec<String>,
    pub v_diphthongs: Vec<String>,
}

impl PhoneticInventory {
    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        BTreeMap::from([
            ("p_consonants".to_string(), self.p_consonants),
            ("np_consonants".to_string(), self.np_consonants),
            ("vowels".to_string(), self.vowels),
            ("v_diphthongs".to_string(), self.v_diphthongs),
        ])
    }
}

/// Sorts the language's consonants and vowels into inventory buckets.
/// Symbols missing from the IPA tables are logged and left out.
pub fn phonetic_inventory(consonants: &[String], vowels: &[String]) -> PhoneticInventory {
    let mut inventory = PhoneticInventory::default();

    for consonant in consonants {
        match classify(consonant) {
            Some(SymbolClass::PulmonicConsonant) => inventory.p_consonants.push(consonant.clone()),
            Some(SymbolClass::NonPulmonicConsonant) => inventory.np_consonants.push(consonant.clone()),
            _ => warn!(%consonant, "consonant is neither pulmonic nor non-pulmonic, not inventoried"),
        }
    }

    for vowel in vowels {
        let chars: Vec<char> = vowel.chars().collect();
        match chars.as_slice() {
            [single] => {
                if classify(&single.to_string()) == Some(SymbolClass::Vowel) {
                    inventory.vowels.push(vowel.clone());
                } else {
                    warn!(%vowel, "not a valid IPA vowel, not inventoried");
                }
            }
            [base, modifier] if VOWEL_MODIFIERS.contains(modifier) => {
                if classify(&base.to_string()) == Some(SymbolClass::Vowel) {
                    inventory.vowels.push(vowel.clone());
                } else {
                    warn!(%vowel, "not a valid IPA vowel, not inventoried");
                }
            }
            _ => inventory.v_diphthongs.push(vowel.clone()),
        }
    }
    inventory
}

/// Every phoneme the save lists anywhere, sorted and unique.
pub fn phoneme_inventory(save: &VulgarlangSave) -> Vec<String> {
    let fields = [
        &save.word_initial_consonants,
        &save.mid_word_consonants,
        &save.word_final_consonants,
        &save.bws_vowels,
        &save.bws_2nd_vowels,
        &save.custom_consonants,
        &save.custom_vowels,
    ];
    let set: BTreeSet<String> = fields.iter().flat_map(|f| f.symbols()).collect();
    set.into_iter().collect()
}

fn escape_class_member(symbol: &str, out: &mut String) {
    for c in symbol.chars() {
        if matches!(c, '\\' | ']' | '[' | '^' | '-' | '&' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// A vowel set and the two regex character classes built from it. The
/// consonant class is "anything but a vowel", never an enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct CharClass {
    pub members: BTreeSet<String>,
    pub vowel: String,
    pub consonant: String,
}

impl CharClass {
    fn build(members: BTreeSet<String>, default_vowel: &str, default_consonant: &str) -> Self {
        if members.is_empty() {
            return CharClass {
                members,
                vowel: default_vowel.to_string(),
                consonant: default_consonant.to_string(),
            };
        }
        let mut body = String::new();
        for member in &members {
            escape_class_member(member, &mut body);
        }
        CharClass {
            vowel: format!("[{}]", body),
            consonant: format!("[^{}]", body),
            members,
        }
    }

    /// IPA vowels from the save's custom and basic-word vowel lists.
    pub fn ipa(save: &VulgarlangSave) -> Self {
        let joined: String = save
            .custom_vowels
            .symbols()
            .into_iter()
            .chain(save.bws_vowels.symbols())
            .collect();
        let members = logical_symbols(&joined).into_iter().collect();
        CharClass::build(members, DEFAULT_IPA_VOWEL_CLASS, DEFAULT_IPA_CONSONANT_CLASS)
    }

    /// Spelled vowels, as learnt while compiling spelling rules.
    pub fn spelling(members: BTreeSet<String>) -> Self {
        CharClass::build(members, DEFAULT_SPELLING_VOWEL_CLASS, DEFAULT_SPELLING_CONSONANT_CLASS)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.members.contains(symbol)
    }

    /// Replaces every `C` and `V` placeholder in one pass.
    pub fn substitute(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                'C' => out.push_str(&self.consonant),
                'V' => out.push_str(&self.vowel),
                _ => out.push(c),
            }
        }
        out
    }
}

/// IPA and spelling classes together, as needed by the affix compilers.
#[derive(Debug, Clone, PartialEq)]
pub struct PhonePatterns {
    pub ipa: CharClass,
    pub spelling: CharClass,
}

impl Default for PhonePatterns {
    fn default() -> Self {
        PhonePatterns {
            ipa: CharClass::build(BTreeSet::new(), DEFAULT_IPA_VOWEL_CLASS, DEFAULT_IPA_CONSONANT_CLASS),
            spelling: CharClass::spelling(BTreeSet::new()),
        }
    }
}

//*** END FILE: src/parsing/phonology.rs ***//
