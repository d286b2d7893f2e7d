//*** START FILE: src/types/affix.rs ***//
//! Affix rules as they appear in the language document.
//!
//! The affix map keeps the document shape other tooling relies on:
//! `{ part_of_speech: [ { affix_kind: [ { declension: rule }, ... ] }, ... ] }`.
//! [`AffixSlot`] and [`DeclensionRule`] are the typed form of the two
//! single-key maps in that shape.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AffixKind {
    Prefix,
    Suffix,
    /// A separate word; never concatenated onto the declined word.
    Particle,
    Replacement,
}

impl AffixKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AffixKind::Prefix => "prefix",
            AffixKind::Suffix => "suffix",
            AffixKind::Particle => "particle",
            AffixKind::Replacement => "replacement",
        }
    }
}

impl fmt::Display for AffixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One affix rule. Which end of the word it attaches to comes from the slot
/// kind (or the derivational affix position), not from the rule itself.
///
/// Deserialization goes through [`AffixRecord`]: only a truly empty map reads
/// as [`Affix::Empty`], anything else that fits no shape is rejected.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Affix {
    /// Full regex substitution over the phonetic form.
    Replacement {
        pronunciation_regex: String,
        spelling_regex: String,
        pronunciation_replacement: String,
        spelling_replacement: String,
    },
    /// Adds `t_*` when `pronunciation_regex` matches the word, `f_*` otherwise.
    Conditional {
        pronunciation_regex: String,
        spelling_regex: String,
        t_pronunciation_add: String,
        t_spelling_add: String,
        f_pronunciation_add: String,
        f_spelling_add: String,
    },
    Plain {
        pronunciation_add: String,
        spelling_add: String,
    },
    /// An empty table cell: the declined form equals the input form.
    Empty {},
}

/// Wire form of [`Affix`]. Same shapes, but the empty rule refuses any field.
#[derive(Deserialize)]
#[serde(untagged)]
enum AffixRecord {
    Replacement {
        pronunciation_regex: String,
        spelling_regex: String,
        pronunciation_replacement: String,
        spelling_replacement: String,
    },
    Conditional {
        pronunciation_regex: String,
        spelling_regex: String,
        t_pronunciation_add: String,
        t_spelling_add: String,
        f_pronunciation_add: String,
        f_spelling_add: String,
    },
    Plain {
        pronunciation_add: String,
        spelling_add: String,
    },
    Empty(EmptyRecord),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EmptyRecord {}

impl From<AffixRecord> for Affix {
    fn from(record: AffixRecord) -> Self {
        match record {
            AffixRecord::Replacement {
                pronunciation_regex,
                spelling_regex,
                pronunciation_replacement,
                spelling_replacement,
            } => Affix::Replacement {
                pronunciation_regex,
                spelling_regex,
                pronunciation_replacement,
                spelling_replacement,
            },
            AffixRecord::Conditional {
                pronunciation_regex,
                spelling_regex,
                t_pronunciation_add,
                t_spelling_add,
                f_pronunciation_add,
                f_spelling_add,
            } => Affix::Conditional {
                pronunciation_regex,
                spelling_regex,
                t_pronunciation_add,
                t_spelling_add,
                f_pronunciation_add,
                f_spelling_add,
            },
            AffixRecord::Plain {
                pronunciation_add,
                spelling_add,
            } => Affix::Plain {
                pronunciation_add,
                spelling_add,
            },
            AffixRecord::Empty(EmptyRecord {}) => Affix::Empty {},
        }
    }
}

impl<'de> Deserialize<'de> for Affix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        AffixRecord::deserialize(deserializer)
            .map(Affix::from)
            .map_err(|_| de::Error::custom("affix rule is not a replacement, conditional, plain or empty rule"))
    }
}

impl Affix {
    pub fn is_empty(&self) -> bool {
        matches!(self, Affix::Empty {})
    }

    /// Pattern the declension engine has to compile for this rule, if any.
    pub fn pronunciation_regex(&self) -> Option<&str> {
        match self {
            Affix::Replacement { pronunciation_regex, .. } | Affix::Conditional { pronunciation_regex, .. } => {
                Some(pronunciation_regex)
            }
            _ => None,
        }
    }
}

/// `{ declension_label: rule }` in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclensionRule {
    pub declension: String,
    pub affix: Affix,
}

impl DeclensionRule {
    pub fn new(declension: impl Into<String>, affix: Affix) -> Self {
        DeclensionRule {
            declension: declension.into(),
            affix,
        }
    }
}

impl Serialize for DeclensionRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.declension, &self.affix)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for DeclensionRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, Affix>::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(de::Error::custom(format!(
                "declension rule must have exactly one key, found {}",
                map.len()
            )));
        }
        let (declension, affix) = map.into_iter().next().ok_or_else(|| de::Error::custom("empty declension rule"))?;
        Ok(DeclensionRule { declension, affix })
    }
}

/// `{ affix_kind: [ DeclensionRule, ... ] }` in the document. Each slot is an
/// independent choice point during declension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixSlot {
    pub kind: AffixKind,
    pub rules: Vec<DeclensionRule>,
}

impl AffixSlot {
    pub fn new(kind: AffixKind, rules: Vec<DeclensionRule>) -> Self {
        AffixSlot { kind, rules }
    }
}

impl Serialize for AffixSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.kind, &self.rules)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for AffixSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<AffixKind, Vec<DeclensionRule>>::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(de::Error::custom(format!(
                "affix slot must have exactly one key, found {}",
                map.len()
            )));
        }
        let (kind, rules) = map.into_iter().next().ok_or_else(|| de::Error::custom("empty affix slot"))?;
        Ok(AffixSlot { kind, rules })
    }
}

/// Part of speech -> ordered affix slots.
pub type AffixMap = BTreeMap<String, Vec<AffixSlot>>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AffixPosition {
    Prefix,
    Suffix,
}

/// Word-formation affix, referenced from derived word rules by its tag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DerivationalAffix {
    #[serde(rename = "type")]
    pub position: AffixPosition,
    #[serde(flatten)]
    pub rule: Affix,
}

/// Derivation tag -> affix.
pub type DerivationalAffixMap = BTreeMap<String, DerivationalAffix>;

//*** END FILE: src/types/affix.rs ***//
