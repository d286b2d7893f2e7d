//*** START FILE: src/types/sound_map.rs ***//
use serde::{Deserialize, Serialize};

/// Placeholder pronunciation pattern for rules that must never fire when
/// sounding a spelled word out.
pub const UNMATCHABLE_PATTERN: &str = "&&&&&&";

/// Primary and secondary stress marks.
pub const PRIMARY_STRESS: &str = "ˈ";
pub const SECONDARY_STRESS: &str = "ˌ";

/// One compiled spelling rule: `spelling_regex` is searched in phonetic text
/// and replaced by `romanization`. `pronunciation_regex`/`phoneme` hold the
/// reverse direction. Replacement text keeps `$1`-style group references.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SoundMap {
    pub phoneme: String,
    pub romanization: String,
    pub spelling_regex: String,
    pub pronunciation_regex: String,
}

impl SoundMap {
    pub fn new(phoneme: &str, romanization: &str, spelling_regex: &str, pronunciation_regex: &str) -> Self {
        SoundMap {
            phoneme: phoneme.to_string(),
            romanization: romanization.to_string(),
            spelling_regex: spelling_regex.to_string(),
            pronunciation_regex: pronunciation_regex.to_string(),
        }
    }

    /// A plain `phoneme > romanization` rule.
    pub fn literal(phoneme: &str, romanization: &str) -> Self {
        SoundMap::new(phoneme, romanization, phoneme, romanization)
    }

    /// Stress marks are removed from spelling and never sounded back out.
    pub fn stress_marks() -> Vec<SoundMap> {
        vec![
            SoundMap::new(PRIMARY_STRESS, "", PRIMARY_STRESS, UNMATCHABLE_PATTERN),
            SoundMap::new(SECONDARY_STRESS, "", SECONDARY_STRESS, UNMATCHABLE_PATTERN),
        ]
    }
}
//*** END FILE: src/types/sound_map.rs ***//
