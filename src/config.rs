//*** START FILE: src/config.rs ***//
use crate::errors::{LexiconError, Result};
use crate::language_builder::BuildOptions;
use crate::lexicon::ordering::DEFAULT_ALPHABET;
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Config file looked up when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Voices {
    pub polly: Option<String>,
    pub espeak: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub derive: bool,
    pub decline: bool,
    pub default_alphabet: String,
    pub preferred_language: Option<String>,
    pub voices: Voices,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            derive: true,
            decline: false,
            default_alphabet: DEFAULT_ALPHABET.to_string(),
            preferred_language: None,
            voices: Voices::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            derive: self.derive,
            decline: self.decline,
            voice: self.voices.polly.clone(),
            espeak_language: self.voices.espeak.clone(),
            preferred_language: self.preferred_language.clone(),
            default_alphabet: self.default_alphabet.clone(),
        }
    }
}

pub fn load_config_from_file(file_path: &Path) -> Result<GeneratorConfig> {
    let contents = fs::read_to_string(file_path)?;
    toml::from_str::<GeneratorConfig>(&contents).map_err(|source| LexiconError::Config {
        path: file_path.to_path_buf(),
        source,
    })
}

/// An explicit path must exist; without one, a missing `config.toml`
/// means the defaults.
pub fn load_config(file_path: Option<&Path>) -> Result<GeneratorConfig> {
    match file_path {
        Some(path) => load_config_from_file(path),
        None => match load_config_from_file(Path::new(DEFAULT_CONFIG_PATH)) {
            Err(LexiconError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(GeneratorConfig::default()),
            other => other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config: GeneratorConfig = toml::from_str("decline = true\n[voices]\npolly = \"Joanna\"\n").unwrap();
        assert!(config.derive);
        assert!(config.decline);
        assert_eq!(config.default_alphabet, DEFAULT_ALPHABET);
        let options = config.build_options();
        assert_eq!(options.voice.as_deref(), Some("Joanna"));
        assert_eq!(options.espeak_language, None);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/conlang.toml"))).unwrap_err();
        assert!(matches!(err, LexiconError::Io(_)));
    }

    #[test]
    fn bad_toml_names_the_file() {
        let path = std::env::temp_dir().join(format!("conlang_lexicon_{}_bad.toml", std::process::id()));
        fs::write(&path, "derive = \"sometimes\"").unwrap();
        let err = load_config_from_file(&path).unwrap_err();
        assert!(matches!(err, LexiconError::Config { path: ref p, .. } if *p == path));
        fs::remove_file(&path).unwrap();
    }
}
//*** END FILE: src/config.rs ***//
