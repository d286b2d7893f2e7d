//*** START FILE: src/language_io.rs ***//
use crate::errors::Result;
use crate::types::language::LanguageDescription;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Loads a generator save file as raw JSON. The raw form is kept so the
/// built document can embed it unchanged.
pub fn load_save(file_path: &Path) -> Result<Value> {
    let file = File::open(file_path)?;
    let reader = BufReader::new(file);
    let save = serde_json::from_reader(reader)?;
    info!(path = %file_path.display(), "loaded save file");
    Ok(save)
}

/// Loads a previously built language document.
pub fn load_language(file_path: &Path) -> Result<LanguageDescription> {
    let file = File::open(file_path)?;
    let reader = BufReader::new(file);
    let language: LanguageDescription = serde_json::from_reader(reader)?;
    info!(path = %file_path.display(), entries = language.lexicon.len(), "loaded language");
    Ok(language)
}

/// Writes the language document as pretty-printed UTF-8 JSON.
///
/// No byte-order mark is written. Files from the earlier tooling start with
/// one; `serde_json` readers reject it, and Windows tools that expect it may
/// guess a legacy code page for non-ASCII text such as IPA.
pub fn save_language(language: &LanguageDescription, file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, language)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(path = %file_path.display(), entries = language.lexicon.len(), "saved language");
    Ok(())
}

//*** END FILE: src/language_io.rs ***//
