//*** START FILE: src/lib.rs ***//

// Declare all modules that are part of this library
pub mod config;
pub mod errors;
pub mod types {
    pub mod affix;
    pub mod language;
    pub mod lexicon_entry;
    pub mod sound_map;
    pub mod vulgarlang;
}
pub mod parsing;
pub mod lexicon;
pub mod language_builder;
pub mod language_io;

// Re-export the items the binary and other tooling reach for.
pub use errors::{LexiconError, Result};
pub use language_builder::{build_language, BuildOptions};
pub use types::language::LanguageDescription;
pub use types::lexicon_entry::LexiconEntry;

//*** END FILE: src/lib.rs ***//
