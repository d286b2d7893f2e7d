//*** START FILE: src/parsing/mod.rs ***//
pub mod affix_rules;
pub mod grammar_table;
pub mod phonology;
pub mod spelling_rules;
pub mod word_list;

// Re-export the compile entry points for convenience
pub use affix_rules::AffixRuleCompiler;
pub use grammar_table::{compile_affix_table, GrammarTables};
pub use phonology::{phonetic_inventory, phoneme_inventory, CharClass, PhonePatterns};
pub use spelling_rules::{compile_sound_map, CompiledSpelling};
pub use word_list::{parse_derivational_affixes, parse_word_list};
//*** END FILE: src/parsing/mod.rs ***//
