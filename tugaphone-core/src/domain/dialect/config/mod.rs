mod loader;
mod types;

pub use loader::{base_config, get_dialect_config, list_available_dialects};
pub use types::{
    CharactersConfig, DialectConfig, FinalSibilant, GraphemesConfig, LexicalConfig,
    MetadataConfig, PreNasalA, StrongRhotic, TogglesConfig, VowelReduction, VowelsConfig,
};
