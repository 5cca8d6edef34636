mod backend;
mod cache;
mod cell;
mod google;
mod language;
mod policy;

pub use backend::{Backend, BackendError};
pub use cache::TranslationCache;
pub use cell::{CellOutcome, CellStats, CellTranslator};
pub use google::{DEFAULT_ENDPOINT, GoogleTranslateClient};
pub use language::{
    DEFAULT_TARGET_LANGUAGE, SUPPORTED_LANGUAGES, print_languages, validate_language,
};
pub use policy::ColumnPolicy;
