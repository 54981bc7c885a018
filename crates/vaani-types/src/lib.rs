pub mod language;
pub mod score;

pub use language::{Language, LanguagePair, UnknownLanguage, supported_codes};
pub use score::{Feedback, ScoreResult};
