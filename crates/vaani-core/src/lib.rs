pub mod normalize;
pub mod retry;
pub mod scoring;
pub mod validate;

pub use normalize::{NormalizedText, normalize, normalize_list, normalize_opt};
pub use retry::{RetryPolicy, RetryableError};
pub use scoring::{score, similarity};
pub use validate::{ValidationError, parse_language, require_text};
