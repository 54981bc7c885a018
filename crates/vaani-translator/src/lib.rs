pub mod backend;
pub mod cache;
pub mod dispatcher;
pub mod error;
pub mod mock;
pub mod overrides;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use backend::{BackendDescriptor, BackendLoader, BackendTags, TranslationBackend};
pub use cache::{BackendCache, ModelCache};
pub use dispatcher::{Translation, TranslationDispatcher};
pub use error::{BackendError, TranslateError};
pub use overrides::{OverrideRule, OverrideRules};
pub use resolver::PairResolver;
