pub mod error;
pub mod gtts;
pub mod provider;
pub mod spoken;
pub mod whisper;

pub use error::SpeechError;
pub use gtts::{GoogleTts, GoogleTtsSettings};
pub use provider::{Retrying, SpeechSynthesizer, SpeechToText};
pub use spoken::{SpokenScore, score_spoken};
pub use whisper::{WhisperClient, WhisperSettings};
