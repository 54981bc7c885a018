use serde::Serialize;
use vaani_types::{Language, ScoreResult};

use crate::error::SpeechError;
use crate::provider::SpeechToText;

/// Score of a recorded attempt along with what the recognizer heard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpokenScore {
    pub transcript: String,
    #[serde(flatten)]
    pub result: ScoreResult,
}

/// Transcribe `audio` and score the transcript against `reference`
pub async fn score_spoken(
    stt: &dyn SpeechToText,
    reference: &str,
    audio: &[u8],
    language: Language,
) -> Result<SpokenScore, SpeechError> {
    let transcript = stt.transcribe(audio, language).await?;
    let result = vaani_core::score(reference, Some(transcript.as_str()));

    tracing::debug!(
        provider = stt.name(),
        score = result.score,
        "scored spoken attempt"
    );

    Ok(SpokenScore { transcript, result })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use vaani_types::Feedback;

    struct Canned(&'static str);

    #[async_trait]
    impl SpeechToText for Canned {
        async fn transcribe(
            &self,
            audio: &[u8],
            _language: Language,
        ) -> Result<String, SpeechError> {
            if audio.is_empty() {
                return Err(SpeechError::EmptyAudio);
            }
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    #[tokio::test]
    async fn test_scores_transcript() {
        let stt = Canned(" Hello! ");
        let spoken = score_spoken(&stt, "hello", b"RIFF", Language::En).await.unwrap();
        assert_eq!(spoken.transcript, " Hello! ");
        assert_eq!(spoken.result.score, 100);
        assert_eq!(spoken.result.feedback, Feedback::Excellent);
    }

    #[tokio::test]
    async fn test_transcription_error_propagates() {
        let stt = Canned("unused");
        let err = score_spoken(&stt, "hello", &[], Language::En).await.unwrap_err();
        assert!(matches!(err, SpeechError::EmptyAudio));
    }

    #[tokio::test]
    async fn test_serializes_flat() {
        let stt = Canned("helxo");
        let spoken = score_spoken(&stt, "hello", b"RIFF", Language::En).await.unwrap();
        let json = serde_json::to_value(&spoken).unwrap();
        assert_eq!(json["transcript"], "helxo");
        assert_eq!(json["score"], 80);
        assert_eq!(json["feedback"], "Good pronunciation.");
    }
}
