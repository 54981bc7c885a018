use anyhow::Context;
use serde_json::{Value, json};
use vaani_core::{ValidationError, parse_language, require_text, score};
use vaani_speech::score_spoken;
use vaani_types::{Language, LanguagePair};

use crate::Commands;
use crate::state::AppState;

pub async fn execute(state: &AppState, command: Commands) -> anyhow::Result<Value> {
    match command {
        Commands::Languages => Ok(languages(state)),
        Commands::Translate {
            text,
            source,
            target,
        } => translate(state, &text, &source, &target).await,
        Commands::Score {
            reference,
            attempt,
            audio,
            language,
        } => {
            let reference = require_text("reference_text", Some(reference.as_str()))?;
            match (attempt, audio) {
                (Some(attempt), _) => {
                    let attempt = require_text("user_text", Some(attempt.as_str()))?;
                    let result = score(&reference, Some(attempt.as_str()));
                    Ok(serde_json::to_value(result)?)
                }
                (None, Some(path)) => {
                    let language = parse_language("language", &language)?;
                    let audio = tokio::fs::read(&path)
                        .await
                        .with_context(|| format!("reading {}", path.display()))?;
                    let spoken =
                        score_spoken(state.stt.as_ref(), &reference, &audio, language).await?;
                    Ok(serde_json::to_value(spoken)?)
                }
                (None, None) => Err(ValidationError::MissingText { field: "user_text" }.into()),
            }
        }
        Commands::Speak {
            text,
            language,
            output,
        } => {
            if text.trim().is_empty() {
                return Err(ValidationError::MissingText { field: "text" }.into());
            }
            let language = parse_language("language", &language)?;

            let audio = state.tts.synthesize(text.trim(), language).await?;
            tokio::fs::write(&output, &audio)
                .await
                .with_context(|| format!("writing {}", output.display()))?;
            tracing::info!(bytes = audio.len(), "wrote {}", output.display());

            Ok(json!({
                "output": output.display().to_string(),
                "bytes": audio.len(),
                "language": language,
            }))
        }
        Commands::Transcribe { audio, language } => {
            let language = parse_language("language", &language)?;
            let bytes = tokio::fs::read(&audio)
                .await
                .with_context(|| format!("reading {}", audio.display()))?;
            let text = state.stt.transcribe(&bytes, language).await?;
            Ok(json!({ "text": text, "language": language }))
        }
    }
}

fn languages(state: &AppState) -> Value {
    let languages: Vec<Value> = Language::ALL
        .iter()
        .map(|l| {
            json!({
                "code": l.code(),
                "name": l.name(),
                "locale": l.locale(),
                "flag": l.flag(),
            })
        })
        .collect();

    json!({
        "languages": languages,
        "pairs": state.dispatcher.supported_pairs(),
    })
}

async fn translate(
    state: &AppState,
    text: &str,
    source: &str,
    target: &str,
) -> anyhow::Result<Value> {
    let text = require_text("text", Some(text))?;
    let pair = LanguagePair::new(
        parse_language("source", source)?,
        parse_language("target", target)?,
    );

    let translation = state.dispatcher.translate_pair(&text, pair).await?;
    tracing::info!(
        pair = %translation.pair,
        backend_id = %translation.backend_id,
        overridden = translation.overridden,
        "translated"
    );

    Ok(serde_json::to_value(translation)?)
}
