use crate::app_state::AppState;

pub async fn generate_speech(
    state: &AppState,
    text: String,
    lang: Option<String>,
) -> Result<String, String> {
    let lang = match lang.filter(|l| !l.trim().is_empty()) {
        Some(lang) => lang,
        None => state.settings()?.general.language.clone(),
    };

    let generator = state.generator_handle();
    let path = tokio::task::spawn_blocking(move || {
        let generator = generator
            .lock()
            .map_err(|_| "generator state is poisoned".to_string())?;
        generator
            .generate_speech(&text, &lang)
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("speech task failed: {}", e))??;

    Ok(path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_state;

    #[tokio::test]
    async fn speech_uses_default_language() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let path = generate_speech(&state, "See you soon".into(), None).await.unwrap();
        assert!(path.ends_with(".mp3"));
    }

    #[tokio::test]
    async fn empty_text_is_a_generation_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let err = generate_speech(&state, "".into(), Some("en".into())).await.unwrap_err();
        assert!(err.starts_with("Error generating speech:"));
    }
}
