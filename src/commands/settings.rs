use log::info;

use crate::app_state::AppState;
use crate::models::Settings;
use crate::utils::config;

pub async fn get_settings(state: &AppState) -> Result<Settings, String> {
    Ok(state.settings()?.clone())
}

/// Persist new settings and apply them to the running session. History,
/// favorites and ratings survive the change.
pub async fn update_settings(state: &AppState, settings: Settings) -> Result<(), String> {
    settings.validate()?;
    config::save_settings(state.settings_path(), &settings).map_err(|e| format!("{:#}", e))?;

    state.generator()?.apply_settings(&settings);
    *state.settings()? = settings;

    info!("[Settings] updated {}", state.settings_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_state;

    #[tokio::test]
    async fn update_persists_and_keeps_history() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        state.generator().unwrap().generate_excuse("work", "medium", None);

        let mut settings = get_settings(&state).await.unwrap();
        settings.chat.sender = "Boss".to_string();
        update_settings(&state, settings).await.unwrap();

        assert_eq!(get_settings(&state).await.unwrap().chat.sender, "Boss");
        assert!(state.settings_path().exists());
        assert_eq!(state.generator().unwrap().view_history().len(), 1);
    }

    #[tokio::test]
    async fn invalid_chat_settings_are_rejected_and_session_survives() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        state.generator().unwrap().generate_excuse("work", "medium", None);

        let mut settings = get_settings(&state).await.unwrap();
        settings.chat.font_size = 0.0;
        assert!(update_settings(&state, settings).await.is_err());

        let mut settings = get_settings(&state).await.unwrap();
        settings.chat.width = u32::MAX;
        settings.chat.height = u32::MAX;
        assert!(update_settings(&state, settings).await.is_err());

        assert!(!state.settings_path().exists());
        assert_eq!(get_settings(&state).await.unwrap().chat.font_size, 12.0);
        let path = crate::commands::proof::generate_proof(&state, "reason".into(), "chat".into(), None)
            .await
            .unwrap();
        assert!(std::path::Path::new(&path).exists());
        assert_eq!(state.generator().unwrap().view_history().len(), 1);
    }
}
