use crate::app_state::AppState;

pub async fn generate_excuse(
    state: &AppState,
    scenario: String,
    urgency: String,
    custom_excuse: Option<String>,
) -> Result<String, String> {
    let mut generator = state.generator()?;
    Ok(generator.generate_excuse(&scenario, &urgency, custom_excuse.as_deref()))
}

pub async fn generate_apology(state: &AppState, tone: String) -> Result<String, String> {
    let generator = state.generator()?;
    Ok(generator.generate_apology(&tone).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_state;

    #[tokio::test]
    async fn excuse_command_records_history() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let excuse = generate_excuse(&state, "Work".into(), "High".into(), None)
            .await
            .unwrap();
        assert!(excuse.starts_with("Urgent: "));
        assert_eq!(state.generator().unwrap().view_history().len(), 1);
    }

    #[tokio::test]
    async fn apology_defaults_to_professional() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let unknown = generate_apology(&state, "weird".into()).await.unwrap();
        let professional = generate_apology(&state, "Professional".into()).await.unwrap();
        assert_eq!(unknown, professional);
        assert!(professional.starts_with("I sincerely apologize"));
    }
}
