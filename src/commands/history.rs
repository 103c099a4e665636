use crate::app_state::AppState;
use crate::models::{HistoryView, SessionStats};

pub async fn get_history(state: &AppState) -> Result<Vec<HistoryView>, String> {
    let generator = state.generator()?;
    let history = generator
        .view_history()
        .iter()
        .map(|entry| HistoryView {
            average_rating: generator.average_rating(&entry.excuse),
            entry: entry.clone(),
        })
        .collect();
    Ok(history)
}

pub async fn auto_schedule(state: &AppState) -> Result<String, String> {
    Ok(state.generator()?.auto_schedule())
}

pub async fn get_session_stats(state: &AppState) -> Result<SessionStats, String> {
    Ok(state.generator()?.session_stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_state;

    #[tokio::test]
    async fn history_rows_carry_ratings() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let excuse = state
            .generator()
            .unwrap()
            .generate_excuse("school", "medium", Some("Bus strike"));
        state.generator().unwrap().rate_excuse(&excuse, 5);

        let rows = get_history(&state).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entry.excuse, "Bus strike");
        assert_eq!(rows[0].average_rating, Some(5.0));
        assert_eq!(
            auto_schedule(&state).await.unwrap(),
            "Based on past usage, you might need an excuse for school soon."
        );
        assert_eq!(get_session_stats(&state).await.unwrap().history_count, 1);
    }
}
