use crate::app_state::AppState;

pub async fn rate_excuse(state: &AppState, excuse: String, rating: u8) -> Result<Option<f64>, String> {
    let mut generator = state.generator()?;
    generator.rate_excuse(&excuse, rating);
    Ok(generator.average_rating(&excuse))
}

pub async fn get_average_rating(state: &AppState, excuse: String) -> Result<Option<f64>, String> {
    Ok(state.generator()?.average_rating(&excuse))
}

pub async fn save_to_favorites(state: &AppState, excuse: String) -> Result<bool, String> {
    if excuse.trim().is_empty() {
        return Err("Generate or enter an excuse first.".to_string());
    }
    Ok(state.generator()?.save_to_favorites(&excuse))
}

pub async fn get_favorites(state: &AppState) -> Result<Vec<String>, String> {
    Ok(state.generator()?.favorites().to_vec())
}
