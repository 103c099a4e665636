use crate::app_state::AppState;

pub async fn generate_proof(
    state: &AppState,
    excuse: String,
    proof_type: String,
    patient_name: Option<String>,
) -> Result<String, String> {
    if excuse.trim().is_empty() {
        return Err("Generate or enter an excuse first.".to_string());
    }

    let generator = state.generator_handle();
    let path = tokio::task::spawn_blocking(move || {
        let mut generator = generator
            .lock()
            .map_err(|_| "generator state is poisoned".to_string())?;
        generator
            .generate_proof(&excuse, &proof_type, patient_name.as_deref())
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("proof task failed: {}", e))??;

    Ok(path.to_string_lossy().to_string())
}
