use std::fs;

use crate::app_state::AppState;
use crate::models::{CleanupReport, StorageStats};
use crate::services::artifacts::ArtifactKind;

pub async fn get_storage_stats(state: &AppState) -> Result<StorageStats, String> {
    let artifacts = state.generator()?.artifacts().clone();
    artifacts.stats().map_err(|e| format!("{:#}", e))
}

/// Remove generated files from the current output directory and from any
/// directory the session wrote to before the output setting changed.
pub async fn cleanup_temp_files(state: &AppState) -> Result<CleanupReport, String> {
    let stores = state.generator()?.all_artifacts();

    let mut total = CleanupReport::default();
    for store in stores {
        let report = store.cleanup().map_err(|e| format!("{:#}", e))?;
        total.files_removed += report.files_removed;
        total.bytes_removed += report.bytes_removed;
    }
    Ok(total)
}

pub async fn export_history(state: &AppState) -> Result<String, String> {
    let generator = state.generator()?;

    let export = serde_json::json!({
        "version": "1.0.0",
        "exported_at": chrono::Local::now().to_rfc3339(),
        "stats": generator.session_stats(),
        "session": generator.snapshot(),
    });

    let export_path = generator
        .artifacts()
        .next_path(ArtifactKind::Export)
        .map_err(|e| format!("{:#}", e))?;
    let content = serde_json::to_string_pretty(&export).map_err(|e| e.to_string())?;
    fs::write(&export_path, content).map_err(|e| e.to_string())?;

    Ok(export_path.to_string_lossy().to_string())
}
