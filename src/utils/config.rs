use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::warn;

use crate::models::Settings;

const ENV_CONFIG: &str = "ALIBI_CONFIG";
const ENV_OUTPUT_DIR: &str = "ALIBI_OUTPUT_DIR";
const ENV_TTS_ENDPOINT: &str = "ALIBI_TTS_ENDPOINT";
const ENV_SEED: &str = "ALIBI_SEED";

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

pub fn settings_path() -> PathBuf {
    if let Ok(path) = std::env::var(ENV_CONFIG) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("alibi")
        .join("settings.json")
}

/// Read settings from `path`, falling back to defaults when the file is absent.
pub fn load_settings(path: &Path) -> Result<Settings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with<F>(path: &Path, lookup: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        serde_json::from_str::<Settings>(&content)
            .with_context(|| format!("failed to parse settings {}", path.display()))?
    } else {
        Settings::default()
    };
    apply_overrides_with(&mut settings, lookup);
    settings
        .validate()
        .map_err(|e| anyhow!("invalid settings {}: {}", path.display(), e))?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn apply_overrides_with<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
        settings.output.directory = PathBuf::from(dir);
    }
    if let Some(endpoint) = lookup(ENV_TTS_ENDPOINT) {
        settings.speech.endpoint = endpoint;
    }
    if let Some(seed) = lookup(ENV_SEED) {
        match seed.parse::<u64>() {
            Ok(seed) => settings.general.seed = Some(seed),
            Err(_) => warn!("[Config] ignoring non-numeric {}={}", ENV_SEED, seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overrides_replace_configured_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_OUTPUT_DIR, "/tmp/alibi-out"),
            (ENV_SEED, "17"),
            (ENV_TTS_ENDPOINT, "  "),
        ]);
        let mut settings = Settings::default();
        apply_overrides_with(&mut settings, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(settings.output.directory, PathBuf::from("/tmp/alibi-out"));
        assert_eq!(settings.general.seed, Some(17));
        assert_eq!(settings.speech.endpoint, Settings::default().speech.endpoint);
    }

    #[test]
    fn bad_seed_is_ignored() {
        let mut settings = Settings::default();
        apply_overrides_with(&mut settings, |k| (k == ENV_SEED).then(|| "abc".to_string()));
        assert_eq!(settings.general.seed, None);
    }

    #[test]
    fn save_then_load_keeps_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = Settings::default();
        settings.clinic.doctor = "Ada Smith".to_string();
        settings.chat.width = 320;

        settings.output.directory = dir.path().join("out");

        save_settings(&path, &settings).unwrap();
        let loaded = load_settings_with(&path, |_| None).unwrap();
        assert_eq!(loaded.clinic.doctor, "Ada Smith");
        assert_eq!(loaded.chat.width, 320);
        assert_eq!(loaded.output.directory, dir.path().join("out"));
        assert_eq!(loaded.general.seed, None);
    }

    #[test]
    fn environment_overrides_apply_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        save_settings(&path, &Settings::default()).unwrap();

        let loaded = load_settings_with(&path, |k| (k == ENV_SEED).then(|| "5".to_string())).unwrap();
        assert_eq!(loaded.general.seed, Some(5));
    }

    #[test]
    fn unusable_chat_settings_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.chat.font_size = 0.0;
        save_settings(&path, &settings).unwrap();

        let err = load_settings_with(&path, |_| None).unwrap_err();
        assert!(format!("{err:#}").contains("font_size"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_settings_with(&path, |_| None).is_err());
    }
}
