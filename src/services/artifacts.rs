use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::Local;
use log::{debug, info, warn};
use regex::Regex;
use uuid::Uuid;

use crate::models::{CleanupReport, StorageStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Document,
    Chat,
    Speech,
    Export,
}

impl ArtifactKind {
    fn prefix(&self) -> &'static str {
        match self {
            ArtifactKind::Document => "medical_certificate",
            ArtifactKind::Chat => "chat_screenshot",
            ArtifactKind::Speech => "excuse_speech",
            ArtifactKind::Export => "session_export",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::Document => "pdf",
            ArtifactKind::Chat => "png",
            ArtifactKind::Speech => "mp3",
            ArtifactKind::Export => "json",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "medical_certificate" => Some(ArtifactKind::Document),
            "chat_screenshot" => Some(ArtifactKind::Chat),
            "excuse_speech" => Some(ArtifactKind::Speech),
            "session_export" => Some(ArtifactKind::Export),
            _ => None,
        }
    }
}

fn artifact_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(medical_certificate|chat_screenshot|excuse_speech|session_export)_\d{8}_\d{6}_[0-9a-f]{8}\.(pdf|png|mp3|json)$",
        )
        .expect("artifact name pattern is valid")
    })
}

/// Classify a file name as one of our generated artifacts.
pub fn classify(file_name: &str) -> Option<ArtifactKind> {
    let caps = artifact_name_pattern().captures(file_name)?;
    let kind = ArtifactKind::from_prefix(caps.get(1)?.as_str())?;
    (kind.extension() == caps.get(2)?.as_str()).then_some(kind)
}

/// Directory that receives every generated proof, speech file and export.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reserve a fresh, timestamped path for a new artifact.
    ///
    /// The random suffix keeps two artifacts created within the same second apart.
    pub fn next_path(&self, kind: ArtifactKind) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create artifact dir {}", self.dir.display()))?;

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let suffix = Uuid::new_v4().simple().to_string();
        let name = format!(
            "{}_{}_{}.{}",
            kind.prefix(),
            stamp,
            &suffix[..8],
            kind.extension()
        );
        Ok(self.dir.join(name))
    }

    pub fn stats(&self) -> Result<StorageStats> {
        let mut stats = StorageStats {
            directory: self.dir.to_string_lossy().to_string(),
            ..StorageStats::default()
        };
        if !self.dir.exists() {
            return Ok(stats);
        }

        for (path, kind) in self.generated_files()? {
            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            stats.total_size_bytes += size;
            match kind {
                ArtifactKind::Document => stats.documents_count += 1,
                ArtifactKind::Chat => stats.chats_count += 1,
                ArtifactKind::Speech => stats.speech_count += 1,
                ArtifactKind::Export => stats.exports_count += 1,
            }
        }
        Ok(stats)
    }

    /// Delete every generated artifact in the directory. Foreign files are left alone.
    pub fn cleanup(&self) -> Result<CleanupReport> {
        let mut report = CleanupReport::default();
        if !self.dir.exists() {
            return Ok(report);
        }

        for (path, _) in self.generated_files()? {
            let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!("[Artifacts] removed {}", path.display());
                    report.files_removed += 1;
                    report.bytes_removed += size;
                }
                Err(e) => warn!("[Artifacts] could not remove {}: {}", path.display(), e),
            }
        }

        info!(
            "[Artifacts] cleanup removed {} files ({} bytes)",
            report.files_removed, report.bytes_removed
        );
        Ok(report)
    }

    fn generated_files(&self) -> Result<Vec<(PathBuf, ArtifactKind)>> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("failed to list {}", self.dir.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            if let Some(kind) = name.to_str().and_then(classify) {
                files.push((entry.path(), kind));
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_path_names_match_the_artifact_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let pdf = store.next_path(ArtifactKind::Document).unwrap();
        let name = pdf.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("medical_certificate_"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(classify(name), Some(ArtifactKind::Document));
    }

    #[test]
    fn paths_reserved_in_the_same_second_differ() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let a = store.next_path(ArtifactKind::Chat).unwrap();
        let b = store.next_path(ArtifactKind::Chat).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn classify_rejects_foreign_and_mismatched_names() {
        assert_eq!(classify("notes.txt"), None);
        assert_eq!(classify("medical_certificate_20240101_101010_abcdef12.png"), None);
        assert_eq!(
            classify("excuse_speech_20240101_101010_abcdef12.mp3"),
            Some(ArtifactKind::Speech)
        );
    }

    #[test]
    fn cleanup_only_removes_generated_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let speech = store.next_path(ArtifactKind::Speech).unwrap();
        fs::write(&speech, b"ID3").unwrap();
        let export = store.next_path(ArtifactKind::Export).unwrap();
        fs::write(&export, b"{}").unwrap();
        let keep = dir.path().join("keep_me.pdf");
        fs::write(&keep, b"%PDF").unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.speech_count, 1);
        assert_eq!(stats.exports_count, 1);
        assert_eq!(stats.total_size_bytes, 5);

        let report = store.cleanup().unwrap();
        assert_eq!(report.files_removed, 2);
        assert_eq!(report.bytes_removed, 5);
        assert!(!speech.exists());
        assert!(!export.exists());
        assert!(keep.exists());
    }

    #[test]
    fn missing_directory_reports_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("never-created"));
        assert_eq!(store.stats().unwrap().total_size_bytes, 0);
        assert_eq!(store.cleanup().unwrap().files_removed, 0);
    }
}
