use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Local;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::error::GeneratorError;
use crate::models::{
    ChatSettings, ClinicSettings, HistoryEntry, ProofType, Scenario, SessionStats, Settings, Tone,
    Urgency,
};
use crate::services::artifacts::{ArtifactKind, ArtifactStore};
use crate::services::certificate::{self, CertificateDetails};
use crate::services::chat_image::{self, TextRasterizer};
use crate::services::speech::{GoogleTranslateTts, SpeechSynthesizer};
use crate::services::templates;

/// Serializable copy of everything a session has accumulated.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot<'a> {
    pub history: &'a [HistoryEntry],
    pub favorites: &'a [String],
    pub ratings: &'a HashMap<String, Vec<u8>>,
}

/// Session-scoped excuse state: history, favorites and ratings, plus the
/// collaborators that turn excuses into proof files and audio.
///
/// Ratings and favorites are keyed by the excuse text itself, so identical
/// text from different scenarios shares one bucket.
pub struct ExcuseGenerator {
    rng: StdRng,
    history: Vec<HistoryEntry>,
    favorites: Vec<String>,
    ratings: HashMap<String, Vec<u8>>,
    artifacts: ArtifactStore,
    retired_artifacts: Vec<ArtifactStore>,
    clinic: ClinicSettings,
    chat: ChatSettings,
    rasterizer: Option<TextRasterizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl ExcuseGenerator {
    pub fn new(
        rng: StdRng,
        artifacts: ArtifactStore,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            rng,
            history: Vec::new(),
            favorites: Vec::new(),
            ratings: HashMap::new(),
            artifacts,
            retired_artifacts: Vec::new(),
            clinic: ClinicSettings::default(),
            chat: ChatSettings::default(),
            rasterizer: None,
            synthesizer,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let rng = match settings.general.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let synthesizer = Arc::new(GoogleTranslateTts::new(&settings.speech)?);
        let mut generator = Self::new(
            rng,
            ArtifactStore::new(&settings.output.directory),
            synthesizer,
        );
        generator.apply_settings(settings);
        Ok(generator)
    }

    /// Pick up clinic, chat and output changes without losing session data.
    /// A replaced output directory stays reachable through [`Self::all_artifacts`].
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.clinic = settings.clinic.clone();
        self.chat = settings.chat.clone();

        if self.artifacts.dir() != settings.output.directory.as_path() {
            let previous = std::mem::replace(
                &mut self.artifacts,
                ArtifactStore::new(&settings.output.directory),
            );
            info!(
                "[Artifacts] output moved {} -> {}",
                previous.dir().display(),
                self.artifacts.dir().display()
            );
            let current = self.artifacts.dir().to_path_buf();
            self.retired_artifacts.retain(|store| store.dir() != current);
            if !self.retired_artifacts.iter().any(|store| store.dir() == previous.dir()) {
                self.retired_artifacts.push(previous);
            }
        }
    }

    /// Where new artifacts are written.
    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Current output directory followed by every directory used earlier this session.
    pub fn all_artifacts(&self) -> Vec<ArtifactStore> {
        std::iter::once(&self.artifacts)
            .chain(self.retired_artifacts.iter())
            .cloned()
            .collect()
    }

    pub fn generate_excuse(&mut self, scenario: &str, urgency: &str, custom: Option<&str>) -> String {
        let scenario = Scenario::parse_or_default(scenario);
        let urgency = Urgency::parse_or_default(urgency);

        let base = match custom.filter(|text| !text.trim().is_empty()) {
            Some(text) => text.to_string(),
            None => templates::excuses_for(scenario)
                .choose(&mut self.rng)
                .copied()
                .unwrap_or_default()
                .to_string(),
        };
        let excuse = format!("{}{}", urgency.prefix(), base);

        debug!("[Excuse] {} / {:?}: {}", scenario, urgency, excuse);
        self.history.push(HistoryEntry::new(scenario, excuse.clone()));
        excuse
    }

    pub fn generate_apology(&self, tone: &str) -> &'static str {
        templates::apology_for(Tone::parse_or_default(tone))
    }

    pub fn generate_proof(
        &mut self,
        excuse: &str,
        proof_type: &str,
        patient_name: Option<&str>,
    ) -> Result<PathBuf, GeneratorError> {
        let Some(kind) = ProofType::parse(proof_type) else {
            return Err(GeneratorError::InvalidArgument(
                "Invalid proof type. Use 'document' or 'chat'.".to_string(),
            ));
        };

        let result = match kind {
            ProofType::Document => self.write_document(excuse, patient_name),
            ProofType::Chat => self.write_chat(excuse),
        };

        match result {
            Ok(path) => {
                info!("[Proof] {:?} written to {}", kind, path.display());
                Ok(path)
            }
            Err(e) => {
                warn!("[Proof] {:?} generation failed: {:#}", kind, e);
                Err(GeneratorError::proof_failure(&e))
            }
        }
    }

    fn write_document(&self, excuse: &str, patient_name: Option<&str>) -> Result<PathBuf> {
        let path = self.artifacts.next_path(ArtifactKind::Document)?;
        let details = CertificateDetails {
            clinic: &self.clinic,
            patient_name,
            reason: excuse,
            date: Local::now().format("%Y-%m-%d").to_string(),
        };
        certificate::write_certificate(&path, &details)?;
        Ok(path)
    }

    fn write_chat(&mut self, excuse: &str) -> Result<PathBuf> {
        let path = self.artifacts.next_path(ArtifactKind::Chat)?;
        let rasterizer = self.rasterizer.get_or_insert_with(TextRasterizer::new);
        chat_image::write_chat_screenshot(rasterizer, &self.chat, excuse, &path)?;
        Ok(path)
    }

    pub fn generate_speech(&self, text: &str, language: &str) -> Result<PathBuf, GeneratorError> {
        self.write_speech(text, language).map_err(|e| {
            warn!("[Speech] synthesis failed: {:#}", e);
            GeneratorError::speech_failure(&e)
        })
    }

    fn write_speech(&self, text: &str, language: &str) -> Result<PathBuf> {
        if text.trim().is_empty() {
            bail!("no text to speak");
        }
        let audio = self.synthesizer.synthesize(text, language)?;
        let path = self.artifacts.next_path(ArtifactKind::Speech)?;
        fs::write(&path, &audio)
            .with_context(|| format!("failed to write audio {}", path.display()))?;
        info!("[Speech] {} bytes ({}) -> {}", audio.len(), language, path.display());
        Ok(path)
    }

    pub fn rate_excuse(&mut self, excuse: &str, rating: u8) {
        self.ratings.entry(excuse.to_string()).or_default().push(rating);
    }

    pub fn average_rating(&self, excuse: &str) -> Option<f64> {
        let bucket = self.ratings.get(excuse).filter(|b| !b.is_empty())?;
        let sum: u32 = bucket.iter().map(|&r| r as u32).sum();
        Some(sum as f64 / bucket.len() as f64)
    }

    pub fn save_to_favorites(&mut self, excuse: &str) -> bool {
        if self.favorites.iter().any(|f| f == excuse) {
            return false;
        }
        self.favorites.push(excuse.to_string());
        true
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn view_history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn auto_schedule(&self) -> String {
        match self.history.last() {
            Some(last) => format!(
                "Based on past usage, you might need an excuse for {} soon.",
                last.scenario
            ),
            None => "No history available to predict.".to_string(),
        }
    }

    pub fn session_stats(&self) -> SessionStats {
        SessionStats {
            history_count: self.history.len(),
            favorites_count: self.favorites.len(),
            rated_excuses: self.ratings.values().filter(|b| !b.is_empty()).count(),
            total_ratings: self.ratings.values().map(Vec::len).sum(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            history: &self.history,
            favorites: &self.favorites,
            ratings: &self.ratings,
        }
    }
}
