use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Result;

use crate::models::Settings;
use crate::services::generator::ExcuseGenerator;

/// One user session: the generator plus the settings it was built from.
pub struct AppState {
    generator: Arc<Mutex<ExcuseGenerator>>,
    settings: Mutex<Settings>,
    settings_path: PathBuf,
}

impl AppState {
    pub fn new(generator: ExcuseGenerator, settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            generator: Arc::new(Mutex::new(generator)),
            settings: Mutex::new(settings),
            settings_path,
        }
    }

    pub fn from_settings(settings: Settings, settings_path: PathBuf) -> Result<Self> {
        let generator = ExcuseGenerator::from_settings(&settings)?;
        Ok(Self::new(generator, settings, settings_path))
    }

    pub fn generator(&self) -> Result<MutexGuard<'_, ExcuseGenerator>, String> {
        self.generator
            .lock()
            .map_err(|_| "generator state is poisoned".to_string())
    }

    /// Shared handle for work that runs on a blocking thread.
    pub fn generator_handle(&self) -> Arc<Mutex<ExcuseGenerator>> {
        Arc::clone(&self.generator)
    }

    pub fn settings(&self) -> Result<MutexGuard<'_, Settings>, String> {
        self.settings
            .lock()
            .map_err(|_| "settings state is poisoned".to_string())
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }
}
