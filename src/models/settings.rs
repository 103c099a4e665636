use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub version: String,
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub clinic: ClinicSettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub speech: SpeechSettings,
}

impl Settings {
    /// Reject values the renderers cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        self.chat.validate()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            general: GeneralSettings::default(),
            output: OutputSettings::default(),
            clinic: ClinicSettings::default(),
            chat: ChatSettings::default(),
            speech: SpeechSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    pub language: String,
    /// Fixed seed for template selection; `None` seeds from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("alibi")
        .join("artifacts")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicSettings {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub city: String,
    pub doctor: String,
    pub license_no: String,
}

impl Default for ClinicSettings {
    fn default() -> Self {
        Self {
            name: "City Health Clinic".to_string(),
            address: "123 Health St, Bengaluru, Karnataka 560102".to_string(),
            contact: "Phone: +91 8062181856 | Email: support@clinic.org".to_string(),
            city: "Bengaluru".to_string(),
            doctor: "John Doe".to_string(),
            license_no: "KA123456".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSettings {
    pub width: u32,
    pub height: u32,
    pub sender: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 600,
            sender: "Friend".to_string(),
            font_size: default_font_size(),
        }
    }
}

/// Largest chat screenshot edge, in pixels.
pub const MAX_CHAT_DIMENSION: u32 = 8192;

impl ChatSettings {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_CHAT_DIMENSION {
                return Err(format!(
                    "chat {name} must be between 1 and {MAX_CHAT_DIMENSION}, got {value}"
                ));
            }
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(format!("chat font_size must be positive, got {}", self.font_size));
        }
        Ok(())
    }
}

fn default_font_size() -> f32 {
    12.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    pub endpoint: String,
    pub timeout_secs: u64,
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://translate.google.com/translate_tts".to_string(),
            timeout_secs: 15,
            chunk_chars: default_chunk_chars(),
        }
    }
}

fn default_chunk_chars() -> usize {
    100
}
