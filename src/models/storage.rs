use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageStats {
    pub directory: String,
    pub total_size_bytes: u64,
    pub documents_count: u64,
    pub chats_count: u64,
    pub speech_count: u64,
    pub exports_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanupReport {
    pub files_removed: u64,
    pub bytes_removed: u64,
}
