use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofType {
    Document,
    Chat,
}

impl ProofType {
    /// Strict parse: only "document" and "chat" (any case) are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "document" => Some(ProofType::Document),
            "chat" => Some(ProofType::Chat),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_types_in_any_case() {
        assert_eq!(ProofType::parse("Document"), Some(ProofType::Document));
        assert_eq!(ProofType::parse("CHAT"), Some(ProofType::Chat));
        assert_eq!(ProofType::parse("invalid-type"), None);
        assert_eq!(ProofType::parse(""), None);
    }
}
