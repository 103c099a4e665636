use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Work,
    School,
    Social,
    Family,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Work,
        Scenario::School,
        Scenario::Social,
        Scenario::Family,
    ];

    /// Lenient parse: anything unrecognized is treated as `Social`.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "work" => Scenario::Work,
            "school" => Scenario::School,
            "family" => Scenario::Family,
            _ => Scenario::Social,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Work => "work",
            Scenario::School => "school",
            Scenario::Social => "social",
            Scenario::Family => "family",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Lenient parse: anything unrecognized is treated as `Medium`.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "low" => Urgency::Low,
            "high" => Urgency::High,
            _ => Urgency::Medium,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Urgency::High => "Urgent: ",
            Urgency::Low => "Just a heads-up: ",
            Urgency::Medium => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Emotional,
}

impl Tone {
    /// Lenient parse: anything unrecognized is treated as `Professional`.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "emotional" => Tone::Emotional,
            _ => Tone::Professional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_parse_is_case_insensitive() {
        assert_eq!(Scenario::parse_or_default("WORK"), Scenario::Work);
        assert_eq!(Scenario::parse_or_default(" School "), Scenario::School);
        assert_eq!(Scenario::parse_or_default("Family"), Scenario::Family);
    }

    #[test]
    fn unknown_values_fall_back_to_defaults() {
        assert_eq!(Scenario::parse_or_default("vacation"), Scenario::Social);
        assert_eq!(Urgency::parse_or_default("critical"), Urgency::Medium);
        assert_eq!(Tone::parse_or_default("sarcastic"), Tone::Professional);
    }

    #[test]
    fn urgency_prefixes() {
        assert_eq!(Urgency::High.prefix(), "Urgent: ");
        assert_eq!(Urgency::Low.prefix(), "Just a heads-up: ");
        assert_eq!(Urgency::Medium.prefix(), "");
    }
}
