//! Chat intent classification
//!
//! Lowercased input is matched against a fixed keyword table. Rows are
//! checked in order, so float keywords win over graph keywords and anything
//! unmatched falls through to [`Intent::Help`].

use serde::Serialize;

/// What the user is asking the local assistant for
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Rank floats by distance to the reference point
    NearestFloats,
    /// Show the monthly temperature chart
    TemperatureGraph,
    /// Anything else
    Help,
}

impl Intent {
    pub fn all() -> &'static [Intent] {
        &[Intent::NearestFloats, Intent::TemperatureGraph, Intent::Help]
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::NearestFloats => write!(f, "nearest_floats"),
            Intent::TemperatureGraph => write!(f, "temperature_graph"),
            Intent::Help => write!(f, "help"),
        }
    }
}

/// Keyword table in priority order
pub const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::NearestFloats, &["float", "nearest", "location"]),
    (
        Intent::TemperatureGraph,
        &["graph", "temperature", "temp", "chart", "plot"],
    ),
];

/// Classify a message by substring containment
pub fn classify(message: &str) -> Intent {
    let text = message.to_lowercase();

    INTENT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Help)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_inputs() {
        assert_eq!(classify("Show me nearest floats"), Intent::NearestFloats);
        assert_eq!(classify("show temp graph"), Intent::TemperatureGraph);
        assert_eq!(classify("xyz"), Intent::Help);
    }

    #[test]
    fn test_float_keywords_take_priority() {
        assert_eq!(
            classify("graph the temperature of each FLOAT"),
            Intent::NearestFloats
        );
        assert_eq!(classify("temperature at my location"), Intent::NearestFloats);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("PLOT IT"), Intent::TemperatureGraph);
        assert_eq!(classify("Nearest?"), Intent::NearestFloats);
    }

    #[test]
    fn test_empty_is_help() {
        assert_eq!(classify(""), Intent::Help);
    }

    #[test]
    fn test_intent_display_matches_serde() {
        for intent in Intent::all() {
            let json = serde_json::to_string(intent).unwrap();
            assert_eq!(json, format!("\"{}\"", intent));
        }
    }
}
