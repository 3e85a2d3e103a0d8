use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Desired-property key the module acts on: which speech-map file the
/// capture driver should load for its next scan.
pub const SPEECH_MAP_KEY: &str = "SpeechMapFilename";

/// Desired-property patch pushed from the cloud to a module.
///
/// The patch body is an open key-value document; the module applies the
/// keys it recognizes and ignores the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinDesiredPatch {
    /// Module this patch targets.
    pub module_id: String,
    /// Desired-property keys and values.
    pub patch: serde_json::Value,
    /// Twin version the patch was generated from (monotonically increasing).
    pub version: u64,
    /// When the patch was generated.
    pub timestamp: DateTime<Utc>,
}

impl TwinDesiredPatch {
    /// The `SpeechMapFilename` value, if this patch carries one.
    pub fn speech_map_filename(&self) -> Option<&str> {
        self.patch.get(SPEECH_MAP_KEY).and_then(|v| v.as_str())
    }
}

/// Reported-state update sent by the module to acknowledge applied
/// desired properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwinReportedUpdate {
    /// Module sending the update.
    pub module_id: String,
    /// Reported state to merge into the twin.
    pub reported: serde_json::Value,
    /// Desired-twin version being acknowledged.
    pub version: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patch_roundtrip() {
        let patch = TwinDesiredPatch {
            module_id: "camera-capture".into(),
            patch: json!({"SpeechMapFilename": "speech_map_british.json"}),
            version: 7,
            timestamp: Utc::now(),
        };
        let json_str = serde_json::to_string(&patch).unwrap();
        let deserialized: TwinDesiredPatch = serde_json::from_str(&json_str).unwrap();
        assert_eq!(deserialized.version, 7);
        assert_eq!(
            deserialized.speech_map_filename(),
            Some("speech_map_british.json")
        );
    }

    #[test]
    fn unrecognized_keys_yield_no_filename() {
        let patch = TwinDesiredPatch {
            module_id: "camera-capture".into(),
            patch: json!({"TemperatureThreshold": 25}),
            version: 1,
            timestamp: Utc::now(),
        };
        assert!(patch.speech_map_filename().is_none());
    }

    #[test]
    fn non_string_filename_is_ignored() {
        let patch = TwinDesiredPatch {
            module_id: "camera-capture".into(),
            patch: json!({"SpeechMapFilename": 42}),
            version: 1,
            timestamp: Utc::now(),
        };
        assert!(patch.speech_map_filename().is_none());
    }

    #[test]
    fn reported_update_roundtrip() {
        let update = TwinReportedUpdate {
            module_id: "camera-capture".into(),
            reported: json!({"SpeechMapFilename": "m2.json"}),
            version: 3,
        };
        let json_str = serde_json::to_string(&update).unwrap();
        let deserialized: TwinReportedUpdate = serde_json::from_str(&json_str).unwrap();
        assert_eq!(deserialized.reported["SpeechMapFilename"], "m2.json");
        assert_eq!(deserialized.version, 3);
    }
}
