//! Module configuration, resolved once at startup from environment
//! variables with fixed defaults.
//!
//! Resolution never fails: every setting has a usable default, and a
//! value that doesn't parse falls back to it. The variable names are the
//! module's deployment contract and are kept verbatim.

/// Placeholder speech-service key used when the deployment doesn't
/// supply one. Only useful against a local speech stub.
const DEFAULT_SPEECH_KEY: &str = "2f57f2d9f1074faaa0e9484e1f1c08c1";

/// Immutable configuration snapshot read by the capture driver on every
/// scan.
#[derive(Debug, Clone)]
pub struct ModuleConfig {
    /// Video source identifier ("0" = first local camera).
    pub video_source: String,
    /// Inference confidence threshold.
    pub predict_threshold: f64,
    /// Inference service URL.
    pub inference_endpoint: String,
    /// Speech-service credential.
    pub speech_service_key: String,
    /// Initial speech-mapping file name; a twin patch may change which
    /// map later scans use, via the module context.
    pub speech_map_filename: String,
}

impl ModuleConfig {
    /// Resolve the configuration snapshot from process env vars.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Lets tests supply settings
    /// without mutating process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let or_default = |key: &str, default: &str| -> String {
            match get(key) {
                Some(v) if !v.is_empty() => v,
                _ => default.to_string(),
            }
        };

        let predict_threshold = get("Threshold")
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.75);

        Self {
            video_source: or_default("Video", "0"),
            predict_threshold,
            inference_endpoint: or_default("AiEndpoint", "http://localhost:80/image"),
            speech_service_key: or_default("azureSpeechServicesKey", DEFAULT_SPEECH_KEY),
            speech_map_filename: or_default("SpeechMapFilename", "speech_map_american.json"),
        }
    }
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
