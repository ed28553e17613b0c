use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which backend answers `classify` / `classify_probabilities`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierMode {
    /// Local ONNX sequence-classification export.
    #[default]
    Onnx,
    /// Remote text-classification endpoint.
    Api,
    /// Built-in keyword model, no artifact needed.
    Lexicon,
}

impl ClassifierMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierMode::Onnx => "onnx",
            ClassifierMode::Api => "api",
            ClassifierMode::Lexicon => "lexicon",
        }
    }
}

/// Runtime configuration describing which emotion model to load and where its files live.
///
/// # Example
/// ```no_run
/// use classifier::{load_model, ClassifierConfig, ClassifierMode};
///
/// # async fn run() -> Result<(), classifier::ClassifierError> {
/// let cfg = ClassifierConfig {
///     mode: ClassifierMode::Api,
///     api_url: Some("https://router.huggingface.co/hf-inference/models/j-hartmann/emotion-english-distilroberta-base".into()),
///     api_auth_header: Some("Bearer hf_xxx".into()),
///     labels: Some(vec!["anger".into(), "joy".into(), "sadness".into()]),
///     ..Default::default()
/// };
/// let model = load_model(&cfg).await?;
/// let label = model.classify("what a lovely day").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Backend selector.
    pub mode: ClassifierMode,
    /// Friendly name surfaced by readiness checks and logs.
    pub model_name: String,
    /// Local path of the ONNX graph (also the download target for [`model_url`](Self::model_url)).
    pub model_path: PathBuf,
    /// Optional HTTPS URL fetched when [`model_path`](Self::model_path) is missing.
    pub model_url: Option<String>,
    /// Path to `tokenizer.json`.
    pub tokenizer_path: PathBuf,
    /// Optional HTTPS URL for fetching the tokenizer on demand.
    pub tokenizer_url: Option<String>,
    /// Path to the Hugging Face `config.json` carrying `id2label`.
    pub model_config_path: PathBuf,
    /// Optional HTTPS URL for fetching `config.json` on demand.
    pub model_config_url: Option<String>,
    /// Explicit class order. Overrides `id2label` in onnx mode, required in api mode.
    pub labels: Option<Vec<String>>,
    /// Token budget per input; longer inputs are truncated.
    pub max_sequence_length: usize,
    /// Inference endpoint when [`mode`](Self::mode) is `api`.
    pub api_url: Option<String>,
    /// Authorization header value (e.g. `"Bearer hf_xxx"`).
    pub api_auth_header: Option<String>,
    /// Overall API timeout in seconds.
    pub api_timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            mode: ClassifierMode::Onnx,
            model_name: "emotion".into(),
            model_path: PathBuf::from("./models/emotion/model.onnx"),
            model_url: None,
            tokenizer_path: PathBuf::from("./models/emotion/tokenizer.json"),
            tokenizer_url: None,
            model_config_path: PathBuf::from("./models/emotion/config.json"),
            model_config_url: None,
            labels: None,
            max_sequence_length: 512,
            api_url: None,
            api_auth_header: None,
            api_timeout_secs: 30,
        }
    }
}

impl ClassifierConfig {
    /// Shortcut for the artifact-free keyword model.
    pub fn lexicon() -> Self {
        Self {
            mode: ClassifierMode::Lexicon,
            model_name: "lexicon".into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let cfg = ClassifierConfig::default();
        assert_eq!(cfg.mode, ClassifierMode::Onnx);
        assert_eq!(cfg.model_name, "emotion");
        assert_eq!(cfg.model_path, PathBuf::from("./models/emotion/model.onnx"));
        assert_eq!(
            cfg.model_config_path,
            PathBuf::from("./models/emotion/config.json")
        );
        assert!(cfg.labels.is_none());
        assert_eq!(cfg.max_sequence_length, 512);
        assert_eq!(cfg.api_timeout_secs, 30);
    }

    #[test]
    fn mode_parses_lowercase() {
        let mode: ClassifierMode = serde_json::from_str("\"lexicon\"").unwrap();
        assert_eq!(mode, ClassifierMode::Lexicon);
        assert_eq!(mode.as_str(), "lexicon");
        assert!(serde_json::from_str::<ClassifierMode>("\"LEXICON\"").is_err());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: ClassifierConfig =
            serde_json::from_str(r#"{"mode": "api", "api_url": "http://localhost:9000"}"#).unwrap();
        assert_eq!(cfg.mode, ClassifierMode::Api);
        assert_eq!(cfg.api_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(cfg.max_sequence_length, 512);
    }

    #[test]
    fn lexicon_shortcut() {
        let cfg = ClassifierConfig::lexicon();
        assert_eq!(cfg.mode, ClassifierMode::Lexicon);
        assert_eq!(cfg.model_name, "lexicon");
    }
}
