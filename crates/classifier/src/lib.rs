//! emotext emotion classification
//!
//! This crate owns the model side of emotext: it loads an emotion classifier once
//! and exposes it through the [`EmotionModel`] trait, which answers two questions
//! about a piece of text: which label wins, and how probable each label is.
//!
//! Three backends sit behind the trait:
//!
//! - **ONNX mode** - a Hugging Face sequence-classification export run locally with
//!   ONNX Runtime. Needs `model.onnx`, `tokenizer.json` and `config.json`.
//! - **API mode** - a remote text-classification endpoint (HF inference protocol).
//! - **Lexicon mode** - a small keyword model. No files, fully deterministic; this
//!   is what the test suites run against.
//!
//! Missing assets are a hard error. There is no silent fallback to the lexicon
//! model, because a server answering with the wrong model is worse than one that
//! refuses to start.
//!
//! ## Threading notes
//!
//! Models are shared as `Arc<dyn EmotionModel>`. The ONNX session needs exclusive
//! access per run, so calls are serialized on a mutex and executed on tokio's
//! blocking pool; the tokenizer is shared read-only.
//!
//! ## Quick example
//!
//! ```no_run
//! use classifier::{load_model, ClassifierConfig};
//! use std::path::PathBuf;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), classifier::ClassifierError> {
//!     let cfg = ClassifierConfig {
//!         model_path: PathBuf::from("models/emotion/model.onnx"),
//!         tokenizer_path: PathBuf::from("models/emotion/tokenizer.json"),
//!         model_config_path: PathBuf::from("models/emotion/config.json"),
//!         ..Default::default()
//!     };
//!
//!     let model = load_model(&cfg).await?;
//!     let prediction = model.predict("I am so happy today").await?;
//!     println!("{} ({:.2})", prediction.label, prediction.confidence());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod types;

mod api;
mod assets;
mod lexicon;
mod model;
mod onnx;
mod softmax;

pub use crate::api::ApiClassifier;
pub use crate::config::{ClassifierConfig, ClassifierMode};
pub use crate::error::ClassifierError;
pub use crate::lexicon::{LexiconClassifier, LEXICON_LABELS};
pub use crate::model::EmotionModel;
pub use crate::onnx::OnnxClassifier;
pub use crate::types::{Prediction, Probabilities, SUM_TOLERANCE};

use std::sync::Arc;

use crate::assets::resolve_model_assets;

/// Builds the backend selected by `cfg.mode`.
///
/// Call this once at startup and share the returned handle. For ONNX mode the
/// model files are resolved first (downloading them when URLs are configured).
pub async fn load_model(cfg: &ClassifierConfig) -> Result<Arc<dyn EmotionModel>, ClassifierError> {
    tracing::info!(mode = cfg.mode.as_str(), model = %cfg.model_name, "loading emotion model");

    let model: Arc<dyn EmotionModel> = match cfg.mode {
        ClassifierMode::Lexicon => Arc::new(LexiconClassifier::new(cfg.model_name.clone())),
        ClassifierMode::Api => Arc::new(ApiClassifier::new(cfg)?),
        ClassifierMode::Onnx => {
            let assets = resolve_model_assets(cfg).await?;
            Arc::new(OnnxClassifier::load(cfg, &assets)?)
        }
    };

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn load_lexicon_model() {
        let model = load_model(&ClassifierConfig::lexicon()).await.unwrap();
        assert_eq!(model.name(), "lexicon");
        assert_eq!(model.labels().len(), LEXICON_LABELS.len());
    }

    #[tokio::test]
    async fn load_fails_fast_when_model_missing() {
        let cfg = ClassifierConfig {
            model_path: PathBuf::from("./missing/model.onnx"),
            tokenizer_path: PathBuf::from("./missing/tokenizer.json"),
            ..Default::default()
        };

        let err = match load_model(&cfg).await {
            Ok(_) => panic!("missing assets must not load"),
            Err(err) => err,
        };
        assert!(matches!(err, ClassifierError::ModelNotFound(_)));
        assert!(err.is_load_error());
    }

    #[tokio::test]
    async fn load_api_model_requires_labels() {
        let cfg = ClassifierConfig {
            mode: ClassifierMode::Api,
            api_url: Some("http://localhost:9/classify".into()),
            ..Default::default()
        };
        assert!(load_model(&cfg).await.is_err());
    }

    #[tokio::test]
    async fn predict_agrees_with_classify() {
        let model = load_model(&ClassifierConfig::lexicon()).await.unwrap();
        for text in ["I am so happy today", "I am furious", "", "scared of the dark"] {
            let prediction = model.predict(text).await.unwrap();
            assert_eq!(model.classify(text).await.unwrap(), prediction.label);
        }
    }
}
