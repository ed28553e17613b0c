use std::io;
use thiserror::Error;

/// Errors surfaced while loading or running an emotion model.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The ONNX model could not be located locally and no download URL was provided.
    #[error("model file not found: {0}")]
    ModelNotFound(String),
    /// The tokenizer JSON is missing and there was no remote URL to fetch it from.
    #[error("tokenizer missing: {0}")]
    TokenizerMissing(String),
    /// Configuration is inconsistent (e.g. `api` mode without an endpoint).
    #[error("invalid classifier config: {0}")]
    InvalidConfig(String),
    /// Unable to download remote assets.
    #[error("download failed: {0}")]
    Download(String),
    /// Low-level IO failures while touching the filesystem.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// ONNX Runtime, tokenizer, or remote inference errors.
    #[error("inference failure: {0}")]
    Inference(String),
    /// The model produced something that does not fit the label set.
    #[error("invalid model output: {0}")]
    InvalidOutput(String),
}

impl ClassifierError {
    /// True for failures caused by the model artifact itself rather than a single input.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ClassifierError::ModelNotFound(_)
                | ClassifierError::TokenizerMissing(_)
                | ClassifierError::InvalidConfig(_)
                | ClassifierError::Download(_)
                | ClassifierError::Io(_)
        )
    }
}
