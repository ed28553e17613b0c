use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{ClassifierConfig, ClassifierError};

#[derive(Debug)]
pub(crate) struct ModelAssets {
    pub(crate) model_path: PathBuf,
    pub(crate) tokenizer_path: PathBuf,
    /// Absent when the config pins the label order explicitly.
    pub(crate) model_config_path: Option<PathBuf>,
}

/// Ensures the ONNX graph, tokenizer and (unless labels are pinned) `config.json`
/// exist locally, downloading them when URLs are provided.
pub(crate) async fn resolve_model_assets(
    cfg: &ClassifierConfig,
) -> Result<ModelAssets, ClassifierError> {
    let model_path = ensure_local_file(&cfg.model_path, cfg.model_url.as_deref(), || {
        ClassifierError::ModelNotFound(cfg.model_path.display().to_string())
    })
    .await?;

    let tokenizer_path =
        ensure_local_file(&cfg.tokenizer_path, cfg.tokenizer_url.as_deref(), || {
            ClassifierError::TokenizerMissing(cfg.tokenizer_path.display().to_string())
        })
        .await?;

    let model_config_path = if cfg.labels.is_some() {
        None
    } else {
        let path = ensure_local_file(
            &cfg.model_config_path,
            cfg.model_config_url.as_deref(),
            || {
                ClassifierError::InvalidConfig(format!(
                    "no labels configured and {} is missing",
                    cfg.model_config_path.display()
                ))
            },
        )
        .await?;
        Some(path)
    };

    Ok(ModelAssets {
        model_path,
        tokenizer_path,
        model_config_path,
    })
}

/// Returns `target` if it already exists, otherwise attempts to download `remote_url`.
async fn ensure_local_file<F>(
    target: &Path,
    remote_url: Option<&str>,
    on_missing: F,
) -> Result<PathBuf, ClassifierError>
where
    F: FnOnce() -> ClassifierError,
{
    if target.exists() {
        return Ok(target.to_path_buf());
    }

    if let Some(url) = remote_url {
        tracing::info!(url, target = %target.display(), "downloading model asset");
        download_to_path(target, url).await?;
        return Ok(target.to_path_buf());
    }

    Err(on_missing())
}

/// Downloads `url` into `target`, creating parent directories as needed.
async fn download_to_path(target: &Path, url: &str) -> Result<(), ClassifierError> {
    if let Some(parent) = target.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let response = reqwest::get(url)
        .await
        .map_err(|e| ClassifierError::Download(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClassifierError::Download(format!(
            "unexpected status {status} while fetching {url}"
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClassifierError::Download(e.to_string()))?;

    fs::write(target, &bytes)?;
    Ok(())
}
