use async_trait::async_trait;
use ndarray::Array2;
use ort::inputs;
use ort::session::Session;
use ort::value::Tensor;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};

use crate::assets::ModelAssets;
use crate::softmax::softmax;
use crate::types::ensure_unique_labels;
use crate::{ClassifierConfig, ClassifierError, EmotionModel, Probabilities};

/// Sequence-classification model exported to ONNX (Hugging Face layout).
///
/// `Session::run` needs `&mut`, so the session sits behind a mutex and concurrent
/// requests take turns. Inference runs on tokio's blocking pool.
pub struct OnnxClassifier {
    name: String,
    inner: Arc<OnnxInner>,
}

struct OnnxInner {
    labels: Vec<String>,
    tokenizer: Tokenizer,
    session: Mutex<Session>,
    max_sequence_length: usize,
}

/// The part of `config.json` we care about.
#[derive(Debug, Deserialize)]
struct ModelCard {
    id2label: HashMap<String, String>,
}

impl OnnxClassifier {
    pub(crate) fn load(cfg: &ClassifierConfig, assets: &ModelAssets) -> Result<Self, ClassifierError> {
        let mut tokenizer = Tokenizer::from_file(&assets.tokenizer_path)
            .map_err(|e| ClassifierError::TokenizerMissing(e.to_string()))?;
        let max_sequence_length = cfg.max_sequence_length.max(1);
        configure_truncation(&mut tokenizer, max_sequence_length)?;

        let labels = match (&cfg.labels, &assets.model_config_path) {
            (Some(labels), _) => labels.clone(),
            (None, Some(path)) => read_id2label(path)?,
            (None, None) => {
                return Err(ClassifierError::InvalidConfig(
                    "label order unknown: set `labels` or provide config.json".into(),
                ))
            }
        };
        if labels.is_empty() {
            return Err(ClassifierError::InvalidConfig("label set is empty".into()));
        }
        ensure_unique_labels(&labels)?;

        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(&assets.model_path))
            .map_err(|e| ClassifierError::Inference(format!("failed to load ONNX model: {e}")))?;

        tracing::info!(
            model = %cfg.model_name,
            path = %assets.model_path.display(),
            labels = labels.len(),
            "loaded ONNX emotion model"
        );

        Ok(Self {
            name: cfg.model_name.clone(),
            inner: Arc::new(OnnxInner {
                labels,
                tokenizer,
                session: Mutex::new(session),
                max_sequence_length,
            }),
        })
    }
}

#[async_trait]
impl EmotionModel for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> &[String] {
        &self.inner.labels
    }

    async fn classify_probabilities(&self, text: &str) -> Result<Probabilities, ClassifierError> {
        let inner = Arc::clone(&self.inner);
        let text = text.to_owned();
        let logits = tokio::task::spawn_blocking(move || inner.run_logits(&text))
            .await
            .map_err(|e| ClassifierError::Inference(format!("inference task failed: {e}")))??;

        if logits.iter().any(|x| !x.is_finite()) {
            return Err(ClassifierError::InvalidOutput(
                "model produced non-finite logits".into(),
            ));
        }
        Probabilities::from_scores(&self.inner.labels, softmax(&logits))
    }
}

impl OnnxInner {
    fn run_logits(&self, text: &str) -> Result<Vec<f32>, ClassifierError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let seq_len = encoding.get_ids().len().min(self.max_sequence_length).max(1);
        let input_ids = padded(encoding.get_ids(), seq_len);
        let attention_mask = padded(encoding.get_attention_mask(), seq_len);

        let input_ids = Tensor::from_array(to_batch(input_ids, seq_len)?)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let attention_mask = Tensor::from_array(to_batch(attention_mask, seq_len)?)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ClassifierError::Inference("ONNX session lock poisoned".into()))?;

        // BERT-style graphs declare token_type_ids, RoBERTa-style ones don't.
        let wants_token_types = session.inputs.iter().any(|i| i.name == "token_type_ids");
        let run = if wants_token_types {
            let token_type_ids = Tensor::from_array(to_batch(vec![0; seq_len], seq_len)?)
                .map_err(|e| ClassifierError::Inference(e.to_string()))?;
            session.run(inputs![
                "input_ids" => input_ids,
                "attention_mask" => attention_mask,
                "token_type_ids" => token_type_ids
            ])
        } else {
            session.run(inputs![
                "input_ids" => input_ids,
                "attention_mask" => attention_mask
            ])
        };
        let outputs = run.map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let logits_key = outputs
            .keys()
            .find(|k| k.contains("logits"))
            .or_else(|| outputs.keys().next())
            .map(|k| k.to_string())
            .ok_or_else(|| ClassifierError::InvalidOutput("model returned no outputs".into()))?;
        let logits = outputs[logits_key.as_str()]
            .try_extract_array::<f32>()
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let logits: Vec<f32> = logits.iter().copied().collect();

        if logits.len() != self.labels.len() {
            return Err(ClassifierError::InvalidOutput(format!(
                "logits width {} does not match {} labels",
                logits.len(),
                self.labels.len()
            )));
        }
        Ok(logits)
    }
}

/// Truncates or zero-pads token data to exactly `len` entries.
fn padded(values: &[u32], len: usize) -> Vec<i64> {
    let mut out: Vec<i64> = values.iter().take(len).map(|&v| v as i64).collect();
    out.resize(len, 0);
    out
}

fn to_batch(values: Vec<i64>, seq_len: usize) -> Result<Array2<i64>, ClassifierError> {
    Array2::from_shape_vec((1, seq_len), values).map_err(|e| ClassifierError::Inference(e.to_string()))
}

/// Reads `id2label` from a Hugging Face `config.json`, ordered by numeric class id.
pub(crate) fn read_id2label(path: &Path) -> Result<Vec<String>, ClassifierError> {
    let raw = std::fs::read_to_string(path)?;
    parse_id2label(&raw)
}

fn parse_id2label(raw: &str) -> Result<Vec<String>, ClassifierError> {
    let card: ModelCard = serde_json::from_str(raw)
        .map_err(|e| ClassifierError::InvalidConfig(format!("bad model config.json: {e}")))?;

    let mut indexed = Vec::with_capacity(card.id2label.len());
    for (id, label) in card.id2label {
        let id: usize = id
            .parse()
            .map_err(|_| ClassifierError::InvalidConfig(format!("non-numeric class id '{id}'")))?;
        indexed.push((id, label));
    }
    indexed.sort_by_key(|(id, _)| *id);

    for (expected, (id, _)) in indexed.iter().enumerate() {
        if *id != expected {
            return Err(ClassifierError::InvalidConfig(format!(
                "class ids are not contiguous: missing id {expected}"
            )));
        }
    }

    let labels: Vec<String> = indexed.into_iter().map(|(_, label)| label).collect();
    ensure_unique_labels(&labels)?;
    Ok(labels)
}

/// Truncation happens inside the tokenizer so special tokens such as `[SEP]` or
/// `</s>` survive on long inputs.
fn configure_truncation(tokenizer: &mut Tokenizer, max_length: usize) -> Result<(), ClassifierError> {
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| ClassifierError::InvalidConfig(format!("bad truncation settings: {e}")))?;
    Ok(())
}
