use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::types::ensure_unique_labels;
use crate::{ClassifierConfig, ClassifierError, EmotionModel, Probabilities};

/// Emotion model hosted behind a Hugging Face style text-classification endpoint.
///
/// The label order comes from the config, never from the response, so the mapping
/// handed to callers always has the same keys in the same order. Failed calls are
/// reported straight away; nothing is retried.
pub struct ApiClassifier {
    name: String,
    url: String,
    auth_header: Option<String>,
    labels: Vec<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

impl ApiClassifier {
    pub(crate) fn new(cfg: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let url = cfg
            .api_url
            .clone()
            .ok_or_else(|| ClassifierError::InvalidConfig("api_url is required for api mode".into()))?;
        let labels = cfg
            .labels
            .clone()
            .filter(|labels| !labels.is_empty())
            .ok_or_else(|| ClassifierError::InvalidConfig("labels are required for api mode".into()))?;
        ensure_unique_labels(&labels)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.api_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ClassifierError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        tracing::info!(model = %cfg.model_name, url = %url, labels = labels.len(), "using remote emotion model");

        Ok(Self {
            name: cfg.model_name.clone(),
            url,
            auth_header: cfg.api_auth_header.clone(),
            labels,
            client,
        })
    }

    fn payload(&self, text: &str) -> Value {
        json!({
            "inputs": text,
            "parameters": { "top_k": self.labels.len() },
        })
    }
}

#[async_trait]
impl EmotionModel for ApiClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    async fn classify_probabilities(&self, text: &str) -> Result<Probabilities, ClassifierError> {
        let mut request = self.client.post(&self.url).json(&self.payload(text));
        if let Some(auth) = &self.auth_header {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Inference(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Inference(format!(
                "endpoint returned {status}: {body}"
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidOutput(format!("response is not JSON: {e}")))?;
        parse_scores(body, &self.labels)
    }
}

/// Accepts `[{label, score}]` as well as the batched `[[{label, score}]]` shape and
/// reorders the scores into `labels` order.
fn parse_scores(body: Value, labels: &[String]) -> Result<Probabilities, ClassifierError> {
    let body = match body {
        Value::Array(mut outer) if matches!(outer.first(), Some(Value::Array(_))) => outer.swap_remove(0),
        other => other,
    };
    let scores: Vec<LabelScore> = serde_json::from_value(body)
        .map_err(|e| ClassifierError::InvalidOutput(format!("unexpected response shape: {e}")))?;

    if let Some(extra) = scores.iter().find(|s| !labels.contains(&s.label)) {
        return Err(ClassifierError::InvalidOutput(format!(
            "endpoint returned unknown label '{}'",
            extra.label
        )));
    }

    let ordered = labels
        .iter()
        .map(|label| {
            scores
                .iter()
                .find(|s| &s.label == label)
                .map(|s| s.score)
                .ok_or_else(|| {
                    ClassifierError::InvalidOutput(format!("endpoint omitted label '{label}'"))
                })
        })
        .collect::<Result<Vec<f32>, _>>()?;

    Probabilities::from_scores(labels, ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["anger".into(), "joy".into(), "sadness".into()]
    }

    #[test]
    fn parses_flat_response_in_label_order() {
        let body = json!([
            {"label": "joy", "score": 0.7},
            {"label": "sadness", "score": 0.1},
            {"label": "anger", "score": 0.2}
        ]);
        let p = parse_scores(body, &labels()).unwrap();
        assert_eq!(p.labels().collect::<Vec<_>>(), vec!["anger", "joy", "sadness"]);
        assert_eq!(p.get("joy"), Some(0.7));
    }

    #[test]
    fn parses_nested_response() {
        let body = json!([[
            {"label": "anger", "score": 0.5},
            {"label": "joy", "score": 0.25},
            {"label": "sadness", "score": 0.25}
        ]]);
        let p = parse_scores(body, &labels()).unwrap();
        assert_eq!(p.argmax(), Some(("anger", 0.5)));
    }

    #[test]
    fn missing_label_is_an_error() {
        let body = json!([{"label": "anger", "score": 1.0}]);
        let err = parse_scores(body, &labels()).unwrap_err();
        assert!(err.to_string().contains("omitted label"));
    }

    #[test]
    fn unknown_label_is_an_error() {
        let body = json!([
            {"label": "anger", "score": 0.2},
            {"label": "joy", "score": 0.2},
            {"label": "sadness", "score": 0.2},
            {"label": "boredom", "score": 0.4}
        ]);
        let err = parse_scores(body, &labels()).unwrap_err();
        assert!(err.to_string().contains("boredom"));
    }

    #[test]
    fn scores_outside_unit_range_are_rejected() {
        let body = json!([
            {"label": "anger", "score": 3.0},
            {"label": "joy", "score": 5.0},
            {"label": "sadness", "score": 0.0}
        ]);
        let err = parse_scores(body, &labels()).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidOutput(_)));
    }

    #[test]
    fn scores_must_sum_to_one() {
        let body = json!([
            {"label": "anger", "score": 0.9},
            {"label": "joy", "score": 0.9},
            {"label": "sadness", "score": 0.9}
        ]);
        let err = parse_scores(body, &labels()).unwrap_err();
        assert!(err.to_string().contains("sum to"));
    }

    #[test]
    fn duplicate_configured_labels_are_rejected() {
        let cfg = ClassifierConfig {
            mode: crate::ClassifierMode::Api,
            api_url: Some("http://localhost:9/classify".into()),
            labels: Some(vec!["joy".into(), "joy".into()]),
            ..Default::default()
        };
        assert!(matches!(
            ApiClassifier::new(&cfg),
            Err(ClassifierError::InvalidConfig(_))
        ));
    }

    #[test]
    fn error_object_is_rejected() {
        let body = json!({"error": "Model is loading"});
        assert!(matches!(
            parse_scores(body, &labels()),
            Err(ClassifierError::InvalidOutput(_))
        ));
    }

    #[test]
    fn new_requires_url_and_labels() {
        let cfg = ClassifierConfig {
            mode: crate::ClassifierMode::Api,
            ..Default::default()
        };
        assert!(matches!(
            ApiClassifier::new(&cfg),
            Err(ClassifierError::InvalidConfig(_))
        ));

        let cfg = ClassifierConfig {
            mode: crate::ClassifierMode::Api,
            api_url: Some("http://localhost:9/classify".into()),
            ..Default::default()
        };
        assert!(matches!(
            ApiClassifier::new(&cfg),
            Err(ClassifierError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_inference_error() {
        let cfg = ClassifierConfig {
            mode: crate::ClassifierMode::Api,
            api_url: Some("http://127.0.0.1:9/classify".into()),
            labels: Some(labels()),
            api_timeout_secs: 2,
            ..Default::default()
        };
        let model = ApiClassifier::new(&cfg).unwrap();
        let err = model.classify_probabilities("hello").await.unwrap_err();
        assert!(matches!(err, ClassifierError::Inference(_)));
    }
}
