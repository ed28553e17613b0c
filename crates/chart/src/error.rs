use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// The Vega-Lite spec could not be encoded.
    #[error("failed to serialize chart spec: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A data point cannot be plotted.
    #[error("invalid value for '{label}': {value}")]
    InvalidValue { label: String, value: f32 },
}
