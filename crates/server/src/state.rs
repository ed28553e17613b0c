use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::templates;
use chart::BarChart;
use classifier::EmotionModel;
use metrics_exporter_prometheus::PrometheusHandle;
use minijinja::Environment;
use std::sync::Arc;

/// Shared application state
///
/// Built once before serving; handlers only read it.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Loaded emotion model (shared across requests)
    pub model: Arc<dyn EmotionModel>,

    /// Chart renderer
    pub chart: BarChart,

    /// Compiled page templates
    pub templates: Arc<Environment<'static>>,

    /// Prometheus handle; `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Load the configured model and build the state around it.
    ///
    /// Fails if the model cannot be loaded; there is no fallback model.
    pub async fn new(
        config: ServerConfig,
        metrics: Option<PrometheusHandle>,
    ) -> ServerResult<Self> {
        let model = classifier::load_model(&config.classifier).await?;
        Self::with_model(config, model, metrics)
    }

    /// Build the state around an already loaded model.
    pub fn with_model(
        config: ServerConfig,
        model: Arc<dyn EmotionModel>,
        metrics: Option<PrometheusHandle>,
    ) -> ServerResult<Self> {
        let chart = BarChart::new(config.chart.clone());
        let templates = Arc::new(templates::environment()?);

        Ok(Self {
            config: Arc::new(config),
            model,
            chart,
            templates,
            metrics,
        })
    }
}
