//! emotext charts
//!
//! Turns a prediction's (label, probability) pairs into an HTML fragment that
//! draws a bar chart in the browser. The fragment is a Vega-Lite spec plus the
//! three scripts that render it (vega, vega-lite, vega-embed), so the page can
//! drop it in verbatim. Layout is fixed by [`ChartConfig`]; the data never
//! changes the chart dimensions.
//!
//! ```
//! use chart::{BarChart, ChartConfig};
//!
//! let chart = BarChart::new(ChartConfig::default());
//! let html = chart.render([("anger", 0.8), ("joy", 0.2)]).unwrap();
//! assert!(html.contains("vegaEmbed"));
//! ```

pub mod config;
pub mod error;

mod spec;

pub use crate::config::ChartConfig;
pub use crate::error::ChartError;

use crate::spec::{BarSpec, Datum};

/// Bar chart renderer with a fixed layout.
#[derive(Debug, Clone, Default)]
pub struct BarChart {
    config: ChartConfig,
}

impl BarChart {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Renders one bar per point, in the order given.
    pub fn render<'a, I>(&self, points: I) -> Result<String, ChartError>
    where
        I: IntoIterator<Item = (&'a str, f32)>,
    {
        let values = points
            .into_iter()
            .map(|(label, probability)| {
                if probability.is_finite() {
                    Ok(Datum {
                        emotions: label,
                        probability,
                    })
                } else {
                    Err(ChartError::InvalidValue {
                        label: label.to_string(),
                        value: probability,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let spec = BarSpec::new(
            self.config.schema_url(),
            self.config.width,
            self.config.height,
            values,
        );
        let spec_json = script_safe(&serde_json::to_string(&spec)?);

        let id = format!("vis-{}", uuid::Uuid::new_v4().simple());
        let [vega, vega_lite, vega_embed] = self.config.script_urls();

        Ok(format!(
            r##"<div id="{id}" class="emotion-chart"></div>
<script type="text/javascript" src="{vega}"></script>
<script type="text/javascript" src="{vega_lite}"></script>
<script type="text/javascript" src="{vega_embed}"></script>
<script type="text/javascript">
  vegaEmbed("#{id}", {spec_json}, {{"mode": "vega-lite"}}).catch(console.error);
</script>"##
        ))
    }
}

/// Escapes characters that could terminate or confuse an inline `<script>` block.
/// They only occur inside JSON strings, where `\uXXXX` escapes are equivalent.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
}
