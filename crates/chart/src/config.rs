use serde::{Deserialize, Serialize};

/// Fixed layout and asset locations for rendered charts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChartConfig {
    /// Plot width in pixels.
    pub width: u32,
    /// Plot height in pixels.
    pub height: u32,
    /// Major version of `vega` loaded by the page.
    pub vega_version: u32,
    /// Major version of `vega-lite`; also selects the `$schema` URL.
    pub vega_lite_version: u32,
    /// Major version of `vega-embed`.
    pub vega_embed_version: u32,
    /// CDN prefix the three scripts are loaded from.
    pub cdn_base: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 300,
            vega_version: 5,
            vega_lite_version: 5,
            vega_embed_version: 6,
            cdn_base: "https://cdn.jsdelivr.net/npm".into(),
        }
    }
}

impl ChartConfig {
    pub(crate) fn schema_url(&self) -> String {
        format!(
            "https://vega.github.io/schema/vega-lite/v{}.json",
            self.vega_lite_version
        )
    }

    pub(crate) fn script_urls(&self) -> [String; 3] {
        let base = self.cdn_base.trim_end_matches('/');
        [
            format!("{base}/vega@{}", self.vega_version),
            format!("{base}/vega-lite@{}", self.vega_lite_version),
            format!("{base}/vega-embed@{}", self.vega_embed_version),
        ]
    }
}
