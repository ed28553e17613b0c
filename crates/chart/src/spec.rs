//! Typed subset of the Vega-Lite grammar needed for a coloured bar chart.

use serde::Serialize;

pub(crate) const CATEGORY_FIELD: &str = "emotions";
pub(crate) const VALUE_FIELD: &str = "probability";

#[derive(Debug, Serialize)]
pub(crate) struct BarSpec<'a> {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub width: u32,
    pub height: u32,
    pub data: InlineData<'a>,
    pub mark: Mark,
    pub encoding: Encoding,
}

#[derive(Debug, Serialize)]
pub(crate) struct InlineData<'a> {
    pub values: Vec<Datum<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Datum<'a> {
    pub emotions: &'a str,
    pub probability: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct Mark {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct Encoding {
    pub x: Channel,
    pub y: Channel,
    pub color: Channel,
}

#[derive(Debug, Serialize)]
pub(crate) struct Channel {
    pub field: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl<'a> BarSpec<'a> {
    pub(crate) fn new(schema: String, width: u32, height: u32, values: Vec<Datum<'a>>) -> Self {
        Self {
            schema,
            width,
            height,
            data: InlineData { values },
            mark: Mark { kind: "bar" },
            encoding: Encoding {
                x: Channel {
                    field: CATEGORY_FIELD,
                    kind: "nominal",
                },
                y: Channel {
                    field: VALUE_FIELD,
                    kind: "quantitative",
                },
                color: Channel {
                    field: CATEGORY_FIELD,
                    kind: "nominal",
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_vega_lite_shape() {
        let spec = BarSpec::new(
            "https://vega.github.io/schema/vega-lite/v5.json".into(),
            500,
            300,
            vec![Datum {
                emotions: "joy",
                probability: 0.5,
            }],
        );
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value,
            json!({
                "$schema": "https://vega.github.io/schema/vega-lite/v5.json",
                "width": 500,
                "height": 300,
                "data": {"values": [{"emotions": "joy", "probability": 0.5}]},
                "mark": {"type": "bar"},
                "encoding": {
                    "x": {"field": "emotions", "type": "nominal"},
                    "y": {"field": "probability", "type": "quantitative"},
                    "color": {"field": "emotions", "type": "nominal"}
                }
            })
        );
    }
}
