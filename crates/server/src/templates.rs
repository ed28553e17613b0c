//! HTML page rendering.
//!
//! Templates are compiled into the binary. Auto-escaping follows the template
//! name, so everything rendered from `index.html` is HTML-escaped except the
//! chart fragment, which is marked `safe`.

use emotext::DisplayPayload;
use minijinja::{context, Environment};
use serde::Serialize;

pub const INDEX: &str = "index.html";

const INDEX_SOURCE: &str = include_str!("../templates/index.html");

/// Build the template environment with every page registered.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(INDEX, INDEX_SOURCE)?;
    Ok(env)
}

#[derive(Debug, Serialize)]
struct ResultView<'a> {
    text: &'a str,
    label: &'a str,
    emoji: &'a str,
    confidence: String,
    chart_html: &'a str,
}

impl<'a> From<&'a DisplayPayload> for ResultView<'a> {
    fn from(payload: &'a DisplayPayload) -> Self {
        Self {
            text: &payload.text,
            label: &payload.label,
            emoji: payload.emoji,
            confidence: format!("{:.4}", payload.confidence),
            chart_html: &payload.chart_html,
        }
    }
}

/// Render the index page, with the result block when `result` is present.
pub fn render_index(
    env: &Environment<'static>,
    result: Option<&DisplayPayload>,
) -> Result<String, minijinja::Error> {
    let template = env.get_template(INDEX)?;
    template.render(context! { result => result.map(ResultView::from) })
}
