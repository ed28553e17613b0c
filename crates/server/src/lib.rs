//! emotext server - HTTP front end for text emotion detection
//!
//! This crate serves the emotext model over HTTP:
//!
//! - **Page**: an HTML form that shows the predicted emotion, its emoji, the
//!   confidence and a bar chart of the full distribution
//! - **API**: JSON predictions with the probability of every label
//! - **Health & Metrics**: liveness/readiness checks and Prometheus metrics
//!
//! Configuration comes from an optional `emotext.{toml,yaml,json}` file and
//! `EMOTEXT_*` environment variables. The model is loaded once at startup; a
//! model that cannot be loaded stops the process before it binds.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Endpoints
//!
//! - `GET /` - Input form
//! - `POST /` - Form submission (`raw_text`), HTML result
//! - `POST /predict` - JSON `{"text": ...}` → `{"predicted_emotion", "probabilities"}`
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check with model details
//! - `GET /metrics` - Prometheus metrics

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod templates;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
