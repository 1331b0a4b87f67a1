//! # Blanks - Fill-in-the-Blanks Form Engine
//!
//! Blanks turns a declarative form definition into a live set of form
//! controls. A form is a sentence of text and blanks; a blank may own
//! conditional branches whose blanks only exist while the governing value
//! matches the branch filter.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blanks::config::FormConfig;
//! use blanks::engine::FormSession;
//! use serde_json::json;
//!
//! fn main() -> anyhow::Result<()> {
//!     let form = FormConfig::from_path("forms/widget_label.yaml")?;
//!     let mut session = FormSession::new(&form)?;
//!
//!     // Shows the currency blank
//!     let change = session.set_value("labelType", json!("currency"))?;
//!     assert_eq!(change.added, vec!["labelCurrency"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: field registry and widget tree (static configuration)
//! - **Engine**: validator compiler, live controls and the synchronizing session
//! - **Adapters**: input/select bindings and rendering
//! - **Config**: settings and form definition loading and validation

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;

pub use config::FormConfig;
pub use domain::{ConfigurationError, FormError};
pub use engine::{FormSession, TreeChange};
