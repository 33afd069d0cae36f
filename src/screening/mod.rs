//! Emergency screen for free-text symptom descriptions.
//!
//! Keyword-level triage only: phrases from a multilingual catalog are
//! matched against normalized text, matched categories are weighted and
//! summed, and the sum is compared with a threshold. No diagnosis.

pub mod catalog;
pub mod classify;
pub mod context;
pub mod defaults;
pub mod engine;
pub mod language;
pub mod messages;
pub mod normalize;
pub mod provider;
pub mod scoring;
pub mod service;
pub mod store;
pub mod types;

pub use catalog::{CatalogDocument, SignalCatalog, SignalPhrase};
pub use engine::{assess, AssessmentEngine};
pub use messages::MessageCatalog;
pub use provider::{CatalogOrigin, CatalogProvider};
pub use service::{RecordDispatch, ScreeningService};
pub use store::{AssessmentRecorder, CatalogSink, CatalogSource, RecordId};
pub use types::*;
