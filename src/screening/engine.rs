//! Assessment pipeline: normalize → score / context / language → classify → message.
//!
//! Pure and deterministic: the same text, threshold and catalog snapshots
//! always yield the same [`Assessment`]. Recording is left to the caller.

use std::sync::Arc;

use super::catalog::SignalCatalog;
use super::classify::classify;
use super::context::detect_context;
use super::language::detect_language;
use super::messages::{select_message, MessageCatalog};
use super::normalize::normalize;
use super::scoring::score_risk;
use super::types::Assessment;

/// Run the full screen. Absent input is treated as empty text.
pub fn assess(
    input: Option<&str>,
    threshold: u32,
    catalog: &SignalCatalog,
    messages: &MessageCatalog,
) -> Assessment {
    let text = normalize(input.unwrap_or_default());

    let risk = score_risk(&text, catalog);
    let context_tags = detect_context(&text, catalog);
    let detected_language = detect_language(&text);

    let classification = classify(risk.score, &risk.categories, &context_tags, threshold);
    let message = select_message(classification.is_emergency, detected_language, messages).to_string();

    tracing::debug!(
        score = risk.score,
        categories = risk.categories.len(),
        context_tags = context_tags.len(),
        lang = detected_language.as_str(),
        is_emergency = classification.is_emergency,
        "Assessment complete"
    );

    Assessment {
        score: risk.score,
        categories: risk.categories,
        context_tags,
        detected_language,
        is_emergency: classification.is_emergency,
        reasons: classification.reasons,
        message,
    }
}

/// A pair of catalog snapshots pinned for the lifetime of the engine.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    catalog: Arc<SignalCatalog>,
    messages: Arc<MessageCatalog>,
}

impl AssessmentEngine {
    pub fn new(catalog: Arc<SignalCatalog>, messages: Arc<MessageCatalog>) -> Self {
        Self { catalog, messages }
    }

    /// Engine over the built-in catalog and messages.
    pub fn builtin() -> Self {
        Self::new(super::defaults::default_catalog(), MessageCatalog::builtin())
    }

    pub fn assess(&self, input: Option<&str>, threshold: u32) -> Assessment {
        assess(input, threshold, &self.catalog, &self.messages)
    }

    pub fn catalog(&self) -> &SignalCatalog {
        &self.catalog
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }
}
