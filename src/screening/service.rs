//! Entry point used by outer layers (CLI, HTTP handlers).
//!
//! Wires the catalog provider and the optional recorder together. Every
//! capability is resolved once, at construction.

use std::sync::Arc;

use crate::config::ScreeningConfig;

use super::catalog::{CatalogDocument, SignalPhrase};
use super::context::check_context;
use super::normalize::normalize;
use super::provider::{CatalogOrigin, CatalogProvider};
use super::scoring::check_symptom;
use super::store::{AssessmentRecorder, CatalogSink, CatalogSource, RecordId};
use super::types::{
    Assessment, BlockDecision, ContextMatch, EmergencyReport, GovernorVerdict, ScreeningError,
    SymptomMatch, DEFAULT_THRESHOLD,
};

/// What happened to a record request.
#[derive(Debug)]
pub enum RecordDispatch {
    /// No recorder configured.
    Skipped,
    /// Ran on the caller's thread (no tokio runtime available).
    Completed(Option<RecordId>),
    /// Running on the tokio blocking pool.
    Pending(tokio::task::JoinHandle<Option<RecordId>>),
}

pub struct ScreeningService {
    provider: CatalogProvider,
    recorder: Option<Arc<dyn AssessmentRecorder>>,
    threshold: u32,
}

impl ScreeningService {
    pub fn new(provider: CatalogProvider, recorder: Option<Arc<dyn AssessmentRecorder>>, threshold: u32) -> Self {
        Self {
            provider,
            recorder,
            threshold,
        }
    }

    /// Built-in catalogs, no store, default threshold.
    pub fn builtin() -> Self {
        Self::new(CatalogProvider::builtin(), None, DEFAULT_THRESHOLD)
    }

    /// Build from an optional store serving every collaborator role, then
    /// load the catalogs once.
    pub fn with_store<S>(store: Option<Arc<S>>, config: &ScreeningConfig) -> Self
    where
        S: CatalogSource + CatalogSink + AssessmentRecorder + 'static,
    {
        let (source, sink, recorder) = match store {
            Some(store) => (
                Some(store.clone() as Arc<dyn CatalogSource>),
                Some(store.clone() as Arc<dyn CatalogSink>),
                Some(store as Arc<dyn AssessmentRecorder>),
            ),
            None => (None, None, None),
        };

        let provider = CatalogProvider::new(source, sink, &config.catalog_key, &config.messages_key);
        let origin = provider.refresh();
        tracing::info!(
            catalog = ?origin,
            store = provider.has_source(),
            threshold = config.threshold,
            "Screening service ready"
        );

        Self::new(provider, recorder, config.threshold)
    }

    pub fn provider(&self) -> &CatalogProvider {
        &self.provider
    }

    pub fn default_threshold(&self) -> u32 {
        self.threshold
    }

    pub fn has_recorder(&self) -> bool {
        self.recorder.is_some()
    }

    // ═══════════════════════════════════════════════════════════
    // Assessment
    // ═══════════════════════════════════════════════════════════

    /// Full assessment against the snapshots current at call start.
    pub fn assess(&self, text: Option<&str>, threshold: Option<u32>) -> Assessment {
        self.provider
            .engine()
            .assess(text, threshold.unwrap_or(self.threshold))
    }

    /// `{isEmergency, risk, reasons, message}`.
    pub fn assess_emergency(&self, text: Option<&str>, threshold: Option<u32>) -> EmergencyReport {
        self.assess(text, threshold).report()
    }

    pub fn should_block(&self, text: Option<&str>, threshold: Option<u32>) -> BlockDecision {
        let report = self.assess_emergency(text, threshold);
        BlockDecision {
            block: report.is_emergency,
            report,
        }
    }

    /// `{emergency, message, riskScore, reasons}`.
    pub fn emergency_governor(&self, text: Option<&str>, threshold: Option<u32>) -> GovernorVerdict {
        self.assess(text, threshold).verdict()
    }

    pub fn check_symptom(&self, text: &str, category: Option<&str>) -> Option<SymptomMatch> {
        check_symptom(&normalize(text), &self.provider.snapshot(), category)
    }

    pub fn check_context(&self, text: &str) -> Vec<ContextMatch> {
        check_context(&normalize(text), &self.provider.snapshot())
    }

    // ═══════════════════════════════════════════════════════════
    // Recording
    // ═══════════════════════════════════════════════════════════

    /// Persist an assessment. Failures are logged and reported as `None`.
    pub fn record(&self, user_id: &str, input_text: &str, assessment: &Assessment) -> Option<RecordId> {
        let recorder = self.recorder.as_ref()?;
        log_record(recorder.as_ref(), user_id, input_text, assessment)
    }

    /// Record without holding up the caller when a tokio runtime is running.
    pub fn dispatch_record(&self, user_id: &str, input_text: &str, assessment: &Assessment) -> RecordDispatch {
        let Some(recorder) = &self.recorder else {
            return RecordDispatch::Skipped;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let recorder = Arc::clone(recorder);
                let user_id = user_id.to_string();
                let input_text = input_text.to_string();
                let assessment = assessment.clone();
                RecordDispatch::Pending(handle.spawn_blocking(move || {
                    log_record(recorder.as_ref(), &user_id, &input_text, &assessment)
                }))
            }
            Err(_) => RecordDispatch::Completed(log_record(recorder.as_ref(), user_id, input_text, assessment)),
        }
    }

    // ═══════════════════════════════════════════════════════════
    // Catalog management
    // ═══════════════════════════════════════════════════════════

    pub fn refresh_catalog(&self) -> CatalogOrigin {
        self.provider.refresh()
    }

    pub fn update_catalog(&self, document: CatalogDocument) -> Result<(), ScreeningError> {
        self.provider.update(document)
    }

    pub fn seed_default_catalog(&self) -> Result<(), ScreeningError> {
        self.provider.seed_default()
    }

    pub fn catalog_document(&self) -> CatalogDocument {
        self.provider.snapshot().to_document()
    }

    pub fn symptom_phrases(&self, category: &str) -> Vec<SignalPhrase> {
        self.provider.symptom_phrases(category)
    }

    pub fn context_phrases(&self, context: &str) -> Vec<SignalPhrase> {
        self.provider.context_phrases(context)
    }
}

fn log_record(
    recorder: &dyn AssessmentRecorder,
    user_id: &str,
    input_text: &str,
    assessment: &Assessment,
) -> Option<RecordId> {
    match recorder.log(user_id, input_text, assessment) {
        Ok(id) => {
            tracing::debug!(record_id = %id, is_emergency = assessment.is_emergency, "Assessment recorded");
            Some(id)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Assessment record dropped");
            None
        }
    }
}
