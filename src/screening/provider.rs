//! Current catalog snapshots and their refresh/update paths.
//!
//! Readers clone an `Arc` out of a briefly-held read lock and work on that
//! snapshot for the whole call. Writers build and validate a complete new
//! snapshot first, then swap the `Arc`; nothing is mutated in place.

use std::sync::{Arc, PoisonError, RwLock};

use super::catalog::{CatalogDocument, SignalCatalog, SignalPhrase};
use super::defaults::{default_catalog, default_document};
use super::engine::AssessmentEngine;
use super::messages::MessageCatalog;
use super::store::{CatalogSink, CatalogSource};
use super::types::{ScreeningError, StoreError};

/// Document key of the signal catalog.
pub const DEFAULT_CATALOG_KEY: &str = "signals";

/// Document key of the message catalog.
pub const DEFAULT_MESSAGES_KEY: &str = "emergency_messages";

/// Which snapshot a refresh left installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// Fetched and validated from the store.
    Store,
    /// Store had no document (or no store is configured).
    BuiltIn,
    /// Fetch failed or the document was invalid; previous snapshot kept.
    Retained,
}

pub struct CatalogProvider {
    source: Option<Arc<dyn CatalogSource>>,
    sink: Option<Arc<dyn CatalogSink>>,
    catalog_key: String,
    messages_key: String,
    catalog: RwLock<Arc<SignalCatalog>>,
    messages: RwLock<Arc<MessageCatalog>>,
}

impl CatalogProvider {
    /// Provider with built-in snapshots installed and nothing fetched yet.
    pub fn new(
        source: Option<Arc<dyn CatalogSource>>,
        sink: Option<Arc<dyn CatalogSink>>,
        catalog_key: &str,
        messages_key: &str,
    ) -> Self {
        Self {
            source,
            sink,
            catalog_key: catalog_key.to_string(),
            messages_key: messages_key.to_string(),
            catalog: RwLock::new(default_catalog()),
            messages: RwLock::new(MessageCatalog::builtin()),
        }
    }

    /// Provider without any store: built-in catalog and messages only.
    pub fn builtin() -> Self {
        Self::new(None, None, DEFAULT_CATALOG_KEY, DEFAULT_MESSAGES_KEY)
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn snapshot(&self) -> Arc<SignalCatalog> {
        Arc::clone(&*self.catalog.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn messages(&self) -> Arc<MessageCatalog> {
        Arc::clone(&*self.messages.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Engine pinned to the snapshots current right now.
    pub fn engine(&self) -> AssessmentEngine {
        AssessmentEngine::new(self.snapshot(), self.messages())
    }

    fn install_catalog(&self, catalog: Arc<SignalCatalog>) {
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = catalog;
    }

    fn install_messages(&self, messages: Arc<MessageCatalog>) {
        *self.messages.write().unwrap_or_else(PoisonError::into_inner) = messages;
    }

    // ═══════════════════════════════════════════════════════════
    // Refresh
    // ═══════════════════════════════════════════════════════════

    /// Re-fetch both catalogs. Returns where the signal catalog came from.
    pub fn refresh(&self) -> CatalogOrigin {
        let origin = self.refresh_catalog();
        self.refresh_messages();
        origin
    }

    fn refresh_catalog(&self) -> CatalogOrigin {
        let Some(source) = &self.source else {
            self.install_catalog(default_catalog());
            return CatalogOrigin::BuiltIn;
        };

        match source.get_document(&self.catalog_key) {
            Ok(Some(value)) => match SignalCatalog::from_json(value) {
                Ok(catalog) => {
                    let missing = missing_builtin_categories(&catalog);
                    if !missing.is_empty() {
                        tracing::warn!(
                            key = %self.catalog_key,
                            missing = ?missing,
                            "Stored signal catalog lacks built-in categories, treating them as empty"
                        );
                    }
                    tracing::info!(
                        key = %self.catalog_key,
                        symptom_groups = catalog.symptom_groups().len(),
                        context_groups = catalog.context_groups().len(),
                        "Signal catalog loaded from store"
                    );
                    self.install_catalog(Arc::new(catalog));
                    CatalogOrigin::Store
                }
                Err(e) => {
                    tracing::warn!(key = %self.catalog_key, error = %e, "Rejected stored signal catalog, keeping current");
                    CatalogOrigin::Retained
                }
            },
            Ok(None) => {
                tracing::info!(key = %self.catalog_key, "No stored signal catalog, using built-in");
                self.install_catalog(default_catalog());
                CatalogOrigin::BuiltIn
            }
            Err(e) => {
                tracing::warn!(key = %self.catalog_key, error = %e, "Signal catalog fetch failed, keeping current");
                CatalogOrigin::Retained
            }
        }
    }

    fn refresh_messages(&self) {
        let Some(source) = &self.source else {
            self.install_messages(MessageCatalog::builtin());
            return;
        };

        match source.get_document(&self.messages_key) {
            Ok(Some(value)) => match MessageCatalog::from_json(value) {
                Ok(messages) => self.install_messages(Arc::new(messages)),
                Err(e) => {
                    tracing::warn!(key = %self.messages_key, error = %e, "Rejected stored message catalog, keeping current");
                }
            },
            Ok(None) => self.install_messages(MessageCatalog::builtin()),
            Err(e) => {
                tracing::warn!(key = %self.messages_key, error = %e, "Message catalog fetch failed, keeping current");
            }
        }
    }

    // ═══════════════════════════════════════════════════════════
    // Update
    // ═══════════════════════════════════════════════════════════

    /// Validate, forward to the sink (if any), then install.
    ///
    /// On any error the current snapshot stays active.
    pub fn update(&self, document: CatalogDocument) -> Result<(), ScreeningError> {
        let catalog = SignalCatalog::from_document(document)?;

        if let Some(sink) = &self.sink {
            let value = serde_json::to_value(catalog.to_document()).map_err(StoreError::from)?;
            sink.set_document(&self.catalog_key, &value)?;
        }

        tracing::info!(
            key = %self.catalog_key,
            symptom_groups = catalog.symptom_groups().len(),
            persisted = self.sink.is_some(),
            "Signal catalog updated"
        );
        self.install_catalog(Arc::new(catalog));
        Ok(())
    }

    /// Write the built-in catalog to the store and install it.
    pub fn seed_default(&self) -> Result<(), ScreeningError> {
        self.update(default_document())
    }

    // ═══════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════

    /// Phrases of a symptom category; built-in list if the active catalog
    /// lacks the name, empty if neither has it.
    pub fn symptom_phrases(&self, category: &str) -> Vec<SignalPhrase> {
        let current = self.snapshot();
        let builtin = default_catalog();
        current
            .symptom_phrases(category)
            .or_else(|| builtin.symptom_phrases(category))
            .map(<[SignalPhrase]>::to_vec)
            .unwrap_or_default()
    }

    /// Phrases of a context group, with the same fallback as [`Self::symptom_phrases`].
    pub fn context_phrases(&self, context: &str) -> Vec<SignalPhrase> {
        let current = self.snapshot();
        let builtin = default_catalog();
        current
            .context_phrases(context)
            .or_else(|| builtin.context_phrases(context))
            .map(<[SignalPhrase]>::to_vec)
            .unwrap_or_default()
    }
}

/// Built-in symptom categories absent from `catalog`, in built-in order.
pub fn missing_builtin_categories(catalog: &SignalCatalog) -> Vec<String> {
    default_catalog()
        .symptom_groups()
        .iter()
        .filter(|group| catalog.symptom_group(&group.name).is_none())
        .map(|group| group.name.clone())
        .collect()
}
