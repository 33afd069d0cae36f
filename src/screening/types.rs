use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default emergency cutoff, tuned to the category weights.
pub const DEFAULT_THRESHOLD: u32 = 70;

/// Returned for every non-emergency assessment, whatever the input language.
pub const NO_EMERGENCY_MESSAGE: &str = "No emergency signals detected by screen.";

// ═══════════════════════════════════════════════════════════
// Language
// ═══════════════════════════════════════════════════════════

/// Coarse language tag derived from the script of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Te,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Te => "te",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════
// Assessment
// ═══════════════════════════════════════════════════════════

/// Full result of one screening pass. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Open-ended sum of matched category weights (not a percentage).
    pub score: u32,
    /// Matched symptom categories, in catalog order.
    pub categories: Vec<String>,
    /// Matched context names, in catalog order.
    pub context_tags: Vec<String>,
    pub detected_language: Language,
    pub is_emergency: bool,
    /// `signal: <category>` entries first, then `context: <name>` entries.
    pub reasons: Vec<String>,
    pub message: String,
}

impl Assessment {
    /// The wire shape every outer layer exposes.
    pub fn report(&self) -> EmergencyReport {
        EmergencyReport {
            is_emergency: self.is_emergency,
            risk: self.score,
            reasons: self.reasons.clone(),
            message: self.message.clone(),
        }
    }

    /// Older `{emergency, message, riskScore, reasons}` shape.
    pub fn verdict(&self) -> GovernorVerdict {
        GovernorVerdict {
            emergency: self.is_emergency,
            message: self.message.clone(),
            risk_score: self.score,
            reasons: self.reasons.clone(),
        }
    }
}

/// `{isEmergency, risk, reasons, message}`; field names are a compatibility contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyReport {
    pub is_emergency: bool,
    pub risk: u32,
    pub reasons: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernorVerdict {
    pub emergency: bool,
    pub message: String,
    pub risk_score: u32,
    pub reasons: Vec<String>,
}

/// Guard result for callers that must stop a flow on emergencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDecision {
    pub block: bool,
    pub report: EmergencyReport,
}

/// First symptom phrase found in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomMatch {
    pub symptom: String,
    pub category: String,
}

/// One context phrase found in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMatch {
    #[serde(rename = "context")]
    pub phrase: String,
    #[serde(rename = "type")]
    pub name: String,
}

// ═══════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════

/// A catalog or message document that must not be installed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Malformed catalog document: {0}")]
    Malformed(String),

    #[error("Catalog has no symptom categories")]
    NoSymptomCategories,

    #[error("Duplicate {kind} group: {name}")]
    DuplicateGroup { kind: &'static str, name: String },

    #[error("Phrase {index} of {kind} group '{group}' is empty after normalization")]
    EmptyPhrase {
        kind: &'static str,
        group: String,
        index: usize,
    },

    #[error("Message catalog has no '{0}' fallback entry")]
    MissingFallbackMessage(&'static str),
}

/// Failure inside an external collaborator (catalog store, recorder).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    LockFailed,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by catalog management operations.
#[derive(Error, Debug)]
pub enum ScreeningError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
