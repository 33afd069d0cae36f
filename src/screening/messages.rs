//! Localized emergency advisories.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use super::types::{CatalogError, Language, NO_EMERGENCY_MESSAGE};

/// Language every message catalog must carry.
pub const FALLBACK_LANGUAGE: &str = "en";

pub const EMERGENCY_MESSAGE_EN: &str = "⚠️ This may be a medical emergency.\n\n\
Based on your symptoms, it may not be safe to continue.\n\
Please seek immediate medical attention or go to the nearest emergency department now.";

pub const EMERGENCY_MESSAGE_HI: &str = "⚠️ यह एक चिकित्सा आपात स्थिति हो सकती है।\n\n\
आपके लक्षणों के आधार पर यहाँ आगे बढ़ना सुरक्षित नहीं है।\n\
कृपया तुरंत नज़दीकी अस्पताल या आपातकालीन सेवा से संपर्क करें।";

pub const EMERGENCY_MESSAGE_TE: &str = "⚠️ ఇది వైద్య అత్యవసర పరిస్థితి కావచ్చు.\n\n\
మీ లక్షణాల ఆధారంగా ఇక్కడ కొనసాగడం సురక్షితం కాదు.\n\
దయచేసి వెంటనే సమీప ఆసుపత్రికి వెళ్లండి లేదా అత్యవసర వైద్య సహాయం పొందండి.";

static BUILTIN_MESSAGES: LazyLock<Arc<MessageCatalog>> = LazyLock::new(|| {
    let messages = [
        ("en", EMERGENCY_MESSAGE_EN),
        ("hi", EMERGENCY_MESSAGE_HI),
        ("te", EMERGENCY_MESSAGE_TE),
    ]
    .into_iter()
    .map(|(lang, text)| (lang.to_string(), text.to_string()))
    .collect();
    Arc::new(MessageCatalog::new(messages).expect("Invalid built-in message catalog"))
});

/// Language code → advisory text. Always holds an `en` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: BTreeMap<String, String>,
    fallback: String,
}

impl MessageCatalog {
    pub fn new(messages: BTreeMap<String, String>) -> Result<Self, CatalogError> {
        let fallback = messages
            .get(FALLBACK_LANGUAGE)
            .cloned()
            .ok_or(CatalogError::MissingFallbackMessage(FALLBACK_LANGUAGE))?;
        Ok(Self { messages, fallback })
    }

    /// Parse a stored `{ "<lang>": "<text>", ... }` document.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CatalogError> {
        let messages: BTreeMap<String, String> =
            serde_json::from_value(value).map_err(|e| CatalogError::Malformed(e.to_string()))?;
        Self::new(messages)
    }

    pub fn builtin() -> Arc<MessageCatalog> {
        Arc::clone(&BUILTIN_MESSAGES)
    }

    /// Advisory for `lang`, or the `en` advisory when `lang` is absent.
    pub fn get(&self, lang: &str) -> &str {
        self.messages.get(lang).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.messages.contains_key(lang)
    }

    pub fn to_map(&self) -> &BTreeMap<String, String> {
        &self.messages
    }
}

/// Message for an assessment outcome. Non-emergencies always get the
/// neutral English line.
pub fn select_message<'a>(is_emergency: bool, lang: Language, catalog: &'a MessageCatalog) -> &'a str {
    if is_emergency {
        catalog.get(lang.as_str())
    } else {
        NO_EMERGENCY_MESSAGE
    }
}
