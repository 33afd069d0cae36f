//! Signal catalog: symptom and context phrase groups.
//!
//! `CatalogDocument` is the stored shape (`{symptomSignals, contextSignals}`),
//! kept in document order. `SignalCatalog` is the validated snapshot the
//! scorer reads; it is only ever built through [`SignalCatalog::from_document`],
//! so an installed catalog never holds a phrase that would match every text.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::normalize::normalize;
use super::types::CatalogError;

// ═══════════════════════════════════════════════════════════
// Stored document
// ═══════════════════════════════════════════════════════════

/// One phrase entry: a bare string or `{ "text": ..., "lang": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalPhrase {
    Plain(String),
    Tagged {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
}

impl SignalPhrase {
    pub fn tagged(text: &str, lang: &str) -> Self {
        SignalPhrase::Tagged {
            text: text.to_string(),
            lang: Some(lang.to_string()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            SignalPhrase::Plain(text) => text,
            SignalPhrase::Tagged { text, .. } => text,
        }
    }

    pub fn lang(&self) -> Option<&str> {
        match self {
            SignalPhrase::Plain(_) => None,
            SignalPhrase::Tagged { lang, .. } => lang.as_deref(),
        }
    }
}

impl From<&str> for SignalPhrase {
    fn from(text: &str) -> Self {
        SignalPhrase::Plain(text.to_string())
    }
}

/// Name → phrases mapping that keeps document order and duplicate keys
/// (duplicates are rejected later, at validation).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalGroups(pub Vec<(String, Vec<SignalPhrase>)>);

impl SignalGroups {
    pub fn get(&self, name: &str) -> Option<&[SignalPhrase]> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, phrases)| phrases.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SignalGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, phrases) in &self.0 {
            map.serialize_entry(name, phrases)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SignalGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = SignalGroups;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of group name to phrase list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, phrases)) = access.next_entry::<String, Vec<SignalPhrase>>()? {
                    groups.push((name, phrases));
                }
                Ok(SignalGroups(groups))
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// Catalog as stored in and fetched from the configuration store.
/// A missing mapping deserializes as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(rename = "symptomSignals", default)]
    pub symptom_signals: SignalGroups,
    #[serde(rename = "contextSignals", default)]
    pub context_signals: SignalGroups,
}

impl CatalogDocument {
    pub fn from_json(value: serde_json::Value) -> Result<Self, CatalogError> {
        serde_json::from_value(value).map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════
// Validated snapshot
// ═══════════════════════════════════════════════════════════

/// A named phrase group with its phrases pre-normalized for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalGroup {
    pub name: String,
    pub phrases: Vec<SignalPhrase>,
    patterns: Vec<String>,
}

impl SignalGroup {
    fn build(kind: &'static str, name: String, phrases: Vec<SignalPhrase>) -> Result<Self, CatalogError> {
        let mut patterns = Vec::with_capacity(phrases.len());
        for (index, phrase) in phrases.iter().enumerate() {
            let pattern = normalize(phrase.text());
            if pattern.is_empty() {
                return Err(CatalogError::EmptyPhrase { kind, group: name, index });
            }
            patterns.push(pattern);
        }
        Ok(Self { name, phrases, patterns })
    }

    /// First phrase (in list order) whose canonical form occurs in `normalized`.
    pub fn first_match(&self, normalized: &str) -> Option<&SignalPhrase> {
        self.patterns
            .iter()
            .position(|p| normalized.contains(p.as_str()))
            .map(|i| &self.phrases[i])
    }

    pub fn matches(&self, normalized: &str) -> bool {
        self.patterns.iter().any(|p| normalized.contains(p.as_str()))
    }

    /// Every matching phrase, in list order.
    pub fn all_matches<'a>(&'a self, normalized: &'a str) -> impl Iterator<Item = &'a SignalPhrase> + 'a {
        self.patterns
            .iter()
            .zip(&self.phrases)
            .filter(move |(p, _)| normalized.contains(p.as_str()))
            .map(|(_, phrase)| phrase)
    }
}

/// Immutable, validated catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalCatalog {
    symptoms: Vec<SignalGroup>,
    contexts: Vec<SignalGroup>,
}

impl SignalCatalog {
    /// Validate a stored document into a snapshot.
    ///
    /// Rejects: no symptom categories, duplicate group names, phrases that
    /// normalize to nothing.
    pub fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        if doc.symptom_signals.is_empty() {
            return Err(CatalogError::NoSymptomCategories);
        }
        let symptoms = build_groups("symptom", doc.symptom_signals)?;
        let contexts = build_groups("context", doc.context_signals)?;
        Ok(Self { symptoms, contexts })
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, CatalogError> {
        Self::from_document(CatalogDocument::from_json(value)?)
    }

    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            symptom_signals: to_groups(&self.symptoms),
            context_signals: to_groups(&self.contexts),
        }
    }

    pub fn symptom_groups(&self) -> &[SignalGroup] {
        &self.symptoms
    }

    pub fn context_groups(&self) -> &[SignalGroup] {
        &self.contexts
    }

    pub fn symptom_phrases(&self, category: &str) -> Option<&[SignalPhrase]> {
        find_group(&self.symptoms, category).map(|g| g.phrases.as_slice())
    }

    pub fn context_phrases(&self, context: &str) -> Option<&[SignalPhrase]> {
        find_group(&self.contexts, context).map(|g| g.phrases.as_slice())
    }

    pub fn symptom_group(&self, category: &str) -> Option<&SignalGroup> {
        find_group(&self.symptoms, category)
    }
}

fn build_groups(kind: &'static str, groups: SignalGroups) -> Result<Vec<SignalGroup>, CatalogError> {
    let mut built: Vec<SignalGroup> = Vec::with_capacity(groups.0.len());
    for (name, phrases) in groups.0 {
        if built.iter().any(|g| g.name == name) {
            return Err(CatalogError::DuplicateGroup { kind, name });
        }
        built.push(SignalGroup::build(kind, name, phrases)?);
    }
    Ok(built)
}

fn to_groups(groups: &[SignalGroup]) -> SignalGroups {
    SignalGroups(
        groups
            .iter()
            .map(|g| (g.name.clone(), g.phrases.clone()))
            .collect(),
    )
}

fn find_group<'a>(groups: &'a [SignalGroup], name: &str) -> Option<&'a SignalGroup> {
    groups.iter().find(|g| g.name == name)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn document_keeps_group_order() {
        let doc: CatalogDocument = serde_json::from_str(
            r#"{"symptomSignals": {"trauma": ["fall"], "bleeding": ["gunshot"], "cardiac": ["chest pain"]}}"#,
        )
        .unwrap();
        let names: Vec<&str> = doc.symptom_signals.names().collect();
        assert_eq!(names, ["trauma", "bleeding", "cardiac"]);
        assert!(doc.context_signals.is_empty());
    }

    #[test]
    fn accepts_plain_and_tagged_phrases() {
        let catalog = SignalCatalog::from_json(json!({
            "symptomSignals": {
                "cardiac": ["chest pain", {"text": "सीने में दर्द", "lang": "hi"}, {"text": "jaw pain"}]
            }
        }))
        .unwrap();
        let phrases = catalog.symptom_phrases("cardiac").unwrap();
        assert_eq!(phrases[0], SignalPhrase::Plain("chest pain".into()));
        assert_eq!(phrases[1].lang(), Some("hi"));
        assert_eq!(phrases[2].text(), "jaw pain");
        assert_eq!(phrases[2].lang(), None);
    }

    #[test]
    fn document_round_trips_through_json() {
        let original = json!({
            "symptomSignals": {"cardiac": ["chest pain", {"text": "दिल का दौरा", "lang": "hi"}]},
            "contextSignals": {"sudden": ["sudden"]}
        });
        let catalog = SignalCatalog::from_json(original.clone()).unwrap();
        let back = serde_json::to_value(catalog.to_document()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn rejects_wrong_shape() {
        let err = SignalCatalog::from_json(json!({"symptomSignals": {"cardiac": "chest pain"}})).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));

        let err = SignalCatalog::from_json(json!(["cardiac"])).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed(_)));
    }

    #[test]
    fn rejects_catalog_without_symptoms() {
        let err = SignalCatalog::from_json(json!({"contextSignals": {"sudden": ["sudden"]}})).unwrap_err();
        assert_eq!(err, CatalogError::NoSymptomCategories);
    }

    #[test]
    fn rejects_phrase_that_normalizes_to_nothing() {
        let err = SignalCatalog::from_json(json!({"symptomSignals": {"cardiac": ["chest pain", " ?! "]}}))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::EmptyPhrase {
                kind: "symptom",
                group: "cardiac".into(),
                index: 1
            }
        );
    }

    #[test]
    fn rejects_duplicate_group_names() {
        let err = SignalCatalog::from_document(CatalogDocument {
            symptom_signals: SignalGroups(vec![
                ("cardiac".into(), vec!["chest pain".into()]),
                ("cardiac".into(), vec!["jaw pain".into()]),
            ]),
            context_signals: SignalGroups::default(),
        })
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateGroup { kind: "symptom", .. }));
    }

    #[test]
    fn empty_group_is_allowed() {
        let catalog = SignalCatalog::from_json(json!({"symptomSignals": {"cardiac": [], "trauma": ["fall"]}})).unwrap();
        assert_eq!(catalog.symptom_phrases("cardiac"), Some(&[][..]));
        assert!(!catalog.symptom_groups()[0].matches("anything at all"));
    }

    #[test]
    fn group_matching_uses_normalized_phrases() {
        let catalog = SignalCatalog::from_json(json!({"symptomSignals": {"cardiac": ["Chest-Pain!", "jaw pain"]}})).unwrap();
        let group = &catalog.symptom_groups()[0];
        assert_eq!(group.first_match("sharp chest pain now").map(SignalPhrase::text), Some("Chest-Pain!"));
        assert_eq!(group.all_matches("jaw pain and chest pain").count(), 2);
        assert!(group.first_match("headache").is_none());
    }

    #[test]
    fn lookups_on_unknown_names() {
        let catalog = SignalCatalog::from_json(json!({"symptomSignals": {"cardiac": ["chest pain"]}})).unwrap();
        assert!(catalog.symptom_phrases("dental").is_none());
        assert!(catalog.context_phrases("sudden").is_none());
    }
}
