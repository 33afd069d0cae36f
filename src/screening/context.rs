//! Context tags: urgency framing carried as evidence, never scored.

use super::catalog::SignalCatalog;
use super::types::ContextMatch;

/// Names of every context group with a phrase in `normalized`, catalog order.
pub fn detect_context(normalized: &str, catalog: &SignalCatalog) -> Vec<String> {
    catalog
        .context_groups()
        .iter()
        .filter(|group| group.matches(normalized))
        .map(|group| group.name.clone())
        .collect()
}

/// Every matched context phrase with its group name.
pub fn check_context(normalized: &str, catalog: &SignalCatalog) -> Vec<ContextMatch> {
    catalog
        .context_groups()
        .iter()
        .flat_map(|group| {
            group.all_matches(normalized).map(|phrase| ContextMatch {
                phrase: phrase.text().to_string(),
                name: group.name.clone(),
            })
        })
        .collect()
}
