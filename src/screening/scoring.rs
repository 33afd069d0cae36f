//! Risk scoring over symptom categories.

use super::catalog::SignalCatalog;
use super::types::SymptomMatch;

/// Weight for categories not listed in [`category_weight`].
pub const DEFAULT_CATEGORY_WEIGHT: u32 = 40;

/// Fixed severity weight of a symptom category.
pub fn category_weight(category: &str) -> u32 {
    match category {
        "cardiac" => 60,
        "neurological" => 70,
        "respiratory" => 70,
        "bleeding" => 80,
        _ => DEFAULT_CATEGORY_WEIGHT,
    }
}

/// Score and matched categories (catalog order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskScore {
    pub score: u32,
    pub categories: Vec<String>,
}

/// Sum the weights of every matched category.
///
/// A category counts once however many of its phrases occur. The sum is not
/// capped: co-occurring categories push the score past 100.
pub fn score_risk(normalized: &str, catalog: &SignalCatalog) -> RiskScore {
    let mut risk = RiskScore::default();
    for group in catalog.symptom_groups() {
        if group.matches(normalized) {
            risk.score = risk.score.saturating_add(category_weight(&group.name));
            risk.categories.push(group.name.clone());
        }
    }
    risk
}

/// First symptom phrase found in `normalized`.
///
/// With a known `category` only that group is searched; with `None` or an
/// unknown name every group is searched in catalog order.
pub fn check_symptom(normalized: &str, catalog: &SignalCatalog, category: Option<&str>) -> Option<SymptomMatch> {
    if let Some(group) = category.and_then(|c| catalog.symptom_group(c)) {
        return group.first_match(normalized).map(|phrase| SymptomMatch {
            symptom: phrase.text().to_string(),
            category: group.name.clone(),
        });
    }

    catalog.symptom_groups().iter().find_map(|group| {
        group.first_match(normalized).map(|phrase| SymptomMatch {
            symptom: phrase.text().to_string(),
            category: group.name.clone(),
        })
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::screening::defaults::default_catalog;
    use crate::screening::normalize::normalize;

    fn score(text: &str) -> RiskScore {
        score_risk(&normalize(text), &default_catalog())
    }

    #[test]
    fn weights_table() {
        assert_eq!(category_weight("cardiac"), 60);
        assert_eq!(category_weight("neurological"), 70);
        assert_eq!(category_weight("respiratory"), 70);
        assert_eq!(category_weight("bleeding"), 80);
        assert_eq!(category_weight("trauma"), 40);
        assert_eq!(category_weight("anything-else"), 40);
    }

    #[test]
    fn category_counted_once() {
        let risk = score("Chest pain and jaw pain since morning");
        assert_eq!(risk.categories, ["cardiac"]);
        assert_eq!(risk.score, 60);
    }

    #[test]
    fn compounding_categories_exceed_hundred() {
        let risk = score("shortness of breath with chest pain");
        assert_eq!(risk.categories, ["cardiac", "respiratory"]);
        assert_eq!(risk.score, 130);
    }

    #[test]
    fn categories_follow_catalog_order_not_text_order() {
        let risk = score("car accident, head injury, vomiting blood, seizure");
        assert_eq!(risk.categories, ["neurological", "bleeding", "trauma"]);
        assert_eq!(risk.score, 70 + 80 + 40);
    }

    #[test]
    fn no_match_scores_zero() {
        let risk = score("mild cough and a runny nose");
        assert_eq!(risk, RiskScore::default());
    }

    #[test]
    fn hindi_and_telugu_phrases_score() {
        assert_eq!(score("मुझे सीने में दर्द है").categories, ["cardiac"]);
        assert_eq!(score("రక్త వాంతులు అవుతున్నాయి").categories, ["bleeding"]);
    }

    #[test]
    fn unknown_category_uses_default_weight() {
        let catalog = SignalCatalog::from_json(json!({
            "symptomSignals": {"allergic": ["swollen throat"], "cardiac": ["chest pain"]}
        }))
        .unwrap();
        let risk = score_risk("swollen throat and chest pain", &catalog);
        assert_eq!(risk.categories, ["allergic", "cardiac"]);
        assert_eq!(risk.score, 100);
    }

    #[test]
    fn check_symptom_first_hit_across_categories() {
        let hit = check_symptom(&normalize("head injury and chest pain"), &default_catalog(), None).unwrap();
        assert_eq!(hit.category, "cardiac");
        assert_eq!(hit.symptom, "chest pain");
    }

    #[test]
    fn check_symptom_in_named_category() {
        let text = normalize("head injury and chest pain");
        let hit = check_symptom(&text, &default_catalog(), Some("trauma")).unwrap();
        assert_eq!(hit.category, "trauma");
        assert_eq!(hit.symptom, "head injury");
        assert!(check_symptom(&text, &default_catalog(), Some("bleeding")).is_none());
    }

    #[test]
    fn check_symptom_unknown_category_searches_all() {
        let hit = check_symptom(&normalize("gunshot"), &default_catalog(), Some("dental")).unwrap();
        assert_eq!(hit.category, "bleeding");
    }

    #[test]
    fn check_symptom_no_match() {
        assert!(check_symptom("sore knee", &default_catalog(), None).is_none());
    }
}
