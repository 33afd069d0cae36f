//! Threshold decision and evidence list.

/// Emergency decision with its supporting reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub is_emergency: bool,
    pub reasons: Vec<String>,
}

/// `score >= threshold` is an emergency. Reasons list every signal before any
/// context tag, each in the order given.
pub fn classify(score: u32, categories: &[String], context_tags: &[String], threshold: u32) -> Classification {
    let reasons = categories
        .iter()
        .map(|c| format!("signal: {c}"))
        .chain(context_tags.iter().map(|c| format!("context: {c}")))
        .collect();

    Classification {
        is_emergency: score >= threshold,
        reasons,
    }
}
