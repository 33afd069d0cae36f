//! Built-in signal catalog, used whenever no stored catalog is available.
//!
//! English, Hindi and Telugu phrases share one list per category.

use std::sync::{Arc, LazyLock};

use super::catalog::{CatalogDocument, SignalCatalog, SignalGroups, SignalPhrase};

type PhraseTable = &'static [(&'static str, &'static str)];

const CARDIAC: PhraseTable = &[
    ("en", "chest pain"),
    ("en", "crushing chest"),
    ("en", "pain in left arm"),
    ("en", "jaw pain"),
    ("en", "heart attack"),
    ("en", "tightness in chest"),
    ("hi", "सीने में दर्द"),
    ("hi", "दिल का दौरा"),
    ("hi", "बाएं हाथ में दर्द"),
    ("hi", "छाती में जकड़न"),
    ("te", "ఛాతిలో నొప్పి"),
    ("te", "గుండె నొప్పి"),
    ("te", "హృదయాఘాతం"),
];

const NEUROLOGICAL: PhraseTable = &[
    ("en", "slurred speech"),
    ("en", "facial droop"),
    ("en", "numbness on one side"),
    ("en", "arm weakness"),
    ("en", "stroke"),
    ("en", "seizure"),
    ("en", "loss of vision"),
    ("en", "confused"),
    ("en", "worst headache of my life"),
    ("hi", "बोलने में कठिनाई"),
    ("hi", "लकवा"),
    ("hi", "दौरा"),
    ("te", "మాట తడబడటం"),
    ("te", "పక్షవాతం"),
    ("te", "ఫిట్స్"),
];

const RESPIRATORY: PhraseTable = &[
    ("en", "cannot breathe"),
    ("en", "shortness of breath"),
    ("en", "gasping for air"),
    ("en", "turning blue"),
    ("en", "choking"),
    ("hi", "सांस लेने में कठिनाई"),
    ("hi", "सांस नहीं आ रही"),
    ("te", "శ్వాస తీసుకోవడంలో ఇబ్బంది"),
    ("te", "ఊపిరి రావడం లేదు"),
];

const BLEEDING: PhraseTable = &[
    ("en", "heavy bleeding"),
    ("en", "vomiting blood"),
    ("en", "coughing up blood"),
    ("en", "deep wound"),
    ("en", "stab wound"),
    ("en", "gunshot"),
    ("hi", "बहुत ज्यादा खून बहना"),
    ("hi", "खून की उल्टी"),
    ("te", "అధిక రక్తస్రావం"),
    ("te", "రక్త వాంతులు"),
];

const TRAUMA: PhraseTable = &[
    ("en", "fall from height"),
    ("en", "car accident"),
    ("en", "head injury"),
    ("en", "broken bone"),
    ("hi", "कार दुर्घटना"),
    ("hi", "सिर में चोट"),
    ("te", "రోడ్డు ప్రమాదం"),
    ("te", "తల గాయం"),
];

const SUDDEN: PhraseTable = &[
    ("en", "sudden"),
    ("en", "abrupt"),
    ("en", "instantly"),
    ("hi", "अचानक"),
    ("te", "అకస్మాత్తుగా"),
];

const WORSENING: PhraseTable = &[
    ("en", "getting worse"),
    ("en", "rapidly"),
    ("en", "unbearable"),
    ("hi", "बढ़ रहा है"),
    ("te", "మరింత ఎక్కువవుతోంది"),
];

const EXERTION: PhraseTable = &[
    ("en", "while running"),
    ("en", "during exercise"),
    ("en", "walking"),
    ("en", "exercise"),
    ("hi", "चलते समय"),
    ("te", "నడుస్తున్నప్పుడు"),
];

const DURATION: PhraseTable = &[
    ("en", "for hours"),
    ("en", "persisting"),
    ("en", "constant"),
    ("hi", "कई घंटों से"),
    ("te", "గంటలుగా"),
];

/// Symptom categories, in the order they are scored and reported.
const SYMPTOM_SIGNALS: &[(&str, PhraseTable)] = &[
    ("cardiac", CARDIAC),
    ("neurological", NEUROLOGICAL),
    ("respiratory", RESPIRATORY),
    ("bleeding", BLEEDING),
    ("trauma", TRAUMA),
];

const CONTEXT_SIGNALS: &[(&str, PhraseTable)] = &[
    ("sudden", SUDDEN),
    ("worsening", WORSENING),
    ("exertion", EXERTION),
    ("duration", DURATION),
];

static DEFAULT_CATALOG: LazyLock<Arc<SignalCatalog>> = LazyLock::new(|| {
    Arc::new(SignalCatalog::from_document(default_document()).expect("Invalid built-in signal catalog"))
});

/// The built-in catalog in its stored form (used for seeding).
pub fn default_document() -> CatalogDocument {
    CatalogDocument {
        symptom_signals: to_groups(SYMPTOM_SIGNALS),
        context_signals: to_groups(CONTEXT_SIGNALS),
    }
}

/// Shared handle to the validated built-in catalog.
pub fn default_catalog() -> Arc<SignalCatalog> {
    Arc::clone(&DEFAULT_CATALOG)
}

fn to_groups(table: &[(&str, PhraseTable)]) -> SignalGroups {
    SignalGroups(
        table
            .iter()
            .map(|(name, phrases)| {
                let phrases = phrases
                    .iter()
                    .map(|(lang, text)| SignalPhrase::tagged(text, lang))
                    .collect();
                (name.to_string(), phrases)
            })
            .collect(),
    )
}
