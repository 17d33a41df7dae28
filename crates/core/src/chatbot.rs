//! Rule-based chatbot intent matcher.
//!
//! The dispatcher scores each rule by counting keyword hits in the
//! (lowercased) question and returns the best-scoring rule. Questions that
//! hit no rule fall through to [`FALLBACK_ANSWER`]; any richer
//! natural-language answering is an external service and not handled here.

/// A single intent rule: a topic label, trigger keywords, and a canned answer.
#[derive(Debug)]
pub struct IntentRule {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

/// Answer returned when no rule matches.
pub const FALLBACK_ANSWER: &str = "I'm not sure about that yet. Please browse the \
    content library or contact your Agricultural Extension Worker for assistance.";

/// The static rule table, checked in order. Earlier rules win ties.
pub const RULES: &[IntentRule] = &[
    IntentRule {
        topic: "greeting",
        keywords: &["hello", "hi", "magandang", "kumusta", "good morning"],
        answer: "Hello! I can help you with questions about pests, fertilizer, \
            irrigation, training activities, and the content library.",
    },
    IntentRule {
        topic: "pests",
        keywords: &["pest", "insect", "stem borer", "infestation", "peste", "kulisap"],
        answer: "For pest problems, check the Integrated Pest Management guides in \
            the content library. If the infestation is severe, report it to your \
            AEW so they can schedule a field visit.",
    },
    IntentRule {
        topic: "fertilizer",
        keywords: &["fertilizer", "abono", "urea", "nitrogen", "nutrient"],
        answer: "Fertilizer recommendations depend on your crop stage and soil. \
            The library has rate tables per growth stage; a soil test through \
            your municipal agriculture office gives the most accurate rates.",
    },
    IntentRule {
        topic: "irrigation",
        keywords: &["irrigation", "water", "patubig", "drought", "watering"],
        answer: "See the water management guides in the library for irrigation \
            scheduling. During dry spells, alternate wetting and drying saves \
            water without hurting rice yields.",
    },
    IntentRule {
        topic: "training",
        keywords: &["training", "seminar", "activity", "register", "schedule", "event"],
        answer: "Upcoming training activities are listed on the Activities page. \
            Open an activity and press Register to reserve a slot; slots are \
            confirmed immediately while capacity remains.",
    },
    IntentRule {
        topic: "library",
        keywords: &["library", "download", "video", "pdf", "material", "content"],
        answer: "The content library holds PDFs, videos, and audio guides. Use \
            the kind filter to narrow results, and the download button on any \
            item to save it for offline use.",
    },
];

/// Match a question against the rule table.
///
/// Returns the rule with the most keyword hits, or `None` when nothing
/// matches. Matching is case-insensitive on whole substrings, so multi-word
/// keywords like "stem borer" work.
pub fn match_intent(question: &str) -> Option<&'static IntentRule> {
    let normalized = question.to_lowercase();

    let mut best: Option<(&'static IntentRule, usize)> = None;
    for rule in RULES {
        let score = rule
            .keywords
            .iter()
            .filter(|kw| normalized.contains(*kw))
            .count();
        if score == 0 {
            continue;
        }
        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((rule, score)),
        }
    }
    best.map(|(rule, _)| rule)
}
