use crate::models::prediction_types::FeatureSummary;
use regex::Regex;
use std::sync::LazyLock;

pub const SPAM_KEYWORDS: [&str; 6] = ["free", "win", "prize", "urgent", "call now", "congratulations"];

const CURRENCY_SYMBOLS: [char; 3] = ['$', '£', '€'];

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://|www\.").expect("valid url pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{10,}").expect("valid phone pattern"));
static SHORTCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\b)[0-9]{4,6}(?-u:\b)").expect("valid shortcode pattern"));

pub fn extract_features(text: &str) -> FeatureSummary {
    let lowered = text.to_lowercase();

    FeatureSummary {
        has_currency: flag(text.contains(CURRENCY_SYMBOLS)),
        has_url: flag(URL_RE.is_match(text)),
        has_phone: flag(PHONE_RE.is_match(text)),
        has_shortcode: flag(SHORTCODE_RE.is_match(text)),
        exclamation_count: text.matches('!').count(),
        spam_word_count: SPAM_KEYWORDS
            .iter()
            .filter(|word| lowered.contains(*word))
            .count(),
    }
}

fn flag(present: bool) -> u8 {
    u8::from(present)
}
