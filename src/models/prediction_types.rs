use crate::error::{AppError, ErrorKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    /// Backend labels come back as `SPAM` / `HAM`. Anything else is a
    /// malformed payload.
    pub fn from_backend(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("spam") {
            Ok(Label::Spam)
        } else if raw.eq_ignore_ascii_case("ham") {
            Ok(Label::Ham)
        } else {
            Err(AppError::new(
                ErrorKind::Payload,
                format!("Unexpected prediction label '{}'", raw),
            ))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Spam => "spam",
            Label::Ham => "ham",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub text: String,
    pub model: String,
}

impl PredictionRequest {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
        }
    }
}

/// Client-side scan of the raw text, shown under a result. Not used for any
/// decision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub has_currency: u8,
    pub has_url: u8,
    pub has_phone: u8,
    pub has_shortcode: u8,
    pub exclamation_count: usize,
    pub spam_word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Label,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_detected: Option<FeatureSummary>,
    /// Milliseconds, estimated from the model table rather than measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPredictionResult {
    pub model_id: String,
    pub model_name: String,
    pub model_accuracy: f64,
    #[serde(flatten)]
    pub result: PredictionResult,
    /// Set when the call failed and `result` is the zero-confidence placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModelPredictionResult {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiModelPredictionResult {
    pub input_text: String,
    pub results: Vec<ModelPredictionResult>,
    /// Wall-clock milliseconds across the whole fan-out.
    pub total_processing_time: u64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl MultiModelPredictionResult {
    pub fn consensus(&self) -> Consensus {
        Consensus::from_results(&self.results)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consensus {
    pub spam_count: usize,
    pub ham_count: usize,
    pub overall: Label,
    pub percentage: u32,
}

impl Consensus {
    /// Majority vote; ties go to ham.
    pub fn from_results(results: &[ModelPredictionResult]) -> Self {
        let spam_count = results
            .iter()
            .filter(|r| r.result.prediction == Label::Spam)
            .count();
        let ham_count = results.len() - spam_count;
        let overall = if spam_count > ham_count {
            Label::Spam
        } else {
            Label::Ham
        };
        let percentage = if results.is_empty() {
            0
        } else {
            let share = spam_count.max(ham_count) as f64 / results.len() as f64;
            (share * 100.0).round() as u32
        };

        Consensus {
            spam_count,
            ham_count,
            overall,
            percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.9 {
            ConfidenceTier::High
        } else if confidence >= 0.7 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, prediction: Label) -> ModelPredictionResult {
        ModelPredictionResult {
            model_id: id.to_string(),
            model_name: id.to_uppercase(),
            model_accuracy: 99.0,
            result: PredictionResult {
                prediction,
                confidence: 0.8,
                processed_text: None,
                features_detected: None,
                processing_time: Some(50),
            },
            error: None,
        }
    }

    #[test]
    fn backend_labels_are_case_insensitive() {
        assert_eq!(Label::from_backend("SPAM").unwrap(), Label::Spam);
        assert_eq!(Label::from_backend("spam").unwrap(), Label::Spam);
        assert_eq!(Label::from_backend(" HAM ").unwrap(), Label::Ham);
    }

    #[test]
    fn unknown_backend_label_is_a_payload_error() {
        let err = Label::from_backend("MAYBE").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Payload);
        assert_eq!(err.message, "Unexpected prediction label 'MAYBE'");
    }

    #[test]
    fn consensus_majority_and_percentage() {
        let results = vec![
            entry("svm", Label::Spam),
            entry("catboost", Label::Spam),
            entry("dl_cnn", Label::Ham),
        ];
        let consensus = Consensus::from_results(&results);
        assert_eq!(consensus.spam_count, 2);
        assert_eq!(consensus.ham_count, 1);
        assert_eq!(consensus.overall, Label::Spam);
        assert_eq!(consensus.percentage, 67);
    }

    #[test]
    fn consensus_tie_goes_to_ham() {
        let results = vec![entry("svm", Label::Spam), entry("roberta", Label::Ham)];
        let consensus = Consensus::from_results(&results);
        assert_eq!(consensus.overall, Label::Ham);
        assert_eq!(consensus.percentage, 50);
    }

    #[test]
    fn consensus_of_nothing_is_zero() {
        let consensus = Consensus::from_results(&[]);
        assert_eq!(consensus.overall, Label::Ham);
        assert_eq!(consensus.percentage, 0);
    }

    #[test]
    fn model_result_serializes_flat_camel_case() {
        let json = serde_json::to_value(entry("svm", Label::Spam)).unwrap();
        assert_eq!(json["modelId"], "svm");
        assert_eq!(json["prediction"], "spam");
        assert_eq!(json["processing_time"], 50);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn confidence_tiers() {
        assert_eq!(ConfidenceTier::from_confidence(0.95), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(0.7), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_confidence(0.2), ConfidenceTier::Low);
    }
}
