use crate::models::model_types::{CatalogueEntry, MlModel, ModelCatalogue, ModelKind, ModelsOutcome};
use crate::services::api_service::ApiService;
use tracing::warn;

const DEFAULT_PROCESSING_TIME_MS: u64 = 100;

/// Estimated per-model latency in milliseconds. Cosmetic, never measured.
const PROCESSING_TIMES: [(&str, u64); 6] = [
    ("svm", 50),
    ("xgboost", 85),
    ("catboost", 120),
    ("dl_cnn", 150),
    ("distilbert_v2", 150),
    ("roberta", 200),
];

pub fn processing_time_for(model_id: &str) -> u64 {
    PROCESSING_TIMES
        .iter()
        .find(|(id, _)| *id == model_id)
        .map(|(_, ms)| *ms)
        .unwrap_or(DEFAULT_PROCESSING_TIME_MS)
}

/// Used when `/models` can't be reached or comes back empty.
pub fn default_models() -> Vec<MlModel> {
    vec![
        MlModel {
            id: "svm".into(),
            name: "SVM (Support Vector Machine)".into(),
            description: "Fast, reliable baseline with character n-grams. Excellent for real-time classification with consistent performance.".into(),
            accuracy: 99.93,
            kind: ModelKind::Svm,
            features: features(&[
                "Character N-grams",
                "Text Length Analysis",
                "Special Character Detection",
                "Fast Processing",
            ]),
            processing_time: processing_time_for("svm"),
        },
        MlModel {
            id: "catboost".into(),
            name: "CatBoost (Gradient Boosting)".into(),
            description: "Advanced tree-based model with mixed features. Superior handling of complex patterns and edge cases.".into(),
            accuracy: 99.81,
            kind: ModelKind::Catboost,
            features: features(&[
                "Tree-based Learning",
                "Feature Engineering",
                "Pattern Recognition",
                "Edge Case Handling",
            ]),
            processing_time: processing_time_for("catboost"),
        },
        MlModel {
            id: "dl_cnn".into(),
            name: "DL CNN (PyTorch)".into(),
            description: "Deep learning CNN model with multiple convolutional layers and global max pooling for robust text features.".into(),
            accuracy: 95.8,
            kind: ModelKind::Torch,
            features: features(&[
                "Embedding + Conv1D stacks",
                "Global Max Pooling",
                "Dropout Regularization",
                "Good on complex spam patterns",
            ]),
            processing_time: processing_time_for("dl_cnn"),
        },
    ]
}

fn features(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Maps the backend catalogue into display records, keeping the backend's
/// key order. Entries that don't parse are skipped.
pub fn from_catalogue(catalogue: ModelCatalogue) -> Vec<MlModel> {
    catalogue
        .available_models
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value::<CatalogueEntry>(value) {
            Ok(entry) => Some(to_model(id, entry)),
            Err(e) => {
                warn!("Skipping catalogue entry '{}': {}", id, e);
                None
            }
        })
        .collect()
}

fn to_model(id: String, entry: CatalogueEntry) -> MlModel {
    let static_entry = default_models().into_iter().find(|m| m.id == id);

    MlModel {
        kind: ModelKind::from_model_id(&id),
        processing_time: processing_time_for(&id),
        description: entry
            .training_focus
            .or_else(|| static_entry.as_ref().map(|m| m.description.clone()))
            .unwrap_or_default(),
        features: static_entry.map(|m| m.features).unwrap_or_default(),
        name: entry.name,
        accuracy: entry.accuracy,
        id,
    }
}

/// The live catalogue when the backend has one, the static default otherwise.
pub async fn resolve(api: &ApiService) -> Vec<MlModel> {
    match api.get_available_models().await {
        ModelsOutcome::Success { models } if !models.is_empty() => models,
        ModelsOutcome::Success { .. } => {
            warn!("Backend returned an empty model catalogue, using defaults");
            default_models()
        }
        ModelsOutcome::Failure { message } => {
            warn!("Could not fetch model catalogue ({}), using defaults", message);
            default_models()
        }
    }
}
