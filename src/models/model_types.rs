use serde::{Deserialize, Serialize};
use serde_json::Map;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Svm,
    Catboost,
    Torch,
    Transformer,
    Other,
}

impl ModelKind {
    pub fn from_model_id(id: &str) -> Self {
        let id = id.to_ascii_lowercase();
        if id.starts_with("svm") {
            ModelKind::Svm
        } else if id.contains("boost") {
            ModelKind::Catboost
        } else if id.starts_with("dl_") || id.contains("cnn") || id.contains("lstm") {
            ModelKind::Torch
        } else if id.contains("bert") {
            ModelKind::Transformer
        } else {
            ModelKind::Other
        }
    }
}

/// Display metadata for one classifier the backend can run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MlModel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub accuracy: f64,
    #[serde(rename = "type")]
    pub kind: ModelKind,
    pub features: Vec<String>,
    pub processing_time: u64,
}

/// `GET /models` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelCatalogue {
    pub available_models: Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueEntry {
    pub name: String,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub training_focus: Option<String>,
}

/// `POST /predict` body.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendPrediction {
    pub prediction: String,
    pub confidence: f64,
    #[serde(default)]
    pub processed_text: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// FastAPI style `{ "detail": ... }` error body.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendErrorBody {
    pub detail: serde_json::Value,
}

impl BackendErrorBody {
    pub fn message(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ModelsOutcome {
    Success { models: Vec<MlModel> },
    Failure { message: String },
}

impl ModelsOutcome {
    pub fn models(&self) -> Option<&[MlModel]> {
        match self {
            ModelsOutcome::Success { models } => Some(models),
            ModelsOutcome::Failure { .. } => None,
        }
    }
}
