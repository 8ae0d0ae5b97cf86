use crate::config::{normalize_base_url, AppConfig};
use crate::error::{AppError, ErrorKind};
use crate::models::connection_types::HealthStatus;
use crate::models::model_types::{BackendErrorBody, BackendPrediction, MlModel, ModelCatalogue, ModelsOutcome};
use crate::models::prediction_types::{
    Label, ModelPredictionResult, MultiModelPredictionResult, PredictionRequest, PredictionResult,
};
use crate::services::features::extract_features;
use crate::services::registry;
use futures::future::join_all;
use serde::de::DeserializeOwned;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error - backend not accessible";
const HEALTHY_MESSAGE: &str = "Backend is healthy";

/// HTTP client for the classification backend. Cheap to clone; clones share
/// the connection pool and the base URL.
#[derive(Clone)]
pub struct ApiService {
    client: reqwest::Client,
    base_url: Arc<RwLock<String>>,
    health_timeout: Duration,
}

impl ApiService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::new(ErrorKind::Transport, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: Arc::new(RwLock::new(normalize_base_url(&config.base_url))),
            health_timeout: config.health_timeout,
        })
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_base_url(&self, url: &str) {
        let url = normalize_base_url(url);
        debug!("Backend base URL set to {}", url);
        *self.base_url.write().unwrap_or_else(PoisonError::into_inner) = url;
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub async fn health_check(&self) -> HealthStatus {
        let url = self.endpoint("/health");
        debug!("GET {}", url);

        match self.client.get(&url).timeout(self.health_timeout).send().await {
            Ok(response) if response.status().is_success() => HealthStatus {
                is_healthy: true,
                message: HEALTHY_MESSAGE.to_string(),
            },
            Ok(response) => {
                let status = response.status().as_u16();
                warn!("Health check failed: server returned {}", status);
                HealthStatus {
                    is_healthy: false,
                    message: format!("Server returned {}", status),
                }
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                HealthStatus {
                    is_healthy: false,
                    message: NETWORK_ERROR_MESSAGE.to_string(),
                }
            }
        }
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, AppError> {
        let url = self.endpoint("/predict");
        debug!("POST {} (model: {})", url, request.model);

        let response = self.client.post(&url).json(request).send().await?;
        let response = error_for_status(response).await?;

        let data: BackendPrediction = response.json().await.map_err(|e| {
            AppError::new(ErrorKind::Payload, format!("Malformed prediction response: {}", e))
        })?;

        Ok(PredictionResult {
            prediction: Label::from_backend(&data.prediction)?,
            confidence: data.confidence.clamp(0.0, 1.0),
            processed_text: data.processed_text,
            features_detected: Some(extract_features(&request.text)),
            processing_time: Some(registry::processing_time_for(&request.model)),
        })
    }

    /// Runs every registered model concurrently. Always returns one entry per
    /// model, in registry order.
    pub async fn predict_with_all_models(&self, text: &str) -> MultiModelPredictionResult {
        let models = registry::resolve(self).await;
        self.predict_with_models(text, &models).await
    }

    pub async fn predict_with_models(&self, text: &str, models: &[MlModel]) -> MultiModelPredictionResult {
        let started = Instant::now();

        let calls = models.iter().map(|model| async move {
            let request = PredictionRequest::new(text, model.id.as_str());
            match self.predict(&request).await {
                Ok(result) => ModelPredictionResult {
                    model_id: model.id.clone(),
                    model_name: model.name.clone(),
                    model_accuracy: model.accuracy,
                    result,
                    error: None,
                },
                Err(e) => {
                    warn!("Model {} failed, using fallback: {}", model.id, e);
                    fallback_result(model, e)
                }
            }
        });
        let results = join_all(calls).await;

        MultiModelPredictionResult {
            input_text: text.to_string(),
            results,
            total_processing_time: started.elapsed().as_millis() as u64,
            timestamp: now_millis(),
        }
    }

    pub async fn get_available_models(&self) -> ModelsOutcome {
        match self.get_json::<ModelCatalogue>("/models").await {
            Ok(catalogue) => ModelsOutcome::Success {
                models: registry::from_catalogue(catalogue),
            },
            Err(e) => {
                warn!("Models info error: {}", e);
                ModelsOutcome::Failure { message: e.message }
            }
        }
    }

    pub async fn get_model_info(&self, model_id: &str) -> Result<serde_json::Value, AppError> {
        let valid = !model_id.is_empty()
            && model_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(format!("Invalid model id '{}'", model_id).into());
        }
        self.get_json(&format!("/models/{}", model_id)).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.endpoint(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = error_for_status(response).await?;
        response.json().await.map_err(|e| {
            AppError::new(ErrorKind::Payload, format!("Malformed response from {}: {}", path, e))
        })
    }
}

/// Turns a non-2xx response into an error carrying the backend's `detail`
/// when it sent one.
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<BackendErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message());
    Err(AppError::http(status.as_u16(), detail))
}

fn fallback_result(model: &MlModel, err: AppError) -> ModelPredictionResult {
    ModelPredictionResult {
        model_id: model.id.clone(),
        model_name: model.name.clone(),
        model_accuracy: model.accuracy,
        result: PredictionResult {
            prediction: Label::Ham,
            confidence: 0.0,
            processed_text: None,
            features_detected: None,
            processing_time: None,
        },
        error: Some(err.message),
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
