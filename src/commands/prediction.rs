use crate::error::AppError;
use crate::models::model_types::ModelsOutcome;
use crate::models::prediction_types::{
    Consensus, MultiModelPredictionResult, PredictionRequest, PredictionResult,
};
use crate::AppState;

const MIN_TEXT_LEN: usize = 5;

/// Checks a submission before it goes anywhere near the network and returns
/// the trimmed text.
pub fn validate_submission(text: &str, connected: bool) -> Result<&str, AppError> {
    if !connected {
        return Err("No server connection. Please check if backend is running.".into());
    }

    let text = text.trim();
    if text.is_empty() {
        return Err("Please enter some text to analyze".into());
    }
    if text.chars().count() < MIN_TEXT_LEN {
        return Err("Text is too short for accurate analysis".into());
    }
    Ok(text)
}

pub async fn predict(state: &AppState, text: String, model: String) -> Result<PredictionResult, AppError> {
    let text = validate_submission(&text, state.monitor.is_connected())?;
    let request = PredictionRequest::new(text, model);
    state.api.predict(&request).await
}

pub async fn predict_with_all_models(
    state: &AppState,
    text: String,
) -> Result<MultiModelPredictionResult, AppError> {
    let text = validate_submission(&text, state.monitor.is_connected())?;
    Ok(state.api.predict_with_all_models(text).await)
}

pub async fn get_available_models(state: &AppState) -> ModelsOutcome {
    state.api.get_available_models().await
}

pub async fn get_model_info(state: &AppState, model_id: String) -> Result<serde_json::Value, AppError> {
    state.api.get_model_info(&model_id).await
}

pub fn summarize_consensus(result: &MultiModelPredictionResult) -> Consensus {
    result.consensus()
}
