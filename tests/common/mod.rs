#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Value};
use spam_lense_lib::AppConfig;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serves `app` on a random local port and returns its base URL.
pub async fn spawn_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A URL nothing is listening on.
pub async fn dead_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn config(url: &str) -> AppConfig {
    AppConfig::default()
        .with_base_url(url)
        .with_health_timeout(Duration::from_secs(2))
        .with_request_timeout(Duration::from_secs(5))
}

pub fn catalogue() -> Value {
    json!({
        "available_models": {
            "svm": { "name": "SVM", "accuracy": 99.93, "training_focus": "Character n-grams" },
            "xgboost": { "name": "XGBoost", "accuracy": 98.7 },
            "distilbert_v2": { "name": "DistilBERT v2", "accuracy": 99.1 },
            "roberta": { "name": "RoBERTa", "accuracy": 98.2 }
        }
    })
}
