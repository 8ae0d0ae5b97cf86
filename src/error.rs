use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// DNS, connect, timeout.
    Transport,
    /// Backend answered with a non-2xx status.
    Http,
    /// Body was not the JSON shape we expected.
    Payload,
    /// Rejected locally before any request was made.
    Validation,
}

#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        AppError {
            kind,
            message: message.into(),
        }
    }

    pub fn http(status: u16, detail: Option<String>) -> Self {
        AppError::new(
            ErrorKind::Http,
            detail.unwrap_or_else(|| format!("HTTP error! status: {}", status)),
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_decode() {
            ErrorKind::Payload
        } else if let Some(status) = err.status() {
            return AppError::http(status.as_u16(), None);
        } else {
            ErrorKind::Transport
        };
        AppError {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError {
            kind: ErrorKind::Payload,
            message: err.to_string(),
        }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError {
            kind: ErrorKind::Validation,
            message: msg,
        }
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError {
            kind: ErrorKind::Validation,
            message: msg.to_string(),
        }
    }
}
