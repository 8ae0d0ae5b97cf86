use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionState {
    pub is_connected: bool,
    pub is_checking: bool,
    pub error: Option<String>,
}

impl Default for ConnectionState {
    /// Sessions start out "checking" until the first health check lands.
    fn default() -> Self {
        Self {
            is_connected: false,
            is_checking: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub is_healthy: bool,
    pub message: String,
}
