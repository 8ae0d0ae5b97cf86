use crate::models::connection_types::ConnectionState;
use crate::AppState;

pub fn get_connection_state(state: &AppState) -> ConnectionState {
    state.monitor.state()
}

pub async fn check_connection(state: &AppState) -> ConnectionState {
    state.monitor.check_connection().await
}

pub async fn retry_connection(state: &AppState) -> ConnectionState {
    state.monitor.retry_connection().await
}
