use crate::models::connection_types::ConnectionState;
use crate::services::api_service::ApiService;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// `tokio::time::interval` rejects a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

struct Shared {
    api: ApiService,
    state: watch::Sender<ConnectionState>,
    generation: AtomicU64,
}

impl Shared {
    async fn check(&self) -> ConnectionState {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.is_checking = true;
            state.error = None;
        });

        let health = self.api.health_check().await;

        let applied = self.state.send_if_modified(|state| {
            // A newer check started while this one was in flight; its result wins.
            if self.generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            if state.is_connected != health.is_healthy {
                if health.is_healthy {
                    info!("Backend connection established");
                } else {
                    warn!("Backend connection lost: {}", health.message);
                }
            }
            state.is_connected = health.is_healthy;
            state.is_checking = false;
            state.error = (!health.is_healthy).then(|| health.message.clone());
            true
        });
        if !applied {
            debug!("Discarded stale health check #{}", ticket);
        }

        self.state.borrow().clone()
    }
}

/// Owns the session's belief about backend reachability.
///
/// One check runs when the monitor starts. After that the backend is
/// re-checked every poll interval, but only while connected: a backend that
/// never came up stays disconnected until someone calls
/// [`retry_connection`](Self::retry_connection).
pub struct ConnectionMonitor {
    shared: Arc<Shared>,
    poll_interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectionMonitor {
    pub fn new(api: ApiService, poll_interval: Duration) -> Self {
        if poll_interval < MIN_POLL_INTERVAL {
            warn!(
                "Poll interval {:?} is too short, using {:?}",
                poll_interval, MIN_POLL_INTERVAL
            );
        }
        let (state, _) = watch::channel(ConnectionState::default());
        Self {
            shared: Arc::new(Shared {
                api,
                state,
                generation: AtomicU64::new(0),
            }),
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
            task: Mutex::new(None),
        }
    }

    /// Spawns the polling task on the current Tokio runtime. Calling it again
    /// while the task is alive does nothing.
    pub fn start(&self) {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        let shared = self.shared.clone();
        let period = self.poll_interval;
        *task = Some(tokio::spawn(async move {
            shared.check().await;

            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let connected = shared.state.borrow().is_connected;
                if connected {
                    shared.check().await;
                }
            }
        }));
    }

    pub fn shutdown(&self) {
        if let Some(handle) = self.task.lock().unwrap_or_else(PoisonError::into_inner).take() {
            handle.abort();
            debug!("Connection monitor stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub async fn check_connection(&self) -> ConnectionState {
        self.shared.check().await
    }

    pub async fn retry_connection(&self) -> ConnectionState {
        info!("Retrying backend connection");
        self.shared.check().await
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.state.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.shared.state.borrow().is_connected
    }

    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state.subscribe()
    }

    pub fn api(&self) -> &ApiService {
        &self.shared.api
    }
}

impl Drop for ConnectionMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
