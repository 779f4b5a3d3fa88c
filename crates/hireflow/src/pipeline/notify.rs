use std::sync::{Arc, Mutex};

use super::transition::StageChangeNotice;

/// Outbound hook for move notices (toasts in the dashboard, logs or queues elsewhere).
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: StageChangeNotice) -> Result<(), NotificationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Sink that keeps every notice in memory. It never drains, so it suits tests and the scripted
/// demo rather than a long-running service.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNotifications {
    events: Arc<Mutex<Vec<StageChangeNotice>>>,
}

impl InMemoryNotifications {
    pub fn events(&self) -> Vec<StageChangeNotice> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl NotificationSink for InMemoryNotifications {
    fn notify(&self, notice: StageChangeNotice) -> Result<(), NotificationError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| NotificationError::Transport("notification mutex poisoned".to_string()))?;
        guard.push(notice);
        Ok(())
    }
}

/// Sink that logs each notice and keeps nothing, used by the API server.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifications;

impl NotificationSink for TracingNotifications {
    fn notify(&self, notice: StageChangeNotice) -> Result<(), NotificationError> {
        tracing::info!(candidate_id = %notice.candidate_id, "{}", notice.message());
        Ok(())
    }
}
