use std::sync::Mutex;

use crate::notification::{Notification, NotificationSurface, Severity};

/// Keeps every notification so tests can inspect them.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSurface {
    pub(crate) fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("Could not lock notifications")
            .clone()
    }
}

impl NotificationSurface for RecordingSurface {
    fn notify(&self, message: &str, severity: Severity) {
        self.notifications
            .lock()
            .expect("Could not lock notifications")
            .push(Notification::new(message, severity));
    }
}
