//! Recording fakes for the presentation seams, shared by the crates' tests.

use std::sync::Mutex;

use crate::navigation::Navigator;
use crate::notification::{Notification, NotificationLevel, Notifier};

/// Keeps every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut notifications) = self.notifications.lock() {
            notifications.push(notification);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRecord {
    Replaced(String),
    Navigated(String),
}

/// Keeps every navigation request it receives.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    records: Mutex<Vec<NavigationRecord>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<NavigationRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Last URL passed to `replace_url`.
    pub fn current_url(&self) -> Option<String> {
        self.records().into_iter().rev().find_map(|r| match r {
            NavigationRecord::Replaced(url) => Some(url),
            NavigationRecord::Navigated(_) => None,
        })
    }

    pub fn navigated_to(&self, path: &str) -> bool {
        self.records()
            .iter()
            .any(|r| matches!(r, NavigationRecord::Navigated(p) if p == path))
    }
}

impl Navigator for RecordingNavigator {
    fn replace_url(&self, url: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(NavigationRecord::Replaced(url.to_string()));
        }
    }

    fn navigate(&self, path: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push(NavigationRecord::Navigated(path.to_string()));
        }
    }
}
