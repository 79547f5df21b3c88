//! Bounded, persisted list of completed conversions (newest first)

use super::cache::KeyValueCollection;
use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::debug;

/// Maximum number of entries kept; older ones are dropped on append.
pub const HISTORY_LIMIT: usize = 50;

pub const CLEAR_PROMPT: &str = "¿Eliminar historial de conversiones?";

const HISTORY_KEY: &[u8] = b"historial";

/// Receives the full history every time it changes.
pub trait HistoryView: Send + Sync {
    fn render(&self, entries: &[String]);
}

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct HistoryStore {
    collection: Arc<dyn KeyValueCollection>,
    view: Option<Box<dyn HistoryView>>,
}

impl HistoryStore {
    pub fn new(collection: Arc<dyn KeyValueCollection>) -> Self {
        Self {
            collection,
            view: None,
        }
    }

    pub fn with_view(mut self, view: Box<dyn HistoryView>) -> Self {
        self.view = Some(view);
        self
    }

    /// Stored entries; missing or unreadable data is an empty history.
    pub async fn entries(&self) -> Vec<String> {
        let Some(raw) = self.collection.get(HISTORY_KEY).await else {
            return Vec::new();
        };
        serde_json::from_slice(&raw).unwrap_or_else(|e| {
            debug!(error = %e, "Ignoring unreadable history");
            Vec::new()
        })
    }

    pub async fn load_and_render(&self) -> Vec<String> {
        let entries = self.entries().await;
        self.render(&entries);
        entries
    }

    pub async fn append(&self, line: &str) -> Vec<String> {
        self.append_at(line, Local::now()).await
    }

    pub async fn append_at(&self, line: &str, at: DateTime<Local>) -> Vec<String> {
        let mut entries = self.entries().await;
        entries.insert(0, format!("{} - {line}", stamp(&at)));
        entries.truncate(HISTORY_LIMIT);

        match serde_json::to_vec(&entries) {
            Ok(raw) => self.collection.put(HISTORY_KEY, &raw).await,
            Err(e) => debug!(error = %e, "Failed to serialize history"),
        }
        self.render(&entries);
        entries
    }

    /// Removes every entry if the user confirms. Returns whether anything was cleared.
    pub async fn clear(&self, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(CLEAR_PROMPT) {
            debug!("History clear declined");
            return false;
        }
        self.collection.remove(HISTORY_KEY).await;
        self.render(&[]);
        true
    }

    fn render(&self, entries: &[String]) {
        if let Some(view) = &self.view {
            view.render(entries);
        }
    }
}

/// Local date-time prefix of a history entry, e.g. `17-10-2026, 14:03:05`.
pub fn stamp(at: &DateTime<Local>) -> String {
    at.format("%d-%m-%Y, %H:%M:%S").to_string()
}
