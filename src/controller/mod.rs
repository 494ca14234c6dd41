//! Page controllers: bridge a service to a table.
//!
//! Each page moves `Loading -> Ready` (or `Loading -> Failed`) per fetch.
//! Every fetch carries a [`RequestToken`]; only the latest issued token may
//! land, so a slow early response can never overwrite a newer one.

pub mod ai_logs;
pub mod apps;
pub mod dashboard;
pub mod users;

pub use ai_logs::{AiLogsPage, LogLevelTally};
pub use apps::{AppsPage, AppsSummary};
pub use dashboard::{DashboardPage, DashboardSummary, display_app_name};
pub use users::{StatusButton, UsersPage, UsersSummary};

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{RwLock, mpsc};
use tracing::warn;

use crate::core::{RecordId, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Ready(T),
    /// User-visible message; the page offers a retry that re-runs the read.
    Failed(String),
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Stamp carried by one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token newer than every token issued before it.
    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}

/// Page state guarded by a request sequencer.
#[derive(Debug)]
pub struct PageSlot<T> {
    state: RwLock<PageState<T>>,
    sequencer: RequestSequencer,
}

impl<T: Clone> PageSlot<T> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(PageState::Loading),
            sequencer: RequestSequencer::new(),
        }
    }

    /// Enter `Loading` and stamp a new fetch.
    pub async fn begin(&self) -> RequestToken {
        let token = self.sequencer.issue();
        *self.state.write().await = PageState::Loading;
        token
    }

    /// Land a fetch result. Returns `false` (and leaves the state alone)
    /// when a newer fetch has been issued since `token`.
    pub async fn complete(&self, token: RequestToken, result: Result<T>) -> bool {
        let mut state = self.state.write().await;
        if !self.sequencer.is_latest(token) {
            warn!(token = token.0, "discarding stale page response");
            return false;
        }
        *state = match result {
            Ok(data) => PageState::Ready(data),
            Err(err) => PageState::Failed(err.to_string()),
        };
        true
    }

    pub async fn state(&self) -> PageState<T> {
        self.state.read().await.clone()
    }
}

impl<T: Clone> Default for PageSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Title and description shown when a page loads an empty set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub description: &'static str,
}

/// A row-click handler for [`crate::table::SortableTable::on_row_click`]
/// that queues clicked ids for an async consumer.
pub fn row_click_channel() -> (
    impl FnMut(RecordId) + Send + 'static,
    mpsc::UnboundedReceiver<RecordId>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let handler = move |id: RecordId| {
        // a dropped receiver just means nobody is listening any more
        let _ = tx.send(id);
    };
    (handler, rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConsoleError, EntityKind};

    #[test]
    fn test_tokens_increase() {
        let seq = RequestSequencer::new();
        let a = seq.issue();
        let b = seq.issue();
        assert!(b > a);
        assert!(!seq.is_latest(a));
        assert!(seq.is_latest(b));
    }

    #[tokio::test]
    async fn test_slot_lifecycle() {
        let slot: PageSlot<Vec<u8>> = PageSlot::new();
        assert!(slot.state().await.is_loading());

        let token = slot.begin().await;
        assert!(slot.complete(token, Ok(vec![1, 2])).await);
        assert_eq!(slot.state().await.ready(), Some(&vec![1, 2]));
    }

    #[tokio::test]
    async fn test_slot_error_message() {
        let slot: PageSlot<Vec<u8>> = PageSlot::new();
        let token = slot.begin().await;
        slot.complete(token, Err(ConsoleError::not_found(EntityKind::User, 3)))
            .await;
        assert_eq!(slot.state().await.error(), Some("User not found"));
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let slot: PageSlot<&'static str> = PageSlot::new();
        let first = slot.begin().await;
        let second = slot.begin().await;

        assert!(slot.complete(second, Ok("fresh")).await);
        assert!(!slot.complete(first, Ok("stale")).await);
        assert_eq!(slot.state().await, PageState::Ready("fresh"));
    }

    #[tokio::test]
    async fn test_row_click_channel() {
        let (mut handler, mut rx) = row_click_channel();
        handler(4);
        handler(9);
        assert_eq!(rx.recv().await, Some(4));
        assert_eq!(rx.try_recv().ok(), Some(9));
    }
}
