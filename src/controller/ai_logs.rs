use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use tracing::{error, warn};

use super::{EmptyState, PageSlot, PageState, RequestSequencer, row_click_channel};
use crate::core::{RecordId, Result};
use crate::models::{AiLog, LogLevel};
use crate::service::{AiLogDetail, AiLogService, EntityService};
use crate::table::{Column, SortableTable, format};

pub const EMPTY: EmptyState = EmptyState {
    title: "No logs found",
    description: "AI events will be listed here as they are recorded.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogLevelTally {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl LogLevelTally {
    pub fn of(logs: &[AiLog]) -> Self {
        let count = |level: LogLevel| logs.iter().filter(|log| log.log_level == level).count();
        Self {
            total: logs.len(),
            errors: count(LogLevel::Error),
            warnings: count(LogLevel::Warning),
            info: count(LogLevel::Info),
        }
    }
}

/// Log list plus the detail view a row click opens.
pub struct AiLogsPage {
    service: Arc<AiLogService>,
    slot: PageSlot<Vec<AiLog>>,
    detail: RwLock<Option<AiLogDetail>>,
    detail_requests: RequestSequencer,
}

impl AiLogsPage {
    pub fn new(service: Arc<AiLogService>) -> Self {
        Self {
            service,
            slot: PageSlot::new(),
            detail: RwLock::new(None),
            detail_requests: RequestSequencer::new(),
        }
    }

    pub async fn load(&self) -> bool {
        let token = self.slot.begin().await;
        let logs = self.service.get_all().await;
        self.slot.complete(token, Ok(logs)).await
    }

    pub async fn retry(&self) -> bool {
        self.load().await
    }

    pub async fn state(&self) -> PageState<Vec<AiLog>> {
        self.slot.state().await
    }

    pub async fn is_empty(&self) -> bool {
        self.slot.state().await.ready().is_some_and(Vec::is_empty)
    }

    pub async fn tally(&self) -> Option<LogLevelTally> {
        self.slot.state().await.ready().map(|logs| LogLevelTally::of(logs))
    }

    /// Fetch the detail for `id` and show it.
    ///
    /// On failure the error is logged and returned, and whatever the view
    /// showed before stays as it was. `Ok(false)` means a later open or
    /// close superseded this one.
    pub async fn open_detail(&self, id: RecordId) -> Result<bool> {
        let token = self.detail_requests.issue();
        let detail = match self.service.get_by_id(id).await {
            Ok(detail) => detail,
            Err(err) => {
                error!(id, error = %err, "failed to fetch log details");
                return Err(err);
            }
        };

        let mut shown = self.detail.write().await;
        if !self.detail_requests.is_latest(token) {
            warn!(id, "discarding stale log detail");
            return Ok(false);
        }
        *shown = Some(detail);
        Ok(true)
    }

    /// Open the detail for the next queued row click, if any.
    pub async fn open_clicked(
        &self,
        clicks: &mut mpsc::UnboundedReceiver<RecordId>,
    ) -> Option<Result<bool>> {
        let id = clicks.try_recv().ok()?;
        Some(self.open_detail(id).await)
    }

    /// Hide the detail view. Any detail fetch still in flight is dropped.
    pub async fn close_detail(&self) {
        self.detail_requests.issue();
        *self.detail.write().await = None;
    }

    pub async fn detail(&self) -> Option<AiLogDetail> {
        self.detail.read().await.clone()
    }

    pub async fn is_detail_open(&self) -> bool {
        self.detail.read().await.is_some()
    }

    pub fn columns() -> Vec<Column<AiLog>> {
        vec![
            Column::new("timestamp", "Timestamp")
                .render_with(|value, _: &AiLog| format::log_time(value)),
            Column::new("user", "User"),
            Column::new("app", "App"),
            Column::new("eventType", "Event Type"),
            Column::new("logLevel", "Level"),
            Column::new("message", "Message"),
        ]
    }

    /// Sortable log table whose row clicks queue onto the returned receiver.
    pub fn table() -> Result<(SortableTable<AiLog>, mpsc::UnboundedReceiver<RecordId>)> {
        let (on_click, clicks) = row_click_channel();
        let table = SortableTable::new(Self::columns())?
            .sortable(true)
            .on_row_click(on_click);
        Ok((table, clicks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyProfile;
    use crate::core::{ConsoleError, FixedClock};
    use crate::storage::{FixtureSet, RecordTable};
    use chrono::Utc;
    use std::time::Duration;

    fn page() -> AiLogsPage {
        let table = RecordTable::from_rows(FixtureSet::bundled().unwrap().ai_logs).unwrap();
        let clock = Arc::new(FixedClock::new(Utc::now()));
        AiLogsPage::new(Arc::new(AiLogService::new(table, LatencyProfile::instant(), clock)))
    }

    #[tokio::test]
    async fn test_tally() {
        let page = page();
        page.load().await;
        let tally = page.tally().await.unwrap();
        assert_eq!(
            tally,
            LogLevelTally {
                total: 10,
                errors: 3,
                warnings: 2,
                info: 4,
            }
        );
    }

    #[tokio::test]
    async fn test_row_click_opens_detail() {
        let page = page();
        page.load().await;
        let logs = page.state().await.ready().cloned().unwrap();

        let (mut table, mut clicks) = AiLogsPage::table().unwrap();
        let rendered = table.render(&logs);
        assert!(table.click_row(rendered.rows[2].id));

        assert_eq!(page.open_clicked(&mut clicks).await, Some(Ok(true)));
        let detail = page.detail().await.unwrap();
        assert_eq!(detail.log.id, 3);
        assert!(detail.stack_trace.is_some());

        // nothing queued
        assert_eq!(page.open_clicked(&mut clicks).await, None);

        page.close_detail().await;
        assert!(!page.is_detail_open().await);
    }

    #[tokio::test]
    async fn test_failed_detail_leaves_view_closed() {
        let page = page();
        let err = page.open_detail(404).await.unwrap_err();
        assert_eq!(err, ConsoleError::not_found(crate::core::EntityKind::AiLog, 404));
        assert_eq!(err.to_string(), "AI Log not found");
        assert!(!page.is_detail_open().await);
    }

    #[tokio::test]
    async fn test_close_supersedes_inflight_detail() {
        let table = RecordTable::from_rows(FixtureSet::bundled().unwrap().ai_logs).unwrap();
        let slow_get = LatencyProfile {
            get: Duration::from_millis(100),
            ..LatencyProfile::instant()
        };
        let clock = Arc::new(FixedClock::new(Utc::now()));
        let page = Arc::new(AiLogsPage::new(Arc::new(AiLogService::new(table, slow_get, clock))));

        let opener = {
            let page = page.clone();
            tokio::spawn(async move { page.open_detail(1).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        page.close_detail().await;

        assert_eq!(opener.await.unwrap(), Ok(false));
        assert!(!page.is_detail_open().await);
    }

    #[tokio::test]
    async fn test_log_time_column() {
        let page = page();
        page.load().await;
        let logs = page.state().await.ready().cloned().unwrap();
        let (table, _clicks) = AiLogsPage::table().unwrap();
        assert_eq!(table.render(&logs).rows[0].cells[0], "Jun 18, 14:32:10");
    }
}
