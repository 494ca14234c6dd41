use std::sync::Arc;

use super::{EmptyState, PageSlot, PageState};
use crate::core::{Result, Value};
use crate::models::{App, ScoreBand};
use crate::service::{AppService, EntityService};
use crate::table::{Column, SortableTable, format};

pub const EMPTY: EmptyState = EmptyState {
    title: "No applications found",
    description: "Applications will appear here once they are registered.",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppsSummary {
    pub app_count: usize,
    pub total_users: u64,
}

impl AppsSummary {
    pub fn of(apps: &[App]) -> Self {
        Self {
            app_count: apps.len(),
            total_users: apps.iter().map(|app| app.total_users).sum(),
        }
    }
}

pub struct AppsPage {
    service: Arc<AppService>,
    slot: PageSlot<Vec<App>>,
}

impl AppsPage {
    pub fn new(service: Arc<AppService>) -> Self {
        Self {
            service,
            slot: PageSlot::new(),
        }
    }

    pub async fn load(&self) -> bool {
        let token = self.slot.begin().await;
        let apps = self.service.get_all().await;
        self.slot.complete(token, Ok(apps)).await
    }

    pub async fn retry(&self) -> bool {
        self.load().await
    }

    pub async fn state(&self) -> PageState<Vec<App>> {
        self.slot.state().await
    }

    pub async fn is_empty(&self) -> bool {
        self.slot.state().await.ready().is_some_and(Vec::is_empty)
    }

    pub async fn summary(&self) -> Option<AppsSummary> {
        self.slot.state().await.ready().map(|apps| AppsSummary::of(apps))
    }

    pub fn columns() -> Vec<Column<App>> {
        vec![
            Column::new("appName", "App Name"),
            Column::new("createdDate", "Created")
                .render_with(|value, _: &App| format::long_date(value)),
            Column::new("status", "Status"),
            Column::new("totalUsers", "Total Users")
                .render_with(|value, _: &App| format::thousands(value)),
            Column::new("performanceScore", "Performance").render_with(score_cell),
            Column::new("lastUpdated", "Last Updated")
                .render_with(|value, _: &App| format::date_time(value)),
        ]
    }

    pub fn table() -> Result<SortableTable<App>> {
        SortableTable::new(Self::columns())
    }
}

/// "92% (good)"
pub fn score_cell(_: &Value, app: &App) -> String {
    format!(
        "{}% ({})",
        app.performance_score,
        ScoreBand::for_score(app.performance_score).label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyProfile;
    use crate::core::FixedClock;
    use crate::storage::{FixtureSet, RecordTable};
    use chrono::Utc;

    fn page(apps: Vec<App>) -> AppsPage {
        let table = RecordTable::from_rows(apps).unwrap();
        let clock = Arc::new(FixedClock::new(Utc::now()));
        AppsPage::new(Arc::new(AppService::new(table, LatencyProfile::instant(), clock)))
    }

    #[tokio::test]
    async fn test_summary_over_loaded_set() {
        let page = page(FixtureSet::bundled().unwrap().apps);
        assert_eq!(page.summary().await, None);

        page.load().await;
        let summary = page.summary().await.unwrap();
        assert_eq!(summary.app_count, 6);
        assert_eq!(summary.total_users, 39_771);
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let page = page(Vec::new());
        page.load().await;
        assert!(page.is_empty().await);
        assert_eq!(page.summary().await, Some(AppsSummary::default()));
    }

    #[tokio::test]
    async fn test_rendered_cells() {
        let page = page(FixtureSet::bundled().unwrap().apps);
        page.load().await;
        let apps = page.state().await.ready().cloned().unwrap();

        let rendered = AppsPage::table().unwrap().render(&apps);
        assert_eq!(
            rendered.rows[0].cells,
            vec![
                "Support Chat Assistant",
                "Aug 15, 2023",
                "Active",
                "15,420",
                "92% (good)",
                "Jun 18, 2024 10:30",
            ]
        );
        assert_eq!(rendered.rows[2].cells[4], "74% (fair)");
        assert_eq!(rendered.rows[4].cells[4], "63% (poor)");
    }
}
