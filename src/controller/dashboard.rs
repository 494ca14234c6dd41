use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use super::{EmptyState, PageSlot, PageState};
use crate::core::Result;
use crate::models::{App, AppStatus};
use crate::service::{AppService, EntityService};
use crate::table::{Column, SortableTable, format};

lazy_static! {
    static ref DASHBOARD_WORD: Regex = Regex::new(r"(?i)dashboard\s*").unwrap();
}

pub const EMPTY: EmptyState = EmptyState {
    title: "No dashboards yet",
    description: "Register an application to see it here.",
};

/// App name as the dashboard lists it: every "Dashboard" dropped, then
/// trimmed.
pub fn display_app_name(name: &str) -> String {
    DASHBOARD_WORD.replace_all(name, "").trim().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardSummary {
    pub total_apps: usize,
    pub total_users: u64,
    pub active_apps: usize,
}

impl DashboardSummary {
    pub fn of(apps: &[App]) -> Self {
        Self {
            total_apps: apps.len(),
            total_users: apps.iter().map(|app| app.total_users).sum(),
            active_apps: apps.iter().filter(|app| app.status == AppStatus::Active).count(),
        }
    }
}

/// Overview of every app. Names are cleaned for display on load; the
/// service's records are untouched.
pub struct DashboardPage {
    service: Arc<AppService>,
    slot: PageSlot<Vec<App>>,
}

impl DashboardPage {
    pub fn new(service: Arc<AppService>) -> Self {
        Self {
            service,
            slot: PageSlot::new(),
        }
    }

    pub async fn load(&self) -> bool {
        let token = self.slot.begin().await;
        let apps = self
            .service
            .get_all()
            .await
            .into_iter()
            .map(|mut app| {
                app.app_name = display_app_name(&app.app_name);
                app
            })
            .collect();
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

    pub async fn summary(&self) -> Option<DashboardSummary> {
        self.slot.state().await.ready().map(|apps| DashboardSummary::of(apps))
    }

    pub fn columns() -> Vec<Column<App>> {
        vec![
            Column::new("Id", "ID"),
            Column::new("appName", "Name"),
            Column::new("status", "Status"),
            Column::new("totalUsers", "Users")
                .render_with(|value, _: &App| format::thousands(value)),
            Column::new("performanceScore", "Score")
                .render_with(|value, _: &App| format!("{value}%")),
            Column::new("lastUpdated", "Updated")
                .render_with(|value, _: &App| format::date_at_time(value)),
        ]
    }

    pub fn table() -> Result<SortableTable<App>> {
        Ok(SortableTable::new(Self::columns())?.sortable(true))
    }
}
