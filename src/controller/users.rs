use std::sync::Arc;

use tokio::sync::RwLock;

use super::{EmptyState, PageSlot, PageState, RequestToken};
use crate::core::Result;
use crate::models::{StatusFilter, User, UserStatus};
use crate::service::UserService;
use crate::table::{Column, SortableTable, format};

pub const EMPTY: EmptyState = EmptyState {
    title: "No users found",
    description: "Try adjusting your search or filter criteria.",
};

/// Filter buttons in display order; only `All` shows a count.
fn status_button_filters() -> [StatusFilter; 4] {
    [
        StatusFilter::All,
        StatusFilter::Only(UserStatus::Active),
        StatusFilter::Only(UserStatus::Inactive),
        StatusFilter::Only(UserStatus::New),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct UserQuery {
    term: String,
    filter: StatusFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusButton {
    pub filter: StatusFilter,
    pub count: Option<usize>,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsersSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub pending: usize,
    pub new: usize,
}

impl UsersSummary {
    pub fn of(users: &[User]) -> Self {
        let count = |status: UserStatus| users.iter().filter(|u| u.status == status).count();
        Self {
            total: users.len(),
            active: count(UserStatus::Active),
            inactive: count(UserStatus::Inactive),
            pending: count(UserStatus::Pending),
            new: count(UserStatus::New),
        }
    }
}

/// Users screen: re-fetches through `search` whenever the term or the
/// status filter changes.
pub struct UsersPage {
    service: Arc<UserService>,
    slot: PageSlot<Vec<User>>,
    query: RwLock<UserQuery>,
}

impl UsersPage {
    pub fn new(service: Arc<UserService>) -> Self {
        Self {
            service,
            slot: PageSlot::new(),
            query: RwLock::new(UserQuery::default()),
        }
    }

    /// Fetch under the current query. Returns whether this response landed.
    pub async fn load(&self) -> bool {
        let (query, token) = {
            let query = self.query.read().await;
            (query.clone(), self.slot.begin().await)
        };
        self.fetch(query, token).await
    }

    pub async fn retry(&self) -> bool {
        self.load().await
    }

    pub async fn set_search_term(&self, term: impl Into<String>) -> bool {
        let (query, token) = {
            let mut query = self.query.write().await;
            query.term = term.into();
            (query.clone(), self.slot.begin().await)
        };
        self.fetch(query, token).await
    }

    pub async fn set_status_filter(&self, filter: StatusFilter) -> bool {
        let (query, token) = {
            let mut query = self.query.write().await;
            query.filter = filter;
            (query.clone(), self.slot.begin().await)
        };
        self.fetch(query, token).await
    }

    // Tokens are issued while the query lock is held, so the newest token
    // always carries the newest query.
    async fn fetch(&self, query: UserQuery, token: RequestToken) -> bool {
        let users = self.service.search(&query.term, query.filter).await;
        self.slot.complete(token, Ok(users)).await
    }

    pub async fn search_term(&self) -> String {
        self.query.read().await.term.clone()
    }

    pub async fn status_filter(&self) -> StatusFilter {
        self.query.read().await.filter.clone()
    }

    pub async fn state(&self) -> PageState<Vec<User>> {
        self.slot.state().await
    }

    pub async fn summary(&self) -> Option<UsersSummary> {
        self.slot.state().await.ready().map(|users| UsersSummary::of(users))
    }

    /// Ready with nothing to show.
    pub async fn is_empty(&self) -> bool {
        self.slot.state().await.ready().is_some_and(Vec::is_empty)
    }

    pub async fn status_buttons(&self) -> Vec<StatusButton> {
        let loaded = self.slot.state().await.ready().map(Vec::len);
        let selected = self.status_filter().await;
        status_button_filters()
            .into_iter()
            .map(|filter| StatusButton {
                count: if filter == StatusFilter::All { loaded } else { None },
                selected: filter == selected,
                filter,
            })
            .collect()
    }

    pub fn columns() -> Vec<Column<User>> {
        vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("registrationDate", "Registration Date")
                .render_with(|value, _: &User| format::long_date(value)),
            Column::new("lastActivity", "Last Activity")
                .render_with(|value, _: &User| format::date_time(value)),
            Column::new("status", "Status"),
        ]
    }

    pub fn table() -> Result<SortableTable<User>> {
        SortableTable::new(Self::columns())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyProfile;
    use crate::core::FixedClock;
    use crate::models::{NewUser, UserStatus};
    use crate::service::EntityService;
    use crate::storage::{FixtureSet, RecordTable};
    use chrono::{TimeZone, Utc};

    fn page() -> UsersPage {
        let fixtures = FixtureSet::bundled().unwrap();
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap()));
        let table = RecordTable::from_rows(fixtures.users).unwrap();
        UsersPage::new(Arc::new(UserService::new(table, LatencyProfile::instant(), clock)))
    }

    #[tokio::test]
    async fn test_starts_loading_then_ready() {
        let page = page();
        assert!(page.state().await.is_loading());
        assert!(page.load().await);
        let users = page.state().await.ready().cloned().unwrap();
        assert_eq!(users.len(), 8);
        assert_eq!(page.summary().await.unwrap().total, 8);
    }

    #[tokio::test]
    async fn test_filter_change_refetches() {
        let page = page();
        page.load().await;
        page.set_status_filter(StatusFilter::Only(UserStatus::Active)).await;

        let users = page.state().await.ready().cloned().unwrap();
        assert!(!users.is_empty());
        assert!(users.iter().all(|u| u.status == UserStatus::Active));

        let buttons = page.status_buttons().await;
        assert_eq!(buttons[0].filter, StatusFilter::All);
        assert_eq!(buttons[0].count, Some(users.len()));
        assert!(buttons[1].selected);
        assert!(buttons[1..].iter().all(|b| b.count.is_none()));
    }

    #[tokio::test]
    async fn test_search_with_no_match_is_empty() {
        let page = page();
        page.set_search_term("zz-no-such-user").await;
        assert!(page.is_empty().await);
        assert_eq!(EMPTY.title, "No users found");
    }

    #[tokio::test]
    async fn test_new_user_visible_after_reload() {
        let page = page();
        page.load().await;
        let created = page.service.create(NewUser::new("Quinn Harper", "quinn@example.com")).await;
        page.set_search_term("quinn").await;
        let users = page.state().await.ready().cloned().unwrap();
        assert_eq!(users, vec![created]);
    }

    #[test]
    fn test_table_columns() {
        let table = UsersPage::table().unwrap();
        let keys: Vec<&str> = table.columns().iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec!["name", "email", "registrationDate", "lastActivity", "status"]);
        assert!(!table.is_sortable());
    }
}
