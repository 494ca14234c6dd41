// ============================================================================
// Support Console Library
// ============================================================================

pub mod config;
pub mod controller;
pub mod core;
pub mod models;
pub mod service;
pub mod storage;
pub mod table;

pub mod prelude;

use std::sync::Arc;

use tracing::info;

pub use config::{ConsoleConfig, LatencyProfile};
pub use controller::{AiLogsPage, AppsPage, DashboardPage, PageState, UsersPage};
pub use core::{ConsoleError, EntityKind, RecordId, Result, Value};
pub use service::{AiLogService, AppService, EntityService, UserService};

use storage::{FixtureSet, RecordTable};

// ============================================================================
// High-level Console API
// ============================================================================

/// The three entity services, seeded and ready.
///
/// This is the entry point for embedding the console: open it once, then
/// hand its services to page controllers or call them directly.
///
/// # Examples
///
/// ```no_run
/// use support_console::{Console, ConsoleConfig, EntityService};
///
/// # async fn demo() -> support_console::Result<()> {
/// let console = Console::open(ConsoleConfig::instant())?;
///
/// let users = console.users().get_all().await;
/// println!("{} users", users.len());
///
/// let page = console.users_page();
/// page.set_search_term("example.com").await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Console {
    users: Arc<UserService>,
    apps: Arc<AppService>,
    ai_logs: Arc<AiLogService>,
}

impl Console {
    /// Seed every collection from the configured fixture source.
    ///
    /// An empty store wins over a fixture directory, which wins over the
    /// bundled set.
    pub fn open(config: ConsoleConfig) -> Result<Self> {
        let fixtures = if config.empty_store {
            FixtureSet::empty()
        } else if let Some(dir) = &config.fixtures_dir {
            FixtureSet::from_dir(dir)?
        } else {
            FixtureSet::bundled()?
        };
        Self::with_fixtures(config, fixtures)
    }

    /// Seed from an explicit fixture set; the config's fixture source is
    /// ignored.
    pub fn with_fixtures(config: ConsoleConfig, fixtures: FixtureSet) -> Result<Self> {
        info!(
            users = fixtures.users.len(),
            apps = fixtures.apps.len(),
            ai_logs = fixtures.ai_logs.len(),
            "seeding console store"
        );

        let users = RecordTable::from_rows(fixtures.users)?;
        let apps = RecordTable::from_rows(fixtures.apps)?;
        let ai_logs = RecordTable::from_rows(fixtures.ai_logs)?;

        Ok(Self {
            users: Arc::new(UserService::new(users, config.user_latency, config.clock.clone())),
            apps: Arc::new(AppService::new(apps, config.app_latency, config.clock.clone())),
            ai_logs: Arc::new(AiLogService::new(ai_logs, config.ai_log_latency, config.clock)),
        })
    }

    pub fn users(&self) -> &Arc<UserService> {
        &self.users
    }

    pub fn apps(&self) -> &Arc<AppService> {
        &self.apps
    }

    pub fn ai_logs(&self) -> &Arc<AiLogService> {
        &self.ai_logs
    }

    pub fn users_page(&self) -> UsersPage {
        UsersPage::new(self.users.clone())
    }

    pub fn apps_page(&self) -> AppsPage {
        AppsPage::new(self.apps.clone())
    }

    pub fn dashboard_page(&self) -> DashboardPage {
        DashboardPage::new(self.apps.clone())
    }

    pub fn ai_logs_page(&self) -> AiLogsPage {
        AiLogsPage::new(self.ai_logs.clone())
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
