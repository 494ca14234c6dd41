//! Recommended imports grouped by abstraction level.
//!
//! `pages` is the default for presentation code driving page controllers.
//! `services` is the lower layer for code that talks to the stores directly.

pub mod pages {
    //! Page controllers and the table surface they render through.
    pub use crate::controller::{
        AiLogsPage, AppsPage, DashboardPage, EmptyState, PageState, StatusButton, UsersPage,
    };
    pub use crate::table::{Column, RenderedTable, SortDirection, SortableTable, TableRow};
    pub use crate::{Console, ConsoleConfig};
}

pub mod services {
    //! Entity services and their record types.
    pub use crate::core::{ConsoleError, RecordId, Result};
    pub use crate::models::{
        AiLog, AiLogPatch, App, AppPatch, AppStatus, LogLevel, NewAiLog, NewApp, NewUser,
        StatusFilter, User, UserPatch, UserStatus,
    };
    pub use crate::service::{AiLogDetail, AiLogService, AppService, EntityService, UserService};
}
