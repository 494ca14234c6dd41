use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::core::{EntityKind, RecordId, Value};
use crate::table::TableRow;

status_vocabulary! {
    AppStatus {
        Active => "Active",
        Inactive => "Inactive",
        Development => "Development",
        Maintenance => "Maintenance",
    }
}

pub const MAX_PERFORMANCE_SCORE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub app_name: String,
    pub created_date: NaiveDate,
    pub status: AppStatus,
    pub total_users: u64,
    pub performance_score: u8,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApp {
    pub app_name: String,
    pub performance_score: u8,
    /// Defaults to the creation instant.
    pub last_updated: Option<DateTime<Utc>>,
}

impl NewApp {
    pub fn new(app_name: impl Into<String>, performance_score: u8) -> Self {
        Self {
            app_name: app_name.into(),
            performance_score,
            last_updated: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPatch {
    pub app_name: Option<String>,
    pub created_date: Option<NaiveDate>,
    pub status: Option<AppStatus>,
    pub total_users: Option<u64>,
    pub performance_score: Option<u8>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl Entity for App {
    const KIND: EntityKind = EntityKind::App;
    type Draft = NewApp;
    type Patch = AppPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    /// New apps start in `Development` with no users.
    fn from_draft(id: RecordId, draft: NewApp, now: DateTime<Utc>) -> Self {
        Self {
            id,
            app_name: draft.app_name,
            created_date: now.date_naive(),
            status: AppStatus::Development,
            total_users: 0,
            performance_score: draft.performance_score.min(MAX_PERFORMANCE_SCORE),
            last_updated: draft.last_updated.unwrap_or(now),
        }
    }

    fn apply_patch(&mut self, patch: AppPatch) {
        if let Some(app_name) = patch.app_name {
            self.app_name = app_name;
        }
        if let Some(created_date) = patch.created_date {
            self.created_date = created_date;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(total_users) = patch.total_users {
            self.total_users = total_users;
        }
        if let Some(score) = patch.performance_score {
            self.performance_score = score.min(MAX_PERFORMANCE_SCORE);
        }
        if let Some(last_updated) = patch.last_updated {
            self.last_updated = last_updated;
        }
    }
}

impl TableRow for App {
    fn row_id(&self) -> RecordId {
        self.id
    }

    fn cell(&self, key: &str) -> Option<Value> {
        Some(match key {
            "Id" => Value::Integer(self.id),
            "appName" => Value::from(self.app_name.as_str()),
            "createdDate" => Value::Date(self.created_date),
            "status" => Value::from(self.status.as_str()),
            "totalUsers" => Value::from(self.total_users),
            "performanceScore" => Value::Integer(i64::from(self.performance_score)),
            "lastUpdated" => Value::Timestamp(self.last_updated),
            _ => return None,
        })
    }
}

/// Colour band for a performance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            85.. => Self::Good,
            70..=84 => Self::Fair,
            _ => Self::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_draft_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap();
        let app = App::from_draft(3, NewApp::new("Ticket Triage", 120), now);

        assert_eq!(app.status, AppStatus::Development);
        assert_eq!(app.total_users, 0);
        assert_eq!(app.created_date, NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
        assert_eq!(app.last_updated, now);
        assert_eq!(app.performance_score, MAX_PERFORMANCE_SCORE);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(85), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(84), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(70), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_score(69), ScoreBand::Poor);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Poor);
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("maintenance".parse::<AppStatus>().unwrap(), AppStatus::Maintenance);
        assert_eq!(
            "retired".parse::<AppStatus>().unwrap(),
            AppStatus::Other("retired".into())
        );
        assert!("".parse::<AppStatus>().is_err());
    }
}
