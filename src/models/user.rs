use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::core::{ConsoleError, EntityKind, RecordId, Value};
use crate::table::TableRow;

status_vocabulary! {
    /// Account status as the console shows it.
    UserStatus {
        Active => "Active",
        Inactive => "Inactive",
        Pending => "Pending",
        New => "New",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub registration_date: NaiveDate,
    pub last_activity: DateTime<Utc>,
    pub status: UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub registration_date: Option<NaiveDate>,
    pub last_activity: Option<DateTime<Utc>>,
    pub status: Option<UserStatus>,
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;
    type Draft = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    /// New users start `Pending`, registered today, active now.
    fn from_draft(id: RecordId, draft: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            registration_date: now.date_naive(),
            last_activity: now,
            status: UserStatus::Pending,
        }
    }

    fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(registration_date) = patch.registration_date {
            self.registration_date = registration_date;
        }
        if let Some(last_activity) = patch.last_activity {
            self.last_activity = last_activity;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

impl User {
    /// Text-search predicate: case-insensitive substring on name or email,
    /// plain substring on the stringified id. `needle` must already be
    /// trimmed and lowercased.
    pub(crate) fn matches_term(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.id.to_string().contains(needle)
    }
}

impl TableRow for User {
    fn row_id(&self) -> RecordId {
        self.id
    }

    fn cell(&self, key: &str) -> Option<Value> {
        Some(match key {
            "Id" => Value::Integer(self.id),
            "name" => Value::from(self.name.as_str()),
            "email" => Value::from(self.email.as_str()),
            "registrationDate" => Value::Date(self.registration_date),
            "lastActivity" => Value::Timestamp(self.last_activity),
            "status" => Value::from(self.status.as_str()),
            _ => return None,
        })
    }
}

/// Status restriction for user search. `All` is the "no restriction"
/// sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(UserStatus),
}

impl StatusFilter {
    pub const ALL_LABEL: &'static str = "All";

    pub fn admits(&self, status: &UserStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl From<UserStatus> for StatusFilter {
    fn from(status: UserStatus) -> Self {
        Self::Only(status)
    }
}

impl FromStr for StatusFilter {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::ALL_LABEL) {
            return Ok(Self::All);
        }
        s.parse::<UserStatus>().map(Self::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL_LABEL),
            Self::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}
