use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::core::{EntityKind, RecordId, Value};
use crate::table::TableRow;

status_vocabulary! {
    /// Severity of an AI event. Tallies count only the known levels.
    LogLevel {
        Error => "Error",
        Warning => "Warning",
        Info => "Info",
        Debug => "Debug",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiLog {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub app: String,
    pub event_type: String,
    pub log_level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAiLog {
    pub user: String,
    pub app: String,
    pub event_type: String,
    pub log_level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiLogPatch {
    pub timestamp: Option<DateTime<Utc>>,
    pub user: Option<String>,
    pub app: Option<String>,
    pub event_type: Option<String>,
    pub log_level: Option<LogLevel>,
    pub message: Option<String>,
}

impl Entity for AiLog {
    const KIND: EntityKind = EntityKind::AiLog;
    type Draft = NewAiLog;
    type Patch = AiLogPatch;

    fn id(&self) -> RecordId {
        self.id
    }

    /// Logs are stamped with the creation instant.
    fn from_draft(id: RecordId, draft: NewAiLog, now: DateTime<Utc>) -> Self {
        Self {
            id,
            timestamp: now,
            user: draft.user,
            app: draft.app,
            event_type: draft.event_type,
            log_level: draft.log_level,
            message: draft.message,
        }
    }

    fn apply_patch(&mut self, patch: AiLogPatch) {
        if let Some(timestamp) = patch.timestamp {
            self.timestamp = timestamp;
        }
        if let Some(user) = patch.user {
            self.user = user;
        }
        if let Some(app) = patch.app {
            self.app = app;
        }
        if let Some(event_type) = patch.event_type {
            self.event_type = event_type;
        }
        if let Some(log_level) = patch.log_level {
            self.log_level = log_level;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
    }
}

impl TableRow for AiLog {
    fn row_id(&self) -> RecordId {
        self.id
    }

    fn cell(&self, key: &str) -> Option<Value> {
        Some(match key {
            "Id" => Value::Integer(self.id),
            "timestamp" => Value::Timestamp(self.timestamp),
            "user" => Value::from(self.user.as_str()),
            "app" => Value::from(self.app.as_str()),
            "eventType" => Value::from(self.event_type.as_str()),
            "logLevel" => Value::from(self.log_level.as_str()),
            "message" => Value::from(self.message.as_str()),
            _ => return None,
        })
    }
}
