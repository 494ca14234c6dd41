//! AI log detail derivation.
//!
//! [`enrich`] is pure: the same log and collection always produce the same
//! detail, and nothing it computes is written back to the store.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::core::RecordId;
use crate::models::{AiLog, LogLevel};
use crate::table::format::truncate_chars;

/// At most this many related events are attached to a detail.
pub const MAX_RELATED_EVENTS: usize = 3;

/// Related-event messages are cut to this many characters.
pub const RELATED_MESSAGE_CHARS: usize = 100;

const DETAIL_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2a9e_4b7d_4e08_9c53_d41a_7be2_3f90);

const USER_AGENTS: &[&str] = &[
    concat!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 ",
        "(KHTML, like Gecko) Chrome/124.0 Safari/537.36"
    ),
    concat!(
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 ",
        "(KHTML, like Gecko) Version/17.4 Safari/605.1.15"
    ),
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "support-sdk-python/3.2.1",
    "support-sdk-node/5.0.4",
];

const API_VERSIONS: &[&str] = &["v1.4", "v2.0", "v2.1"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMetadata {
    pub request_id: String,
    pub session_id: String,
    pub ip_address: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualInfo {
    pub duration_ms: u64,
    pub response_time_ms: u64,
    pub bytes_processed: u64,
    pub api_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedEvent {
    #[serde(rename = "Id")]
    pub id: RecordId,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub log_level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiLogDetail {
    #[serde(flatten)]
    pub log: AiLog,
    pub metadata: LogMetadata,
    pub contextual_info: ContextualInfo,
    /// Present only for `Error` logs.
    pub stack_trace: Option<Vec<String>>,
    pub related_events: Vec<RelatedEvent>,
}

/// Build the detail view of `log` against the collection it lives in.
pub fn enrich(log: &AiLog, all_logs: &[AiLog]) -> AiLogDetail {
    let request = Uuid::new_v5(
        &DETAIL_NAMESPACE,
        format!("request/{}/{}", log.id, log.timestamp.to_rfc3339()).as_bytes(),
    );
    let seed = request.as_bytes();

    AiLogDetail {
        log: log.clone(),
        metadata: metadata(log, &request),
        contextual_info: contextual_info(seed),
        stack_trace: stack_trace(log, seed),
        related_events: related_events(log, all_logs),
    }
}

fn metadata(log: &AiLog, request: &Uuid) -> LogMetadata {
    // one session per user per day
    let session = Uuid::new_v5(
        &DETAIL_NAMESPACE,
        format!("session/{}/{}", log.user, log.timestamp.date_naive()).as_bytes(),
    );
    let seed = request.as_bytes();

    LogMetadata {
        request_id: format!("req_{}", request.simple()),
        session_id: format!("sess_{}", session.simple()),
        ip_address: format!("10.{}.{}.{}", seed[0], seed[1], seed[2].max(1)),
        user_agent: USER_AGENTS[usize::from(seed[3]) % USER_AGENTS.len()].to_string(),
    }
}

fn contextual_info(seed: &[u8; 16]) -> ContextualInfo {
    let duration_ms = 50 + u64::from(u16::from_be_bytes([seed[4], seed[5]])) % 2950;
    // response time is a share (40-89%) of the full duration
    let response_time_ms = duration_ms * (40 + u64::from(seed[6]) % 50) / 100;
    let bytes_processed =
        512 + u64::from(u32::from_be_bytes([seed[8], seed[9], seed[10], seed[11]])) % 1_048_576;

    ContextualInfo {
        duration_ms,
        response_time_ms,
        bytes_processed,
        api_version: API_VERSIONS[usize::from(seed[12]) % API_VERSIONS.len()].to_string(),
    }
}

fn stack_trace(log: &AiLog, seed: &[u8; 16]) -> Option<Vec<String>> {
    if log.log_level != LogLevel::Error {
        return None;
    }

    let event = snake_case(&log.event_type);
    let app = snake_case(&log.app);
    let line = |i: usize| 20 + u32::from(seed[13 + i]) * 3;

    Some(vec![
        format!("{}Error: {}", pascal_case(&log.event_type), log.message),
        format!("    at {app}::{event}::handle (src/{event}.rs:{})", line(0)),
        format!("    at {app}::pipeline::dispatch (src/pipeline.rs:{})", line(1)),
        format!("    at support_runtime::worker::run (src/worker.rs:{})", line(2)),
    ])
}

fn related_events(log: &AiLog, all_logs: &[AiLog]) -> Vec<RelatedEvent> {
    all_logs
        .iter()
        .filter(|other| other.id != log.id && (other.user == log.user || other.app == log.app))
        .take(MAX_RELATED_EVENTS)
        .map(|other| RelatedEvent {
            id: other.id,
            timestamp: other.timestamp,
            event_type: other.event_type.clone(),
            log_level: other.log_level.clone(),
            message: truncate_chars(&other.message, RELATED_MESSAGE_CHARS),
        })
        .collect()
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty())
}

fn snake_case(text: &str) -> String {
    let joined: Vec<String> = words(text).map(str::to_lowercase).collect();
    if joined.is_empty() {
        "unknown".to_string()
    } else {
        joined.join("_")
    }
}

fn pascal_case(text: &str) -> String {
    words(text)
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
