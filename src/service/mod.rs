//! Entity services: one per collection, each owning its store.
//!
//! Every operation waits out a simulated round trip before touching the
//! store, so callers always cross an `.await`.

pub mod ai_log;
pub mod app;
pub mod enrich;
pub mod repository;
pub mod user;

pub use ai_log::AiLogService;
pub use app::AppService;
pub use enrich::{AiLogDetail, ContextualInfo, LogMetadata, RelatedEvent, enrich};
pub use repository::Repository;
pub use user::UserService;

use std::time::Duration;

use async_trait::async_trait;

use crate::core::{ConsoleError, EntityKind, RecordId, Result, coerce_id};

/// The CRUD contract shared by every entity service.
#[async_trait]
pub trait EntityService: Send + Sync {
    type Record: Send;
    /// What `get_by_id` yields; the plain record except for AI logs.
    type Detail: Send;
    type Draft: Send;
    type Patch: Send;

    fn kind(&self) -> EntityKind;

    async fn get_all(&self) -> Vec<Self::Record>;

    async fn get_by_id(&self, id: RecordId) -> Result<Self::Detail>;

    async fn create(&self, draft: Self::Draft) -> Self::Record;

    async fn update(&self, id: RecordId, patch: Self::Patch) -> Result<Self::Record>;

    async fn delete(&self, id: RecordId) -> Result<Self::Record>;

    /// `get_by_id` for an identifier as the presentation layer holds it.
    async fn get_by_raw_id(&self, raw: &str) -> Result<Self::Detail> {
        match coerce_id(raw) {
            Some(id) => self.get_by_id(id).await,
            None => {
                tokio::task::yield_now().await;
                Err(ConsoleError::not_found(self.kind(), raw))
            }
        }
    }
}

/// Wait out a simulated round trip. A zero delay still yields once.
pub(crate) async fn simulate_latency(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}
