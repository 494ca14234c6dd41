use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{AiLogDetail, EntityService, Repository, enrich, simulate_latency};
use crate::config::LatencyProfile;
use crate::core::{Clock, ConsoleError, EntityKind, RecordId, Result};
use crate::models::{AiLog, AiLogPatch, NewAiLog};
use crate::storage::RecordTable;

pub struct AiLogService {
    repo: Repository<AiLog>,
}

impl AiLogService {
    pub fn new(table: RecordTable<AiLog>, latency: LatencyProfile, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo: Repository::new(table, latency, clock),
        }
    }

    /// The stored record alone, without detail enrichment.
    pub async fn get_record(&self, id: RecordId) -> Result<AiLog> {
        self.repo.get_by_id(id).await
    }
}

#[async_trait]
impl EntityService for AiLogService {
    type Record = AiLog;
    type Detail = AiLogDetail;
    type Draft = NewAiLog;
    type Patch = AiLogPatch;

    fn kind(&self) -> EntityKind {
        EntityKind::AiLog
    }

    async fn get_all(&self) -> Vec<AiLog> {
        self.repo.get_all().await
    }

    /// Detail view: recomputed from the current collection on every call.
    async fn get_by_id(&self, id: RecordId) -> Result<AiLogDetail> {
        simulate_latency(self.repo.latency().get).await;
        let table = self.repo.read().await;
        let log = table
            .get(id)
            .ok_or_else(|| ConsoleError::not_found(EntityKind::AiLog, id))?;
        let detail = enrich(log, table.rows());
        debug!(
            id,
            related = detail.related_events.len(),
            has_stack_trace = detail.stack_trace.is_some(),
            "ai log detail"
        );
        Ok(detail)
    }

    async fn create(&self, draft: NewAiLog) -> AiLog {
        self.repo.create(draft).await
    }

    async fn update(&self, id: RecordId, patch: AiLogPatch) -> Result<AiLog> {
        self.repo.update(id, patch).await
    }

    async fn delete(&self, id: RecordId) -> Result<AiLog> {
        self.repo.delete(id).await
    }
}
