use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::debug;

use super::simulate_latency;
use crate::config::LatencyProfile;
use crate::core::{Clock, ConsoleError, RecordId, Result};
use crate::models::Entity;
use crate::storage::RecordTable;

/// Latency-simulating CRUD over one [`RecordTable`].
///
/// Reads hand out clones; nothing returned aliases the stored rows. Writes
/// are last-writer-wins.
pub struct Repository<E: Entity> {
    table: RwLock<RecordTable<E>>,
    latency: LatencyProfile,
    clock: Arc<dyn Clock>,
}

impl<E: Entity> Repository<E> {
    pub fn new(table: RecordTable<E>, latency: LatencyProfile, clock: Arc<dyn Clock>) -> Self {
        Self {
            table: RwLock::new(table),
            latency,
            clock,
        }
    }

    pub fn latency(&self) -> &LatencyProfile {
        &self.latency
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, RecordTable<E>> {
        self.table.read().await
    }

    pub async fn get_all(&self) -> Vec<E> {
        simulate_latency(self.latency.list).await;
        let table = self.table.read().await;
        debug!(kind = %E::KIND, rows = table.len(), "get_all");
        table.rows().to_vec()
    }

    pub async fn get_by_id(&self, id: RecordId) -> Result<E> {
        simulate_latency(self.latency.get).await;
        let table = self.table.read().await;
        debug!(kind = %E::KIND, id, "get_by_id");
        table
            .get(id)
            .cloned()
            .ok_or_else(|| ConsoleError::not_found(E::KIND, id))
    }

    pub async fn create(&self, draft: E::Draft) -> E {
        simulate_latency(self.latency.create).await;
        let now = self.clock.now();
        let mut table = self.table.write().await;
        let created = table.insert_with(|id| E::from_draft(id, draft, now)).clone();
        debug!(kind = %E::KIND, id = created.id(), "create");
        created
    }

    pub async fn update(&self, id: RecordId, patch: E::Patch) -> Result<E> {
        simulate_latency(self.latency.update).await;
        let mut table = self.table.write().await;
        let record = table
            .get_mut(id)
            .ok_or_else(|| ConsoleError::not_found(E::KIND, id))?;
        record.apply_patch(patch);
        debug!(kind = %E::KIND, id, "update");
        Ok(record.clone())
    }

    pub async fn delete(&self, id: RecordId) -> Result<E> {
        simulate_latency(self.latency.delete).await;
        let mut table = self.table.write().await;
        let removed = table
            .remove(id)
            .ok_or_else(|| ConsoleError::not_found(E::KIND, id))?;
        debug!(kind = %E::KIND, id, "delete");
        Ok(removed)
    }
}
