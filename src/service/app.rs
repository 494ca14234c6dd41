use std::sync::Arc;

use async_trait::async_trait;

use super::{EntityService, Repository};
use crate::config::LatencyProfile;
use crate::core::{Clock, EntityKind, RecordId, Result};
use crate::models::{App, AppPatch, NewApp};
use crate::storage::RecordTable;

pub struct AppService {
    repo: Repository<App>,
}

impl AppService {
    pub fn new(table: RecordTable<App>, latency: LatencyProfile, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo: Repository::new(table, latency, clock),
        }
    }
}

#[async_trait]
impl EntityService for AppService {
    type Record = App;
    type Detail = App;
    type Draft = NewApp;
    type Patch = AppPatch;

    fn kind(&self) -> EntityKind {
        EntityKind::App
    }

    async fn get_all(&self) -> Vec<App> {
        self.repo.get_all().await
    }

    async fn get_by_id(&self, id: RecordId) -> Result<App> {
        self.repo.get_by_id(id).await
    }

    async fn create(&self, draft: NewApp) -> App {
        self.repo.create(draft).await
    }

    async fn update(&self, id: RecordId, patch: AppPatch) -> Result<App> {
        self.repo.update(id, patch).await
    }

    async fn delete(&self, id: RecordId) -> Result<App> {
        self.repo.delete(id).await
    }
}
