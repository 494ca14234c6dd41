use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{EntityService, Repository, simulate_latency};
use crate::config::LatencyProfile;
use crate::core::{Clock, EntityKind, RecordId, Result};
use crate::models::{NewUser, StatusFilter, User, UserPatch};
use crate::storage::RecordTable;

pub struct UserService {
    repo: Repository<User>,
}

impl UserService {
    pub fn new(table: RecordTable<User>, latency: LatencyProfile, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo: Repository::new(table, latency, clock),
        }
    }

    /// Compound search over the whole collection, in store order.
    ///
    /// A blank `term` (after trimming) applies no text filter; otherwise a
    /// user is kept when the term is a case-insensitive substring of the
    /// name or email, or a substring of the stringified id. `filter`
    /// then narrows by exact status unless it is `All`.
    pub async fn search(&self, term: &str, filter: StatusFilter) -> Vec<User> {
        simulate_latency(self.repo.latency().search).await;
        let needle = term.trim().to_lowercase();
        let table = self.repo.read().await;

        let matched: Vec<User> = table
            .rows()
            .iter()
            .filter(|user| needle.is_empty() || user.matches_term(&needle))
            .filter(|user| filter.admits(&user.status))
            .cloned()
            .collect();

        debug!(term = %needle, filter = %filter, matched = matched.len(), "user search");
        matched
    }
}

#[async_trait]
impl EntityService for UserService {
    type Record = User;
    type Detail = User;
    type Draft = NewUser;
    type Patch = UserPatch;

    fn kind(&self) -> EntityKind {
        EntityKind::User
    }

    async fn get_all(&self) -> Vec<User> {
        self.repo.get_all().await
    }

    async fn get_by_id(&self, id: RecordId) -> Result<User> {
        self.repo.get_by_id(id).await
    }

    async fn create(&self, draft: NewUser) -> User {
        self.repo.create(draft).await
    }

    async fn update(&self, id: RecordId, patch: UserPatch) -> Result<User> {
        self.repo.update(id, patch).await
    }

    async fn delete(&self, id: RecordId) -> Result<User> {
        self.repo.delete(id).await
    }
}
