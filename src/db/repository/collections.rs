//! Collection ledger repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::{AccountId, CollectionEvent, NewCollectionEvent, WasteType};

/// Aggregate ledger statistics for the public stats endpoint.
#[derive(Debug, Clone, Default)]
pub struct CollectionStats {
    pub total_events: u64,
    pub total_weight_kg: f64,
}

/// Repository trait for the append-only waste-collection ledger.
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Append a collection event. Events are immutable once inserted.
    async fn insert_collection(
        &self,
        event: NewCollectionEvent,
    ) -> RepositoryResult<CollectionEvent>;

    /// Fetch an account's events of one waste category dated at or after
    /// `since`, ordered oldest first. Used by the trend-bonus computation.
    async fn collections_for_account_since(
        &self,
        account_id: AccountId,
        waste_type: WasteType,
        since: DateTime<Utc>,
    ) -> RepositoryResult<Vec<CollectionEvent>>;

    /// Aggregate statistics over the whole ledger.
    async fn collection_stats(&self) -> RepositoryResult<CollectionStats>;
}
