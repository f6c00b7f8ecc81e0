//! Request record persistence
//!
//! The store is an opaque key-value collaborator keyed by request
//! identifier. The controller treats it as awaitable and requires only
//! that it round-trips a `WorkflowSnapshot` exactly. `update` takes the
//! step marker, merged field values, and snapshot together so a conforming
//! backend writes them as one unit - a resumed state must never diverge
//! from the stored form data.

use crate::errors::{WizardError, WizardResult};
use crate::identifiers::RequestId;
use crate::machine::{WorkflowSnapshot, WorkflowStep};
use crate::session::record::{RequestRecord, StepFields};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Key-value persistence collaborator for request records
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Create and persist an empty record for a new request
    async fn create(&self, service_tag: &str, description: &str) -> WizardResult<RequestRecord>;

    /// Look up a record by request identifier
    async fn get(&self, id: &RequestId) -> WizardResult<Option<RequestRecord>>;

    /// Persist the outcome of one transition: merge `values` into the
    /// record's storage for `step` (when present) and replace the snapshot,
    /// as a single write
    async fn update(
        &self,
        id: &RequestId,
        step: WorkflowStep,
        values: Option<StepFields>,
        snapshot: WorkflowSnapshot,
    ) -> WizardResult<()>;
}

/// In-process store backed by a `HashMap` under an async `RwLock`
///
/// The shipped backend for tests and single-process hosts; a remote
/// key-value backend plugs in behind the same trait.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    records: RwLock<HashMap<RequestId, RequestRecord>>,
}

impl InMemoryRequestStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn create(&self, service_tag: &str, description: &str) -> WizardResult<RequestRecord> {
        let record = RequestRecord::new(service_tag, description);
        debug!(request_id = %record.id, service_tag, "created request record");

        self.records.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: &RequestId) -> WizardResult<Option<RequestRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        id: &RequestId,
        step: WorkflowStep,
        values: Option<StepFields>,
        snapshot: WorkflowSnapshot,
    ) -> WizardResult<()> {
        // One write lock for the whole update keeps field merge and
        // snapshot replacement atomic from the caller's point of view.
        let mut records = self.records.write().await;
        let record = records
            .get_mut(id)
            .ok_or_else(|| WizardError::RecordNotFound(id.to_string()))?;

        if let Some(values) = values {
            record.merge_fields(step, values);
        }
        record.set_snapshot(snapshot);

        debug!(request_id = %id, step = step.name(), "persisted record update");
        Ok(())
    }
}
