//! Persisted request records
//!
//! A `RequestRecord` is the durable side of a session: request identity,
//! the per-step form field values the user has entered so far, and the
//! last captured workflow snapshot. Records are created when a user starts
//! a new request and updated after every successful transition; this crate
//! never deletes them.

use crate::identifiers::RequestId;
use crate::machine::{WorkflowSnapshot, WorkflowStep};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field values collected for one wizard step
pub type StepFields = serde_json::Map<String, serde_json::Value>;

/// Durable record of one service request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Identity of the request
    pub id: RequestId,
    /// Which service this request was opened for
    pub service_tag: String,
    /// Human-readable description of the request
    pub description: String,
    /// Form field values keyed by the step they were submitted from
    step_fields: HashMap<WorkflowStep, StepFields>,
    /// Last captured workflow snapshot; `None` until the first persist
    pub snapshot: Option<WorkflowSnapshot>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl RequestRecord {
    /// Create an empty record for a new request
    pub fn new(service_tag: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: RequestId::new(),
            service_tag: service_tag.into(),
            description: description.into(),
            step_fields: HashMap::new(),
            snapshot: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Field values stored for a step, if any were submitted
    pub fn fields_for(&self, step: WorkflowStep) -> Option<&StepFields> {
        self.step_fields.get(&step)
    }

    /// Merge submitted field values into a step's storage
    ///
    /// Later values win over earlier ones key by key, so resubmitting a
    /// step after going back overwrites only the fields it carries.
    pub fn merge_fields(&mut self, step: WorkflowStep, values: StepFields) {
        self.step_fields.entry(step).or_default().extend(values);
    }

    /// Record a new snapshot and bump the modification stamp
    pub fn set_snapshot(&mut self, snapshot: WorkflowSnapshot) {
        self.snapshot = Some(snapshot);
        self.updated_at = Utc::now();
    }

    /// Ordinals of the steps already passed, for progress display only
    ///
    /// Derived from the snapshot: every step before the active one counts
    /// as completed, and a complete request marks all steps.
    pub fn completed_steps(&self) -> Vec<usize> {
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };

        if snapshot.context.is_request_complete() {
            return (0..WorkflowStep::ALL.len()).collect();
        }
        (0..snapshot.step.step_index()).collect()
    }
}
