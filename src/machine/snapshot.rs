//! Workflow snapshots
//!
//! A snapshot is the serializable (state, context) pair and the sole
//! durable representation of progress. Restoring a previously captured
//! snapshot reproduces identical state and context.

use crate::machine::context::WorkflowContext;
use crate::machine::step::WorkflowStep;
use serde::{Deserialize, Serialize};

/// Serializable capture of a workflow machine's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSnapshot {
    /// The active step, persisted under its declared state name
    #[serde(rename = "state")]
    pub step: WorkflowStep,
    /// The completion flags at the time of capture
    pub context: WorkflowContext,
}

impl WorkflowSnapshot {
    /// Snapshot of a machine that has not processed any event yet
    pub fn initial() -> Self {
        Self {
            step: WorkflowStep::INITIAL,
            context: WorkflowContext::new(),
        }
    }
}

impl Default for WorkflowSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}
