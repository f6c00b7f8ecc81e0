//! Workflow event definitions
//!
//! Events are what the UI and the external payment callback send into the
//! machine. The serialized form matches the `{type, validStep?}` shape the
//! event-source collaborator produces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An event sent into the workflow machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkflowEvent {
    /// Advance to the next step; carries the UI's validity signal
    #[serde(rename = "NEXT")]
    Next {
        /// Whether the current step's form passed validation.
        /// Absent in the wire form means not validated.
        #[serde(rename = "validStep", default)]
        valid_step: bool,
    },
    /// Go back one step
    #[serde(rename = "PREVIOUS")]
    Previous,
    /// Callback from the external payment provider: payment went through
    #[serde(rename = "PAYMENT_SUCCEEDED")]
    PaymentSucceeded,
    /// Callback from the external payment provider: payment failed
    #[serde(rename = "PAYMENT_FAILED")]
    PaymentFailed,
}

impl WorkflowEvent {
    /// The payload-free discriminant of this event
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Next { .. } => EventKind::Next,
            Self::Previous => EventKind::Previous,
            Self::PaymentSucceeded => EventKind::PaymentSucceeded,
            Self::PaymentFailed => EventKind::PaymentFailed,
        }
    }
}

/// Event type without its payload
///
/// Used by `can_send` capability checks: the UI asks whether an event kind
/// has any transition from the current step before rendering the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A `NEXT` event
    Next,
    /// A `PREVIOUS` event
    Previous,
    /// A `PAYMENT_SUCCEEDED` event
    PaymentSucceeded,
    /// A `PAYMENT_FAILED` event
    PaymentFailed,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Next => "NEXT",
            Self::Previous => "PREVIOUS",
            Self::PaymentSucceeded => "PAYMENT_SUCCEEDED",
            Self::PaymentFailed => "PAYMENT_FAILED",
        };
        write!(f, "{name}")
    }
}
