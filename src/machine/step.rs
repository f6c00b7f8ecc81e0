//! Wizard step definitions
//!
//! Steps are the states of the workflow machine. Exactly one is active at
//! a time. Serialized names match the persisted snapshot format, so stored
//! progress from earlier deployments restores unchanged.

use serde::{Deserialize, Serialize};

/// One step of the service wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowStep {
    /// Fill the basic company form and submit
    FormEntry,
    /// Submission succeeded, waiting for a reviewer
    AwaitingReview,
    /// Reviewed; show the bill summary
    BillingSummary,
    /// Handed off to the external payment provider
    ExternalPayment,
    /// Payment succeeded
    PaymentSuccess,
    /// Enter the shipment address
    ShippingAddress,
    /// The service request is complete
    Completed,
}

impl WorkflowStep {
    /// All steps in declared wizard order
    pub const ALL: [WorkflowStep; 7] = [
        WorkflowStep::FormEntry,
        WorkflowStep::AwaitingReview,
        WorkflowStep::BillingSummary,
        WorkflowStep::ExternalPayment,
        WorkflowStep::PaymentSuccess,
        WorkflowStep::ShippingAddress,
        WorkflowStep::Completed,
    ];

    /// The step every fresh machine starts in
    pub const INITIAL: WorkflowStep = WorkflowStep::FormEntry;

    /// Name of this step as persisted in snapshots
    pub fn name(&self) -> &'static str {
        match self {
            Self::FormEntry => "formEntry",
            Self::AwaitingReview => "awaitingReview",
            Self::BillingSummary => "billingSummary",
            Self::ExternalPayment => "externalPayment",
            Self::PaymentSuccess => "paymentSuccess",
            Self::ShippingAddress => "shippingAddress",
            Self::Completed => "completed",
        }
    }

    /// Human-readable description of what this step represents
    pub fn description(&self) -> &'static str {
        match self {
            Self::FormEntry => "Fill basic form and submit",
            Self::AwaitingReview => "Show submit was successful, waiting for reviewer",
            Self::BillingSummary => "If reviewed, we show bill summary",
            Self::ExternalPayment => "Generate url from provider, user proceeds to pay",
            Self::PaymentSuccess => "Show payment succeeded",
            Self::ShippingAddress => "Enter shipment address",
            Self::Completed => "Service is complete",
        }
    }

    /// Ordinal position in the declared step sequence
    ///
    /// Used for progress display only; has no effect on transition logic.
    pub fn step_index(&self) -> usize {
        match self {
            Self::FormEntry => 0,
            Self::AwaitingReview => 1,
            Self::BillingSummary => 2,
            Self::ExternalPayment => 3,
            Self::PaymentSuccess => 4,
            Self::ShippingAddress => 5,
            Self::Completed => 6,
        }
    }
}
