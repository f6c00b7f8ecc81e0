//! The declared transition table
//!
//! Each step owns an ordered list of transition candidates. When an event
//! arrives, candidates for its kind are evaluated in declared order and the
//! first whose guard passes (or which has no guard) is taken - that is the
//! tie-break rule. A candidate may target its own step, which models the
//! "invalid submission, stay here" self-transition.

use crate::machine::context::WorkflowContext;
use crate::machine::event::EventKind;
use crate::machine::guard::Guard;
use crate::machine::step::WorkflowStep;

/// A context mutation applied as part of taking a transition
///
/// Actions are the only code that mutates the context (guards are pure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Record that the entry form passed validation
    MarkFormValid,
    /// Record that the submission passed review
    MarkReviewed,
    /// Record that the external payment went through
    MarkPaymentCompleted,
    /// Clear the payment flag after a failed external payment
    ResetPaymentCompleted,
    /// Record the shipping address and mark the whole request complete
    MarkShippingComplete,
}

impl Action {
    /// Apply this action to the context
    pub(crate) fn apply(&self, context: &mut WorkflowContext) {
        match self {
            Action::MarkFormValid => context.mark_form_valid(),
            Action::MarkReviewed => context.mark_reviewed(),
            Action::MarkPaymentCompleted => context.set_payment_completed(true),
            Action::ResetPaymentCompleted => context.set_payment_completed(false),
            Action::MarkShippingComplete => context.mark_shipping_complete(),
        }
    }
}

/// One transition candidate in the declared table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Event kind this candidate responds to
    pub on: EventKind,
    /// Guard that must pass for the candidate to be taken; `None` means
    /// unconditional
    pub guard: Option<Guard>,
    /// Step the machine moves to when the candidate is taken
    pub target: WorkflowStep,
    /// Context mutation applied when the candidate is taken
    pub action: Option<Action>,
}

const FORM_ENTRY: &[Transition] = &[
    Transition {
        on: EventKind::Next,
        guard: Some(Guard::ValidStep),
        target: WorkflowStep::AwaitingReview,
        action: Some(Action::MarkFormValid),
    },
    // Form wasn't valid, user stays on the step
    Transition {
        on: EventKind::Next,
        guard: None,
        target: WorkflowStep::FormEntry,
        action: None,
    },
];

const AWAITING_REVIEW: &[Transition] = &[
    Transition {
        on: EventKind::Next,
        guard: Some(Guard::ValidStep),
        target: WorkflowStep::BillingSummary,
        action: Some(Action::MarkReviewed),
    },
    Transition {
        on: EventKind::Next,
        guard: None,
        target: WorkflowStep::AwaitingReview,
        action: None,
    },
];

const BILLING_SUMMARY: &[Transition] = &[
    // A previously paid request skips the external provider
    Transition {
        on: EventKind::Next,
        guard: Some(Guard::PaymentCompletedInContext),
        target: WorkflowStep::PaymentSuccess,
        action: None,
    },
    Transition {
        on: EventKind::Next,
        guard: None,
        target: WorkflowStep::ExternalPayment,
        action: None,
    },
    Transition {
        on: EventKind::Previous,
        guard: None,
        target: WorkflowStep::AwaitingReview,
        action: None,
    },
];

const EXTERNAL_PAYMENT: &[Transition] = &[
    Transition {
        on: EventKind::PaymentSucceeded,
        guard: None,
        target: WorkflowStep::PaymentSuccess,
        action: Some(Action::MarkPaymentCompleted),
    },
    Transition {
        on: EventKind::PaymentFailed,
        guard: None,
        target: WorkflowStep::BillingSummary,
        action: Some(Action::ResetPaymentCompleted),
    },
];

const PAYMENT_SUCCESS: &[Transition] = &[
    Transition {
        on: EventKind::Next,
        guard: None,
        target: WorkflowStep::ShippingAddress,
        action: None,
    },
    Transition {
        on: EventKind::Previous,
        guard: None,
        target: WorkflowStep::BillingSummary,
        action: None,
    },
];

const SHIPPING_ADDRESS: &[Transition] = &[
    Transition {
        on: EventKind::Next,
        guard: Some(Guard::ValidStep),
        target: WorkflowStep::Completed,
        action: Some(Action::MarkShippingComplete),
    },
    Transition {
        on: EventKind::Next,
        guard: None,
        target: WorkflowStep::ShippingAddress,
        action: None,
    },
    Transition {
        on: EventKind::Previous,
        guard: None,
        target: WorkflowStep::PaymentSuccess,
        action: None,
    },
];

// Completion is not a lock: PREVIOUS re-enters the flow at the bill summary.
const COMPLETED: &[Transition] = &[Transition {
    on: EventKind::Previous,
    guard: None,
    target: WorkflowStep::BillingSummary,
    action: None,
}];

/// The ordered transition candidates declared for a step
pub fn candidates(step: WorkflowStep) -> &'static [Transition] {
    match step {
        WorkflowStep::FormEntry => FORM_ENTRY,
        WorkflowStep::AwaitingReview => AWAITING_REVIEW,
        WorkflowStep::BillingSummary => BILLING_SUMMARY,
        WorkflowStep::ExternalPayment => EXTERNAL_PAYMENT,
        WorkflowStep::PaymentSuccess => PAYMENT_SUCCESS,
        WorkflowStep::ShippingAddress => SHIPPING_ADDRESS,
        WorkflowStep::Completed => COMPLETED,
    }
}
