//! Workflow execution context
//!
//! The context is a flat record of boolean completion flags. It is mutated
//! exclusively by transition actions; UI code only ever reads it. Flags are
//! monotonic within a forward pass - once a step is marked complete it is
//! not un-marked, except `is_payment_completed`, which the `PAYMENT_FAILED`
//! transition explicitly resets.

use serde::{Deserialize, Serialize};

/// Completion flags carried by a running workflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowContext {
    is_form_valid: bool,
    is_reviewed: bool,
    is_payment_completed: bool,
    is_shipping_valid: bool,
    is_request_complete: bool,
}

impl WorkflowContext {
    /// Create a fresh context with every flag cleared
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the entry form passed validation and was submitted
    pub fn is_form_valid(&self) -> bool {
        self.is_form_valid
    }

    /// Whether the submission passed review
    pub fn is_reviewed(&self) -> bool {
        self.is_reviewed
    }

    /// Whether the external payment went through
    pub fn is_payment_completed(&self) -> bool {
        self.is_payment_completed
    }

    /// Whether a valid shipping address was provided
    pub fn is_shipping_valid(&self) -> bool {
        self.is_shipping_valid
    }

    /// Whether the whole request is complete
    pub fn is_request_complete(&self) -> bool {
        self.is_request_complete
    }

    // Mutators are crate-visible: only transition actions call them.

    pub(crate) fn mark_form_valid(&mut self) {
        self.is_form_valid = true;
    }

    pub(crate) fn mark_reviewed(&mut self) {
        self.is_reviewed = true;
    }

    pub(crate) fn set_payment_completed(&mut self, completed: bool) {
        self.is_payment_completed = completed;
    }

    pub(crate) fn mark_shipping_complete(&mut self) {
        self.is_shipping_valid = true;
        self.is_request_complete = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_has_all_flags_cleared() {
        let ctx = WorkflowContext::new();
        assert!(!ctx.is_form_valid());
        assert!(!ctx.is_reviewed());
        assert!(!ctx.is_payment_completed());
        assert!(!ctx.is_shipping_valid());
        assert!(!ctx.is_request_complete());
    }

    #[test]
    fn test_shipping_completion_sets_both_flags() {
        let mut ctx = WorkflowContext::new();
        ctx.mark_shipping_complete();
        assert!(ctx.is_shipping_valid());
        assert!(ctx.is_request_complete());
    }

    #[test]
    fn test_context_serde_shape() {
        let mut ctx = WorkflowContext::new();
        ctx.mark_form_valid();

        let json = serde_json::to_value(ctx).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "isFormValid": true,
                "isReviewed": false,
                "isPaymentCompleted": false,
                "isShippingValid": false,
                "isRequestComplete": false,
            })
        );

        let back: WorkflowContext = serde_json::from_value(json).unwrap();
        assert_eq!(back, ctx);
    }
}
