//! Transition guards
//!
//! Guards are pure predicates over (context, event). They never mutate
//! either argument; context changes belong to transition actions. The
//! enumeration is closed and resolved at compile time, so a transition can
//! never reference a guard that does not exist.

use crate::machine::context::WorkflowContext;
use crate::machine::event::WorkflowEvent;

/// A named guard condition gating a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The triggering `NEXT` event carried `valid_step: true`
    ValidStep,
    /// The context already records a completed payment
    PaymentCompletedInContext,
}

impl Guard {
    /// Evaluate this guard against the current context and triggering event
    pub fn evaluate(&self, context: &WorkflowContext, event: &WorkflowEvent) -> bool {
        match self {
            Guard::ValidStep => matches!(event, WorkflowEvent::Next { valid_step: true }),
            Guard::PaymentCompletedInContext => context.is_payment_completed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_step_guard() {
        let ctx = WorkflowContext::new();

        assert!(Guard::ValidStep.evaluate(&ctx, &WorkflowEvent::Next { valid_step: true }));
        assert!(!Guard::ValidStep.evaluate(&ctx, &WorkflowEvent::Next { valid_step: false }));
        assert!(!Guard::ValidStep.evaluate(&ctx, &WorkflowEvent::Previous));
    }

    #[test]
    fn test_payment_completed_guard_reads_context_not_event() {
        let mut ctx = WorkflowContext::new();
        let next = WorkflowEvent::Next { valid_step: true };

        assert!(!Guard::PaymentCompletedInContext.evaluate(&ctx, &next));

        ctx.set_payment_completed(true);
        assert!(Guard::PaymentCompletedInContext.evaluate(&ctx, &next));
        // The event payload is irrelevant to this guard
        assert!(Guard::PaymentCompletedInContext.evaluate(&ctx, &WorkflowEvent::Previous));
    }

    #[test]
    fn test_guards_do_not_mutate() {
        let ctx = WorkflowContext::new();
        let before = ctx;
        let _ = Guard::ValidStep.evaluate(&ctx, &WorkflowEvent::Next { valid_step: true });
        let _ = Guard::PaymentCompletedInContext.evaluate(&ctx, &WorkflowEvent::Previous);
        assert_eq!(ctx, before);
    }
}
