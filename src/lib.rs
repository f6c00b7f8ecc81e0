//! # Service Wizard
//!
//! Core workflow components for multi-step service request wizards
//! (company registration, review, billing, payment, shipping, completion).
//!
//! This crate provides the two building blocks behind the wizard:
//! - **Workflow Machine**: a deterministic finite-state machine over the
//!   wizard steps, with guard-gated transitions and serializable snapshots
//! - **Session Controller**: binds one machine instance to one persisted
//!   request record and keeps the two synchronized across reloads
//!
//! ## Design Principles
//!
//! 1. **Pure guards**: guards are predicates over (context, event) and never
//!    mutate anything; all context mutation happens in transition actions
//! 2. **Closed enumerations**: steps, events, guards, and actions are enums,
//!    not strings, so an invalid reference is a compile error
//! 3. **Explicit ownership**: one machine instance per session, constructed
//!    or restored by the controller and passed explicitly - no globals
//! 4. **Durable snapshots**: the (step, context) snapshot is the sole
//!    representation of progress and round-trips exactly through serde
//! 5. **Storage as a seam**: persistence is an async key-value trait; the
//!    machine itself performs no I/O

#![warn(missing_docs)]

mod errors;
mod identifiers;
pub mod machine;
pub mod session;

// Re-export core types
pub use errors::{WizardError, WizardResult};
pub use identifiers::RequestId;
pub use machine::{
    Action, EventKind, Guard, SendOutcome, WorkflowContext, WorkflowEvent, WorkflowMachine,
    WorkflowSnapshot, WorkflowStep,
};
pub use session::{
    InMemoryRequestStore, RequestRecord, RequestStore, Session, SessionController, SnapshotObserver,
    StepFields, StepForm, SubmitOutcome,
};
