//! Session Controller - binds a workflow machine to a persisted record
//!
//! A session is the pairing of one request identifier, its persisted
//! `RequestRecord`, and one live `WorkflowMachine` instance. The controller
//! creates or resumes that pairing, routes UI events into the machine, and
//! writes the resulting snapshot back to the store after every successful
//! transition.

pub mod controller;
pub mod record;
pub mod store;

pub use controller::{Session, SessionController, SnapshotObserver, StepForm, SubmitOutcome};
pub use record::{RequestRecord, StepFields};
pub use store::{InMemoryRequestStore, RequestStore};
