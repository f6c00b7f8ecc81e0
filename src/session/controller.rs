//! Session controller
//!
//! The controller owns the binding between a request record and its live
//! workflow machine. It never reaches for a machine through any ambient or
//! global accessor: `open_session` constructs or restores an instance and
//! hands it back inside an explicit `Session` handle, and every operation
//! takes that handle.

use crate::errors::{WizardError, WizardResult};
use crate::identifiers::RequestId;
use crate::machine::{
    EventKind, SendOutcome, WorkflowEvent, WorkflowMachine, WorkflowSnapshot, WorkflowStep,
};
use crate::session::record::StepFields;
use crate::session::store::RequestStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Callback invoked after every successfully persisted snapshot
///
/// Replaces the implicit re-render-on-change subscription of reactive UI
/// frameworks with an explicit registration; the crate itself depends on
/// no reactive machinery.
pub type SnapshotObserver = Arc<dyn Fn(RequestId, &WorkflowSnapshot) + Send + Sync>;

/// Externally validated form values for one step submission
///
/// Field validation is the UI collaborator's responsibility; the
/// controller only consumes the resulting validity signal. `issues` holds
/// whatever detail the collaborator produced for surfacing field errors.
#[derive(Debug, Clone, Default)]
pub struct StepForm {
    /// Whether the values passed the collaborator's validation
    pub valid: bool,
    /// The field values to merge into the record on success
    pub values: StepFields,
    /// Validation detail for the UI when `valid` is false
    pub issues: Vec<String>,
}

impl StepForm {
    /// A form that passed validation
    pub fn valid(values: StepFields) -> Self {
        Self {
            valid: true,
            values,
            issues: Vec::new(),
        }
    }

    /// A form that failed validation
    pub fn invalid(issues: Vec<String>) -> Self {
        Self {
            valid: false,
            values: StepFields::new(),
            issues,
        }
    }
}

/// Result of a successful step submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The wizard moved forward
    Advanced {
        /// Step the values were submitted from
        from: WorkflowStep,
        /// Step now active
        to: WorkflowStep,
    },
    /// The event was consumed but the wizard stayed on the same step
    Held {
        /// Step still active
        step: WorkflowStep,
    },
}

/// One request's live binding: identifier plus machine instance
///
/// Each request identifier owns an independent machine and record; there
/// is no shared mutable state between sessions.
#[derive(Debug)]
pub struct Session {
    request_id: RequestId,
    machine: WorkflowMachine,
}

impl Session {
    /// Identity of the request this session drives
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// The live machine, for read-only queries (`can_send`, `peek`,
    /// current step, context)
    pub fn machine(&self) -> &WorkflowMachine {
        &self.machine
    }

    /// The active step
    pub fn current_step(&self) -> WorkflowStep {
        self.machine.current_step()
    }

    /// Ordinal of the active step in the declared sequence, for progress
    /// display only
    pub fn step_index(&self) -> usize {
        self.machine.current_step().step_index()
    }

    /// Whether the given event kind is acceptable right now
    pub fn can_send(&self, kind: EventKind) -> bool {
        self.machine.can_send(kind)
    }
}

/// Creates and resumes sessions and keeps machine and record synchronized
pub struct SessionController<S: RequestStore> {
    store: Arc<S>,
    observers: Vec<SnapshotObserver>,
}

impl<S: RequestStore> SessionController<S> {
    /// Create a controller over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            observers: Vec::new(),
        }
    }

    /// Register a callback fired after every successfully persisted
    /// snapshot
    pub fn subscribe(&mut self, observer: SnapshotObserver) {
        self.observers.push(observer);
    }

    /// Open a session for an existing request, or start a new one
    ///
    /// With `None`, allocates a fresh record, builds a machine at the
    /// initial step, and persists the initial snapshot immediately. With
    /// an identifier, loads the record and restores the machine from its
    /// snapshot (or starts fresh when no snapshot was ever captured).
    /// Fails with `RecordNotFound` when the identifier resolves to no
    /// record; the caller decides whether to create a new request instead.
    pub async fn open_session(
        &self,
        request_id: Option<RequestId>,
        service_tag: &str,
        description: &str,
    ) -> WizardResult<Session> {
        match request_id {
            None => {
                let record = self.store.create(service_tag, description).await?;
                let machine = WorkflowMachine::new();
                let snapshot = machine.snapshot();

                self.store
                    .update(&record.id, machine.current_step(), None, snapshot)
                    .await?;
                self.notify(record.id, &snapshot);

                info!(request_id = %record.id, service_tag, "started new request session");
                Ok(Session {
                    request_id: record.id,
                    machine,
                })
            }
            Some(id) => {
                let record = self
                    .store
                    .get(&id)
                    .await?
                    .ok_or_else(|| WizardError::RecordNotFound(id.to_string()))?;

                let machine = match record.snapshot {
                    Some(snapshot) => WorkflowMachine::restore(snapshot),
                    None => WorkflowMachine::new(),
                };

                info!(
                    request_id = %id,
                    step = machine.current_step().name(),
                    "resumed request session"
                );
                Ok(Session {
                    request_id: id,
                    machine,
                })
            }
        }
    }

    /// Submit the active step's form values
    ///
    /// On validation failure nothing is sent and nothing is persisted; the
    /// error carries the collaborator's detail so the UI can surface field
    /// errors. On success a `NEXT { valid_step: true }` event drives the
    /// machine, the values are merged into the record's storage for the
    /// step they were submitted from, and record and snapshot are written
    /// in one store update.
    pub async fn submit_step(
        &self,
        session: &mut Session,
        form: StepForm,
    ) -> WizardResult<SubmitOutcome> {
        if !form.valid {
            debug!(
                request_id = %session.request_id,
                step = session.current_step().name(),
                "step submission failed validation"
            );
            return Err(WizardError::ValidationFailure(form.issues.join("; ")));
        }

        let from = session.current_step();
        let event = WorkflowEvent::Next { valid_step: true };
        let outcome = match session.machine.send(&event) {
            SendOutcome::NotApplicable => {
                return Err(WizardError::EventNotApplicable {
                    event: event.kind().to_string(),
                    step: from.name().to_string(),
                })
            }
            SendOutcome::Transitioned { from, to } => SubmitOutcome::Advanced { from, to },
            SendOutcome::Held => SubmitOutcome::Held { step: from },
        };

        let snapshot = session.machine.snapshot();
        self.store
            .update(&session.request_id, from, Some(form.values), snapshot)
            .await?;
        self.notify(session.request_id, &snapshot);

        Ok(outcome)
    }

    /// Go back one step and persist the resulting snapshot
    ///
    /// No form values are merged. Returns the step now active.
    pub async fn go_back(&self, session: &mut Session) -> WizardResult<WorkflowStep> {
        self.drive(session, WorkflowEvent::Previous).await
    }

    /// Apply the external payment provider's callback
    ///
    /// Sends `PAYMENT_SUCCEEDED` or `PAYMENT_FAILED` depending on
    /// `succeeded` and persists the resulting snapshot. Returns the step
    /// now active.
    pub async fn confirm_external_payment(
        &self,
        session: &mut Session,
        succeeded: bool,
    ) -> WizardResult<WorkflowStep> {
        let event = if succeeded {
            WorkflowEvent::PaymentSucceeded
        } else {
            WorkflowEvent::PaymentFailed
        };
        self.drive(session, event).await
    }

    /// Send an event without form values and persist on acceptance
    async fn drive(
        &self,
        session: &mut Session,
        event: WorkflowEvent,
    ) -> WizardResult<WorkflowStep> {
        let from = session.current_step();

        if session.machine.send(&event) == SendOutcome::NotApplicable {
            return Err(WizardError::EventNotApplicable {
                event: event.kind().to_string(),
                step: from.name().to_string(),
            });
        }

        let snapshot = session.machine.snapshot();
        self.store
            .update(&session.request_id, from, None, snapshot)
            .await?;
        self.notify(session.request_id, &snapshot);

        Ok(session.current_step())
    }

    fn notify(&self, request_id: RequestId, snapshot: &WorkflowSnapshot) {
        for observer in &self.observers {
            observer(request_id, snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::InMemoryRequestStore;
    use serde_json::json;

    fn controller() -> SessionController<InMemoryRequestStore> {
        SessionController::new(Arc::new(InMemoryRequestStore::new()))
    }

    fn form(pairs: &[(&str, serde_json::Value)]) -> StepForm {
        StepForm::valid(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_new_session_persists_initial_snapshot() {
        let controller = controller();
        let session = controller
            .open_session(None, "company-registration", "Acme LLC")
            .await
            .unwrap();

        assert_eq!(session.current_step(), WorkflowStep::FormEntry);
        assert_eq!(session.step_index(), 0);

        let record = controller
            .store
            .get(&session.request_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.snapshot, Some(WorkflowSnapshot::initial()));
    }

    #[tokio::test]
    async fn test_open_unknown_request_reports_not_found() {
        let controller = controller();
        let err = controller
            .open_session(Some(RequestId::new()), "company-registration", "")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_submission_sends_nothing_and_persists_nothing() {
        let controller = controller();
        let mut session = controller
            .open_session(None, "company-registration", "")
            .await
            .unwrap();

        let err = controller
            .submit_step(
                &mut session,
                StepForm::invalid(vec!["companyName is required".to_string()]),
            )
            .await
            .unwrap_err();

        assert!(err.is_validation_error());
        assert_eq!(session.current_step(), WorkflowStep::FormEntry);

        // The previously persisted snapshot is untouched
        let record = controller
            .store
            .get(&session.request_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.snapshot, Some(WorkflowSnapshot::initial()));
        assert!(record.fields_for(WorkflowStep::FormEntry).is_none());
    }

    #[tokio::test]
    async fn test_submit_step_advances_and_stores_fields_with_snapshot() {
        let controller = controller();
        let mut session = controller
            .open_session(None, "company-registration", "")
            .await
            .unwrap();

        let outcome = controller
            .submit_step(&mut session, form(&[("companyName", json!("Acme"))]))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Advanced {
                from: WorkflowStep::FormEntry,
                to: WorkflowStep::AwaitingReview,
            }
        );

        let record = controller
            .store
            .get(&session.request_id())
            .await
            .unwrap()
            .unwrap();
        let snapshot = record.snapshot.unwrap();
        assert_eq!(snapshot.step, WorkflowStep::AwaitingReview);
        assert!(snapshot.context.is_form_valid());
        assert_eq!(
            record.fields_for(WorkflowStep::FormEntry).unwrap()["companyName"],
            json!("Acme")
        );
    }

    #[tokio::test]
    async fn test_go_back_persists_without_field_merge() {
        let controller = controller();
        let mut session = controller
            .open_session(None, "company-registration", "")
            .await
            .unwrap();

        controller
            .submit_step(&mut session, form(&[]))
            .await
            .unwrap();
        controller
            .submit_step(&mut session, form(&[]))
            .await
            .unwrap();
        assert_eq!(session.current_step(), WorkflowStep::BillingSummary);

        let step = controller.go_back(&mut session).await.unwrap();
        assert_eq!(step, WorkflowStep::AwaitingReview);

        let record = controller
            .store
            .get(&session.request_id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.snapshot.unwrap().step, WorkflowStep::AwaitingReview);
    }

    #[tokio::test]
    async fn test_go_back_from_form_entry_is_not_applicable() {
        let controller = controller();
        let mut session = controller
            .open_session(None, "company-registration", "")
            .await
            .unwrap();

        assert!(!session.can_send(EventKind::Previous));
        let err = controller.go_back(&mut session).await.unwrap_err();
        assert!(err.is_not_applicable());
        assert_eq!(session.current_step(), WorkflowStep::FormEntry);
    }

    #[tokio::test]
    async fn test_payment_callback_routes_success_and_failure() {
        let controller = controller();
        let mut session = controller
            .open_session(None, "company-registration", "")
            .await
            .unwrap();

        // Drive to externalPayment
        controller
            .submit_step(&mut session, form(&[]))
            .await
            .unwrap();
        controller
            .submit_step(&mut session, form(&[]))
            .await
            .unwrap();
        controller
            .submit_step(&mut session, form(&[]))
            .await
            .unwrap();
        assert_eq!(session.current_step(), WorkflowStep::ExternalPayment);

        let step = controller
            .confirm_external_payment(&mut session, false)
            .await
            .unwrap();
        assert_eq!(step, WorkflowStep::BillingSummary);
        assert!(!session.machine().context().is_payment_completed());

        // Retry and succeed
        controller
            .submit_step(&mut session, form(&[]))
            .await
            .unwrap();
        let step = controller
            .confirm_external_payment(&mut session, true)
            .await
            .unwrap();
        assert_eq!(step, WorkflowStep::PaymentSuccess);
        assert!(session.machine().context().is_payment_completed());
    }

    #[tokio::test]
    async fn test_resumed_session_restores_snapshot_verbatim() {
        let store = Arc::new(InMemoryRequestStore::new());
        let controller = SessionController::new(store.clone());

        let mut session = controller
            .open_session(None, "company-registration", "")
            .await
            .unwrap();
        controller
            .submit_step(&mut session, form(&[("companyName", json!("Acme"))]))
            .await
            .unwrap();
        let id = session.request_id();
        let snapshot_before = session.machine().snapshot();
        drop(session);

        let resumed = controller
            .open_session(Some(id), "company-registration", "")
            .await
            .unwrap();
        assert_eq!(resumed.machine().snapshot(), snapshot_before);
        assert_eq!(resumed.current_step(), WorkflowStep::AwaitingReview);
    }

    #[tokio::test]
    async fn test_observers_fire_after_each_persist() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let mut controller = controller();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        controller.subscribe(Arc::new(move |_, _| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        let mut session = controller
            .open_session(None, "company-registration", "")
            .await
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1); // initial persist

        controller
            .submit_step(&mut session, form(&[]))
            .await
            .unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);

        // A rejected submission persists nothing and notifies nobody
        let _ = controller
            .submit_step(&mut session, StepForm::invalid(vec![]))
            .await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
