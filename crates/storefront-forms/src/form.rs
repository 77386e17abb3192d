//! # Form Controller
//!
//! Stateful form lifecycle: values, sync errors, debounced per-field async
//! validation, touched tracking and guarded submission.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Idle ──handle_change──► sync errors recomputed (immediately)         │
//! │    ▲                           │                                        │
//! │    │                           │ field has an async validator?          │
//! │    │                           ▼                                        │
//! │    │                 ValidatingAsync(field)                             │
//! │    │                   600ms quiet window, then validator runs          │
//! │    │                   superseded by a newer change ──► aborted         │
//! │    │                           │                                        │
//! │    │◄──── result applied ──────┘                                        │
//! │    │                                                                    │
//! │   handle_submit ──► any sync error / async error / in-flight?          │
//! │    │                    yes ──► Blocked (only touched + errors change)  │
//! │    │                    no  ──► Submitting ──► on_submit(values)        │
//! │    │                                  │  submitting cleared on every   │
//! │    └──────────────────────────────────┘  exit path, Ok or Err         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Display Rule
//! A field's error is shown only once the field is touched, and the sync
//! error takes precedence over the async one.
//!
//! ## Ordering
//! Each scheduled async validation carries a per-field generation. Scheduling
//! a newer one aborts the old task, and a finishing task applies its result
//! only if its generation is still current for that field.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use crate::error::AsyncValidationError;

/// Default quiet window before an async field validator runs.
pub const DEFAULT_VALIDATION_DEBOUNCE: Duration = Duration::from_millis(600);

/// Field name → current input.
pub type FieldValues = BTreeMap<String, String>;

/// Field name → error message. A field absent from the map is valid.
pub type FieldErrors = BTreeMap<String, String>;

/// Whole-form synchronous validator.
pub type SyncValidator = Arc<dyn Fn(&FieldValues) -> FieldErrors + Send + Sync>;

/// Validator for a single field that needs a round-trip.
#[async_trait]
pub trait AsyncFieldValidator: Send + Sync {
    /// `Ok(Some(message))` is a field error, `Ok(None)` means valid.
    ///
    /// `Err` means no verdict could be reached; the controller clears the
    /// field's async error in that case.
    async fn validate(&self, value: &str) -> Result<Option<String>, AsyncValidationError>;
}

// =============================================================================
// Snapshot Types
// =============================================================================

/// Coarse lifecycle phase of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    /// At least one async field validation is scheduled or running.
    ValidatingAsync,
    Submitting,
}

/// Read-only copy of a form's state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: FieldValues,
    pub errors: FieldErrors,
    pub async_errors: FieldErrors,
    pub touched: BTreeSet<String>,
    pub submitting: bool,
    /// Fields whose async validation is in flight.
    pub async_validating: BTreeSet<String>,
}

impl FormState {
    /// Sync error, else async error, for a touched field.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        if !self.touched.contains(field) {
            return None;
        }
        self.errors
            .get(field)
            .or_else(|| self.async_errors.get(field))
            .map(String::as_str)
    }

    /// Sync and async errors merged, sync winning on conflict.
    pub fn all_errors(&self) -> FieldErrors {
        let mut merged = self.async_errors.clone();
        merged.extend(self.errors.clone());
        merged
    }
}

/// Why [`FormController::handle_submit`] did not call the submit callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockedReason {
    /// A previous submission is still running.
    AlreadySubmitting,
    /// At least one synchronous error.
    SyncErrors,
    /// At least one async error from a completed validation.
    AsyncErrors,
    /// An async validation is still in flight.
    Validating,
}

/// Result of a submit attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<T> {
    Submitted(T),
    Blocked(BlockedReason),
}

impl<T> SubmitOutcome<T> {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

// =============================================================================
// Form Controller
// =============================================================================

struct PendingValidation {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct FormInner {
    values: FieldValues,
    errors: FieldErrors,
    async_errors: FieldErrors,
    touched: BTreeSet<String>,
    submitting: bool,
    pending: HashMap<String, PendingValidation>,
    next_generation: u64,
}

impl FormInner {
    fn abort_pending(&mut self) {
        for (_, pending) in self.pending.drain() {
            pending.handle.abort();
        }
    }

    fn snapshot(&self) -> FormState {
        FormState {
            values: self.values.clone(),
            errors: self.errors.clone(),
            async_errors: self.async_errors.clone(),
            touched: self.touched.clone(),
            submitting: self.submitting,
            async_validating: self.pending.keys().cloned().collect(),
        }
    }
}

/// Builder for a [`FormController`].
pub struct FormBuilder {
    initial: FieldValues,
    validate: SyncValidator,
    async_validators: HashMap<String, Arc<dyn AsyncFieldValidator>>,
    debounce: Duration,
}

impl FormBuilder {
    /// Starts a form with the given fields, all empty.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let initial = fields
            .into_iter()
            .map(|f| (f.into(), String::new()))
            .collect();
        Self::with_values(initial)
    }

    /// Starts a form with caller-supplied initial values.
    pub fn with_values(initial: FieldValues) -> Self {
        FormBuilder {
            initial,
            validate: Arc::new(|_: &FieldValues| FieldErrors::new()),
            async_validators: HashMap::new(),
            debounce: DEFAULT_VALIDATION_DEBOUNCE,
        }
    }

    /// Sets the whole-form synchronous validator.
    pub fn validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&FieldValues) -> FieldErrors + Send + Sync + 'static,
    {
        self.validate = Arc::new(validate);
        self
    }

    /// Registers an async validator for `field`.
    pub fn async_validator(
        mut self,
        field: impl Into<String>,
        validator: Arc<dyn AsyncFieldValidator>,
    ) -> Self {
        self.async_validators.insert(field.into(), validator);
        self
    }

    /// Overrides the async validation quiet window.
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn build(self) -> FormController {
        let inner = FormInner {
            values: self.initial.clone(),
            ..FormInner::default()
        };
        FormController {
            inner: Arc::new(Mutex::new(inner)),
            initial: self.initial,
            validate: self.validate,
            async_validators: self.async_validators,
            debounce: self.debounce,
        }
    }
}

/// One form instance.
///
/// Methods that schedule async validation must run inside a Tokio runtime.
/// Dropping the controller aborts every pending validation.
pub struct FormController {
    inner: Arc<Mutex<FormInner>>,
    initial: FieldValues,
    validate: SyncValidator,
    async_validators: HashMap<String, Arc<dyn AsyncFieldValidator>>,
    debounce: Duration,
}

impl FormController {
    /// Updates a field, recomputes sync errors and (re)schedules the field's
    /// async validator if it has one.
    pub fn handle_change(&self, field: &str, value: impl Into<String>) {
        let value = value.into();
        let mut inner = self.inner.lock();

        inner.values.insert(field.to_string(), value.clone());
        inner.errors = (self.validate)(&inner.values);

        let Some(validator) = self.async_validators.get(field) else {
            return;
        };

        if let Some(previous) = inner.pending.remove(field) {
            previous.handle.abort();
        }

        inner.next_generation += 1;
        let generation = inner.next_generation;
        let handle = tokio::spawn(run_async_validation(
            Arc::downgrade(&self.inner),
            Arc::clone(validator),
            field.to_string(),
            value,
            generation,
            Instant::now() + self.debounce,
        ));
        inner
            .pending
            .insert(field.to_string(), PendingValidation { generation, handle });

        debug!(field, generation, "Async validation scheduled");
    }

    /// Marks a field as touched. Does not validate.
    pub fn handle_blur(&self, field: &str) {
        self.inner.lock().touched.insert(field.to_string());
    }

    /// Error to display for `field`, if any.
    pub fn get_field_error(&self, field: &str) -> Option<String> {
        let inner = self.inner.lock();
        if !inner.touched.contains(field) {
            return None;
        }
        inner
            .errors
            .get(field)
            .or_else(|| inner.async_errors.get(field))
            .cloned()
    }

    /// Whether an async validation is scheduled or running for `field`.
    pub fn is_field_validating(&self, field: &str) -> bool {
        self.inner.lock().pending.contains_key(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.lock().submitting
    }

    /// Current value of `field`.
    pub fn value(&self, field: &str) -> Option<String> {
        self.inner.lock().values.get(field).cloned()
    }

    pub fn values(&self) -> FieldValues {
        self.inner.lock().values.clone()
    }

    pub fn snapshot(&self) -> FormState {
        self.inner.lock().snapshot()
    }

    pub fn phase(&self) -> FormPhase {
        let inner = self.inner.lock();
        if inner.submitting {
            FormPhase::Submitting
        } else if !inner.pending.is_empty() {
            FormPhase::ValidatingAsync
        } else {
            FormPhase::Idle
        }
    }

    /// Replaces all values (e.g. when editing an existing record) and
    /// recomputes sync errors. Async validations in flight are cancelled
    /// along with any async errors; no new ones are scheduled.
    pub fn set_values(&self, values: FieldValues) {
        let mut inner = self.inner.lock();
        inner.abort_pending();
        inner.async_errors.clear();
        inner.errors = (self.validate)(&values);
        inner.values = values;
    }

    /// Validates and, if clean, runs `on_submit` with the current values.
    ///
    /// Every field is marked touched and sync errors are recomputed first.
    /// A failure from `on_submit` is returned unchanged; `submitting` is
    /// cleared on every exit path.
    pub async fn handle_submit<F, Fut, T, E>(&self, on_submit: F) -> Result<SubmitOutcome<T>, E>
    where
        F: FnOnce(FieldValues) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let values = {
            let mut inner = self.inner.lock();
            if inner.submitting {
                return Ok(SubmitOutcome::Blocked(BlockedReason::AlreadySubmitting));
            }

            let all_fields: Vec<String> = inner.values.keys().cloned().collect();
            inner.touched.extend(all_fields);
            inner.errors = (self.validate)(&inner.values);

            let blocked = if !inner.errors.is_empty() {
                Some(BlockedReason::SyncErrors)
            } else if !inner.async_errors.is_empty() {
                Some(BlockedReason::AsyncErrors)
            } else if !inner.pending.is_empty() {
                Some(BlockedReason::Validating)
            } else {
                None
            };

            if let Some(reason) = blocked {
                debug!(?reason, "Submit blocked");
                return Ok(SubmitOutcome::Blocked(reason));
            }

            inner.submitting = true;
            inner.values.clone()
        };

        let _submitting = scopeguard::guard(Arc::clone(&self.inner), |inner| {
            inner.lock().submitting = false;
        });

        on_submit(values).await.map(SubmitOutcome::Submitted)
    }

    /// Restores initial values and clears all derived state, including
    /// pending async validations.
    pub fn reset_form(&self) {
        let mut inner = self.inner.lock();
        inner.abort_pending();
        inner.values = self.initial.clone();
        inner.errors.clear();
        inner.async_errors.clear();
        inner.touched.clear();
        inner.submitting = false;
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        self.inner.lock().abort_pending();
    }
}

/// Body of one scheduled async validation.
async fn run_async_validation(
    form: Weak<Mutex<FormInner>>,
    validator: Arc<dyn AsyncFieldValidator>,
    field: String,
    value: String,
    generation: u64,
    deadline: Instant,
) {
    sleep_until(deadline).await;
    let result = validator.validate(&value).await;

    let Some(form) = form.upgrade() else {
        return;
    };
    let mut inner = form.lock();

    let current = inner
        .pending
        .get(&field)
        .map(|p| p.generation == generation)
        .unwrap_or(false);
    if !current {
        debug!(field = %field, generation, "Discarding superseded async validation");
        return;
    }
    inner.pending.remove(&field);

    match result {
        Ok(Some(message)) => {
            inner.async_errors.insert(field, message);
        }
        Ok(None) => {
            inner.async_errors.remove(&field);
        }
        Err(e) => {
            warn!(field = %field, error = %e, "Async validation failed; treating as valid");
            inner.async_errors.remove(&field);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
