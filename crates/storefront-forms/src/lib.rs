//! # storefront-forms: Debounce Primitive and Form Controller
//!
//! Everything between a keystroke and a validated submit.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  input events ──► FormController ──► storefront_core::validation       │
//! │                        │                (sync, every change)            │
//! │                        │                                                │
//! │                        └──► AsyncFieldValidator (debounced per field)   │
//! │                                  └── EmailAvailability                  │
//! │                                                                         │
//! │  search box ──► Debounced<String> ──► committed query ──► catalog      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`debounce`] - [`Debounced`] quiet-window value
//! - [`form`] - [`FormController`] and its builder
//! - [`email`] - Simulated email availability check
//! - [`error`] - [`AsyncValidationError`]
//!
//! ## Example
//!
//! ```rust
//! use storefront_core::validation::validate_email;
//! use storefront_forms::{FieldErrors, FieldValues, FormBuilder};
//!
//! let form = FormBuilder::with_fields(["email"])
//!     .validate(|values: &FieldValues| {
//!         let mut errors = FieldErrors::new();
//!         if let Err(e) = validate_email(&values["email"]) {
//!             errors.insert("email".to_string(), e.to_string());
//!         }
//!         errors
//!     })
//!     .build();
//!
//! form.handle_change("email", "nope");
//! form.handle_blur("email");
//! assert_eq!(form.get_field_error("email").as_deref(), Some("Invalid email format"));
//! ```

pub mod debounce;
pub mod email;
pub mod error;
pub mod form;

pub use debounce::{Debounced, DEFAULT_DEBOUNCE};
pub use email::{check_email_availability, EmailAvailability};
pub use error::AsyncValidationError;
pub use form::{
    AsyncFieldValidator, BlockedReason, FieldErrors, FieldValues, FormBuilder, FormController,
    FormPhase, FormState, SubmitOutcome, SyncValidator, DEFAULT_VALIDATION_DEBOUNCE,
};
