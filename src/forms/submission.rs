//! The submission dispatcher and the mounted form it drives.
//!
//! A submission runs strictly in order: validation, normalization, a single
//! call to the identity service, state mutation, navigation. Client-side
//! validation failures never reach the network. API failures never escape:
//! they become field errors (server validation) or the banner (anything else).
//!
//! A form accepts one submission at a time; a submit issued while another is
//! in flight is ignored. Unmounting does not cancel the in-flight request, but
//! its response is dropped without touching the form, the session or the
//! navigator.

use super::{
    normalize::{normalize, NormalizedValues},
    schema::Schema,
    values::{FieldErrors, FormValues},
};
use crate::{
    api::AppError,
    features::auth::{types::SessionResponse, AuthContext, AuthService},
    i18n::{Message, MessageKey},
    navigation::{Navigator, Redirect},
};
use secrecy::SecretString;
use std::{
    future::Future,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};
use tracing::{debug, info, instrument, warn};
use ulid::Ulid;

/// A concrete screen: its schema, how values become a request, which service
/// operation receives it and where to go afterwards.
pub trait FormFlow: Send + Sync {
    type Request: Send + Sync;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    fn schema(&self) -> &'static Schema;

    fn build_request(&self, values: &NormalizedValues) -> Self::Request;

    /// Sends the request; operations without a session answer `Ok(None)`.
    fn send<S: AuthService>(
        &self,
        service: &S,
        request: &Self::Request,
    ) -> impl Future<Output = Result<Option<SessionResponse>, AppError>> + Send;

    /// Post-success logic, run after the token has been stored.
    fn on_success(
        &self,
        session: Option<&SessionResponse>,
        values: &NormalizedValues,
        auth: &AuthContext,
    ) -> Redirect;
}

/// Everything a form displays.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: FormValues,
    pub errors: FieldErrors,
    pub banner: Option<Message>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission was already in flight.
    Ignored,
    /// Client-side validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The service rejected the input field by field.
    Rejected(FieldErrors),
    /// Any other failure, surfaced as the banner.
    Failed(Message),
    Navigated(Redirect),
    /// The form was unmounted before the response arrived.
    Abandoned,
}

pub struct Form<F: FormFlow> {
    flow: F,
    read_only: Vec<&'static str>,
    state: Mutex<FormState>,
    pending: AtomicBool,
    mounted: AtomicBool,
}

impl<F: FormFlow> Form<F> {
    #[must_use]
    pub fn new(flow: F, initial: FormValues) -> Self {
        Self {
            flow,
            read_only: Vec::new(),
            state: Mutex::new(FormState {
                values: initial,
                ..FormState::default()
            }),
            pending: AtomicBool::new(false),
            mounted: AtomicBool::new(true),
        }
    }

    /// Marks fields whose initial value cannot be changed.
    #[must_use]
    pub fn with_read_only(mut self, fields: &[&'static str]) -> Self {
        self.read_only.extend_from_slice(fields);
        self
    }

    #[must_use]
    pub fn flow(&self) -> &F {
        &self.flow
    }

    #[must_use]
    pub fn is_read_only(&self, field: &str) -> bool {
        self.read_only.contains(&field)
    }

    /// Updates a text field. Returns `false` for read-only fields.
    pub fn set_text(&self, field: &str, value: impl Into<String>) -> bool {
        if self.is_read_only(field) {
            debug!(field, "ignoring change to read-only field");
            return false;
        }
        self.lock().values.set_text(field, value);
        true
    }

    /// Updates a checkbox. Returns `false` for read-only fields.
    pub fn set_flag(&self, field: &str, value: bool) -> bool {
        if self.is_read_only(field) {
            debug!(field, "ignoring change to read-only field");
            return false;
        }
        self.lock().values.set_flag(field, value);
        true
    }

    #[must_use]
    pub fn state(&self) -> FormState {
        self.lock().clone()
    }

    #[must_use]
    pub fn values(&self) -> FormValues {
        self.lock().values.clone()
    }

    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.lock().errors.clone()
    }

    #[must_use]
    pub fn banner(&self) -> Option<Message> {
        self.lock().banner.clone()
    }

    /// True while a submission is in flight; the submit action is disabled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Detaches the form; a response still in flight will be ignored.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::Release);
    }

    /// Runs one submission. A successful submission navigates away and
    /// unmounts the form.
    #[instrument(skip_all, fields(flow = self.flow.name(), submission = %Ulid::new()))]
    pub async fn submit<S, N>(&self, service: &S, auth: &AuthContext, navigator: &N) -> SubmitOutcome
    where
        S: AuthService,
        N: Navigator,
    {
        if !self.is_mounted() {
            return SubmitOutcome::Abandoned;
        }
        let Some(_pending) = PendingGuard::acquire(&self.pending) else {
            debug!("submission already in flight");
            return SubmitOutcome::Ignored;
        };

        let values = {
            let mut state = self.lock();
            state.banner = None;
            state.values.clone()
        };

        let schema = self.flow.schema();
        if let Err(errors) = schema.evaluate(&values) {
            debug!(fields = errors.len(), "client validation failed");
            self.lock().errors = errors.clone();
            return SubmitOutcome::Invalid(errors);
        }
        self.lock().errors = FieldErrors::new();

        let normalized = normalize(schema, &values);
        let request = self.flow.build_request(&normalized);
        let result = self.flow.send(service, &request).await;

        if !self.is_mounted() {
            debug!("form unmounted before the response; ignoring it");
            return SubmitOutcome::Abandoned;
        }

        match result {
            Ok(session) => {
                if let Some(session) = &session {
                    auth.set_token(SecretString::from(session.token.clone()));
                }
                let redirect = self.flow.on_success(session.as_ref(), &normalized, auth);
                info!(to = %redirect, "submission succeeded");
                navigator.navigate(&redirect);
                // Navigating away discards the form.
                self.unmount();
                SubmitOutcome::Navigated(redirect)
            }
            Err(AppError::Validation { errors, .. }) => {
                let errors = FieldErrors::from(errors);
                debug!(fields = errors.len(), "server validation failed");
                self.lock().errors = errors.clone();
                SubmitOutcome::Rejected(errors)
            }
            Err(err) => {
                warn!(error = %err, "submission failed");
                let banner = banner_message(&err);
                self.lock().banner = Some(banner.clone());
                SubmitOutcome::Failed(banner)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The service's own message when there is one, the generic error otherwise.
fn banner_message(err: &AppError) -> Message {
    let message = err.user_message().trim();
    if message.is_empty() {
        Message::key(MessageKey::GenericError)
    } else {
        Message::text(message)
    }
}

/// Holds the in-flight flag for the duration of a submission.
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
