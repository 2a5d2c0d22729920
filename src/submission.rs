//! Form submission state machine.
//!
//! `Idle → Submitting → Submitted`, or back to `Idle` with an error message. What happens after
//! a failed request depends on the [`ErrorPolicy`].

mod error;

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

pub use self::error::RequestError;
use crate::{forms::Form, prelude::*};

/// Where a form gets sent to.
#[async_trait]
pub trait Endpoint<F: Form>: Sync {
    async fn send(&self, fields: &F) -> Result<(), RequestError>;
}

/// Secondary notification about an accepted submission, for example an email to the sales team.
#[async_trait]
pub trait Notifier<F: Form>: Sync {
    async fn notify(&self, fields: &F) -> Result;
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum FormState {
    #[default]
    Idle,

    Submitting,
    Submitted,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ErrorPolicy {
    /// Show the error and let the visitor retry.
    #[default]
    Strict,

    /// Show the error, then announce success anyway after the delay.
    ///
    /// This hides lost leads from both the visitor and the sales team: every use is logged.
    OptimisticFallback { delay: Duration },
}

impl ErrorPolicy {
    pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(1000);
}

#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub enum Outcome {
    Acknowledged,
    FailedReportedAsAcknowledged(RequestError),
    Failed(RequestError),
}

pub struct FormSubmission<F> {
    fields: F,
    state: FormState,
    error: Option<&'static str>,
    policy: ErrorPolicy,
}

impl<F: Form> FormSubmission<F> {
    pub fn new(fields: F, policy: ErrorPolicy) -> Self {
        Self { fields, state: FormState::Idle, error: None, policy }
    }

    #[cfg(test)]
    pub const fn fields(&self) -> &F {
        &self.fields
    }

    #[cfg(test)]
    pub const fn state(&self) -> FormState {
        self.state
    }

    /// User-facing message of the last failure.
    pub const fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Get ready for another submission.
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        if self.state == FormState::Submitted {
            self.state = FormState::Idle;
            self.error = None;
        }
    }

    /// Send the form once.
    ///
    /// Returns [`None`] without sending anything unless the form is idle.
    #[instrument(skip_all, fields(policy = ?self.policy))]
    pub async fn submit<E>(
        &mut self,
        endpoint: &E,
        notifier: Option<&dyn Notifier<F>>,
    ) -> Option<Outcome>
    where
        E: Endpoint<F> + ?Sized,
    {
        if self.state != FormState::Idle {
            warn!(state = ?self.state, "not accepting the submission");
            return None;
        }
        self.state = FormState::Submitting;
        self.error = None;

        info!("submitting…");
        match endpoint.send(&self.fields).await {
            Ok(()) => {
                if let Some(notifier) = notifier
                    && let Err(error) = notifier.notify(&self.fields).await
                {
                    warn!("failed to send the notification: {error:#}");
                }
                self.acknowledge();
                info!("acknowledged");
                Some(Outcome::Acknowledged)
            }

            Err(error) => {
                warn!(%error, "submission failed");
                self.error = Some(F::FAILURE_MESSAGE);
                self.state = FormState::Idle;
                match self.policy {
                    ErrorPolicy::Strict => Some(Outcome::Failed(error)),
                    ErrorPolicy::OptimisticFallback { delay } => {
                        warn!(?delay, "the failed submission will be reported as acknowledged");
                        sleep(delay).await;
                        self.acknowledge();
                        Some(Outcome::FailedReportedAsAcknowledged(error))
                    }
                }
            }
        }
    }

    fn acknowledge(&mut self) {
        self.fields.clear();
        self.state = FormState::Submitted;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use http::StatusCode;
    use tokio::time::Instant;

    use super::*;
    use crate::forms::{ConsultationForm, ContactForm};

    struct FakeEndpoint {
        response: Result<(), RequestError>,
        n_calls: AtomicUsize,
    }

    impl FakeEndpoint {
        fn new(response: Result<(), RequestError>) -> Self {
            Self { response, n_calls: AtomicUsize::new(0) }
        }

        fn n_calls(&self) -> usize {
            self.n_calls.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl<F: Form> Endpoint<F> for FakeEndpoint {
        async fn send(&self, _fields: &F) -> Result<(), RequestError> {
            self.n_calls.fetch_add(1, Ordering::Relaxed);
            self.response.clone()
        }
    }

    struct FakeNotifier {
        fails: bool,
        n_calls: AtomicUsize,
    }

    #[async_trait]
    impl<F: Form> Notifier<F> for FakeNotifier {
        async fn notify(&self, _fields: &F) -> Result {
            self.n_calls.fetch_add(1, Ordering::Relaxed);
            ensure!(!self.fails, "notification service is down");
            Ok(())
        }
    }

    fn contact_form() -> ContactForm {
        ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+2347040818138".to_string(),
            subject: "Quote".to_string(),
            message: "Please call me back.".to_string(),
        }
    }

    const fn optimistic() -> ErrorPolicy {
        ErrorPolicy::OptimisticFallback { delay: ErrorPolicy::DEFAULT_FALLBACK_DELAY }
    }

    #[tokio::test(start_paused = true)]
    async fn success_clears_fields_without_delay() {
        let endpoint = FakeEndpoint::new(Ok(()));
        let mut submission = FormSubmission::new(contact_form(), optimistic());

        let started_at = Instant::now();
        let outcome = submission.submit(&endpoint, None).await;

        assert_eq!(started_at.elapsed(), Duration::ZERO);
        assert_eq!(outcome, Some(Outcome::Acknowledged));
        assert_eq!(submission.state(), FormState::Submitted);
        assert_eq!(submission.fields(), &ContactForm::default());
        assert_eq!(submission.error(), None);
        assert_eq!(endpoint.n_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn optimistic_fallback_reports_success_after_delay() {
        let endpoint =
            FakeEndpoint::new(Err(RequestError::NonSuccessStatus(StatusCode::BAD_GATEWAY)));
        let mut submission = FormSubmission::new(contact_form(), optimistic());

        let started_at = Instant::now();
        let outcome = submission.submit(&endpoint, None).await;
        let elapsed = started_at.elapsed();

        assert!(elapsed >= ErrorPolicy::DEFAULT_FALLBACK_DELAY, "{elapsed:?}");
        assert!(elapsed < ErrorPolicy::DEFAULT_FALLBACK_DELAY + Duration::from_millis(50));
        assert_eq!(
            outcome,
            Some(Outcome::FailedReportedAsAcknowledged(RequestError::NonSuccessStatus(
                StatusCode::BAD_GATEWAY
            )))
        );
        assert_eq!(submission.state(), FormState::Submitted);
        assert_eq!(submission.fields(), &ContactForm::default());
        assert_eq!(submission.error(), Some(ContactForm::FAILURE_MESSAGE));
        assert_eq!(endpoint.n_calls(), 1);
    }

    #[tokio::test]
    async fn strict_failure_keeps_fields_and_allows_retry() {
        let endpoint = FakeEndpoint::new(Err(RequestError::Timeout));
        let mut submission = FormSubmission::new(contact_form(), ErrorPolicy::Strict);

        let outcome = submission.submit(&endpoint, None).await;

        assert_eq!(outcome, Some(Outcome::Failed(RequestError::Timeout)));
        assert_eq!(submission.state(), FormState::Idle);
        assert_eq!(submission.fields(), &contact_form());
        assert_eq!(submission.error(), Some(ContactForm::FAILURE_MESSAGE));

        let outcome = submission.submit(&endpoint, None).await;
        assert_eq!(outcome, Some(Outcome::Failed(RequestError::Timeout)));
        assert_eq!(endpoint.n_calls(), 2);
    }

    #[tokio::test]
    async fn notification_failure_does_not_change_outcome() {
        let endpoint = FakeEndpoint::new(Ok(()));
        let notifier = FakeNotifier { fails: true, n_calls: AtomicUsize::new(0) };
        let form = ConsultationForm {
            name: "Chidi".to_string(),
            phone: "+2348000000000".to_string(),
            location: "Port Harcourt".to_string(),
            message: "Roof installation".to_string(),
        };
        let mut submission = FormSubmission::new(form, ErrorPolicy::Strict);

        let outcome = submission.submit(&endpoint, Some(&notifier)).await;

        assert_eq!(outcome, Some(Outcome::Acknowledged));
        assert_eq!(notifier.n_calls.load(Ordering::Relaxed), 1);
        assert_eq!(submission.state(), FormState::Submitted);
        assert_eq!(submission.fields(), &ConsultationForm::default());
    }

    #[tokio::test]
    async fn notifier_is_skipped_on_failure() {
        let endpoint = FakeEndpoint::new(Err(RequestError::Unconfigured));
        let notifier = FakeNotifier { fails: false, n_calls: AtomicUsize::new(0) };
        let mut submission = FormSubmission::new(contact_form(), ErrorPolicy::Strict);

        let _ = submission.submit(&endpoint, Some(&notifier)).await;

        assert_eq!(notifier.n_calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn submitted_form_ignores_resubmission_until_reset() {
        let endpoint = FakeEndpoint::new(Ok(()));
        let mut submission = FormSubmission::new(contact_form(), ErrorPolicy::Strict);

        assert_eq!(submission.submit(&endpoint, None).await, Some(Outcome::Acknowledged));
        assert_eq!(submission.submit(&endpoint, None).await, None);
        assert_eq!(endpoint.n_calls(), 1);

        submission.reset();
        assert_eq!(submission.state(), FormState::Idle);
        assert_eq!(submission.submit(&endpoint, None).await, Some(Outcome::Acknowledged));
        assert_eq!(endpoint.n_calls(), 2);
    }
}
