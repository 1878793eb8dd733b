mod events;
mod help;
mod messages;
mod validation;

pub use events::*;
pub use help::HelpRequest;
pub use messages::FormMessages;
pub use validation::{validate, Field, FieldErrors};

use std::{
    fmt::Debug,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tracing::Instrument;

use crate::{
    config::FormConfig,
    domain::{SubscriberEmail, SubscriptionRequest, ValidRequest},
    gateway::{GatewayError, SubmissionGateway},
    util::error_chain_fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Everything a form needs besides its collaborators: message text, the
/// success dialog's audio and the support address.
#[derive(Debug, Clone)]
pub struct FormSettings {
    pub messages: FormMessages,
    pub audio_url: String,
    pub success_toast_duration: Duration,
    help: HelpRequest,
}

impl FormSettings {
    pub fn new(
        messages: FormMessages,
        audio_url: &str,
        success_toast_duration: Duration,
        help: HelpRequest,
    ) -> Self {
        Self {
            messages,
            audio_url: audio_url.into(),
            success_toast_duration,
            help,
        }
    }

    pub fn from_config(config: &FormConfig) -> anyhow::Result<Self> {
        let support = SubscriberEmail::parse(&config.help_email).map_err(anyhow::Error::msg)?;
        let help = HelpRequest::compose(&support, &config.help_subject)?;

        Ok(Self::new(
            config.messages.clone(),
            &config.audio_url,
            Duration::from_millis(config.success_toast_milliseconds),
            help,
        ))
    }

    pub fn help(&self) -> &HelpRequest {
        &self.help
    }
}

#[derive(thiserror::Error)]
pub enum FormError {
    #[error("the subscription form has invalid fields.")]
    Validation(FieldErrors),
    #[error("a submission is already in flight.")]
    AlreadySubmitting,
    #[error("failed to register the subscriber.")]
    Submission(#[source] GatewayError),
}

impl Debug for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

struct FormState {
    request: SubscriptionRequest,
    status: SubmissionStatus,
    dialog_open: bool,
}

/// The part of a form the registration task needs to settle a submission.
struct FormCore {
    state: Mutex<FormState>,
    notifier: Arc<dyn Notifier>,
    settings: Arc<FormSettings>,
}

impl FormCore {
    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn settle_success(&self, valid: &ValidRequest) {
        {
            let mut state = self.state();
            state.status = SubmissionStatus::Succeeded;
            state.request = SubscriptionRequest::default();
            state.dialog_open = true;
        }
        tracing::info!("subscriber registered.");
        self.notifier.notify(FormEvent::Toast(self.success_toast(valid)));
        self.notifier
            .notify(FormEvent::SuccessDialog(self.success_dialog()));
    }

    fn settle_failure(&self, e: &GatewayError) {
        self.state().status = SubmissionStatus::Failed;
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "failed to register subscriber."
        );
        self.notifier.notify(FormEvent::Toast(self.error_toast()));
    }

    fn success_toast(&self, valid: &ValidRequest) -> Toast {
        let messages = &self.settings.messages;
        Toast {
            variant: ToastVariant::Success,
            title: messages.success_title.clone(),
            description: vec![
                format!("{}, {}", valid.name.as_ref(), messages.success_message),
                format!("✨ {}", messages.success_details),
                format!("📧 {}", messages.check_email),
            ],
            duration: Some(self.settings.success_toast_duration),
        }
    }

    fn error_toast(&self) -> Toast {
        let messages = &self.settings.messages;
        Toast {
            variant: ToastVariant::Destructive,
            title: messages.error_title.clone(),
            description: vec![messages.error_message.clone()],
            duration: None,
        }
    }

    fn success_dialog(&self) -> SuccessDialog {
        let messages = &self.settings.messages;
        SuccessDialog {
            title: messages.dialog_title.clone(),
            prompt: messages.dialog_prompt.clone(),
            audio_url: self.settings.audio_url.clone(),
            continue_label: messages.dialog_continue.clone(),
        }
    }
}

/// One subscription form instance: its fields, its submission status and the
/// visibility of its success dialog.
///
/// At most one submission is in flight per instance. The status is checked
/// and flipped to [`SubmissionStatus::Submitting`] under the state lock, and
/// the lock is released before the gateway is awaited. The gateway call runs
/// on its own task, so a caller that stops waiting does not cancel it.
pub struct SubscriptionForm {
    core: Arc<FormCore>,
    gateway: Arc<dyn SubmissionGateway>,
}

impl SubscriptionForm {
    pub fn new(
        gateway: Arc<dyn SubmissionGateway>,
        notifier: Arc<dyn Notifier>,
        settings: Arc<FormSettings>,
    ) -> Self {
        let core = FormCore {
            state: Mutex::new(FormState {
                request: SubscriptionRequest::default(),
                status: SubmissionStatus::Idle,
                dialog_open: false,
            }),
            notifier,
            settings,
        };

        Self {
            core: Arc::new(core),
            gateway,
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.core.state()
    }

    pub fn request(&self) -> SubscriptionRequest {
        self.state().request.clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.state().status
    }

    /// Drives the submit affordance: disabled while this is `true`.
    pub fn is_submitting(&self) -> bool {
        self.status() == SubmissionStatus::Submitting
    }

    pub fn dialog_open(&self) -> bool {
        self.state().dialog_open
    }

    pub fn set_name(&self, name: &str) {
        self.state().request.name = name.into();
    }

    pub fn set_email(&self, email: &str) {
        self.state().request.email = email.into();
    }

    pub fn set_country(&self, country: &str) {
        self.state().request.country = country.into();
    }

    pub fn set_accept_terms(&self, accept_terms: bool) {
        self.state().request.accept_terms = accept_terms;
    }

    /// Replaces every field at once.
    pub fn fill(&self, request: SubscriptionRequest) {
        self.state().request = request;
    }

    pub fn validate(&self) -> Result<ValidRequest, FieldErrors> {
        validate(&self.state().request, &self.core.settings.messages)
    }

    #[tracing::instrument(name = "submitting the subscription form", skip_all)]
    pub async fn submit(&self) -> Result<(), FormError> {
        let valid = {
            let mut state = self.state();
            if state.status == SubmissionStatus::Submitting {
                tracing::warn!("submission ignored, another one is still in flight.");
                return Err(FormError::AlreadySubmitting);
            }
            let valid =
                validate(&state.request, &self.core.settings.messages).map_err(|errors| {
                    tracing::info!("form rejected, {errors}.");
                    FormError::Validation(errors)
                })?;
            state.status = SubmissionStatus::Submitting;
            valid
        };

        // 任务内完成状态更新，调用方中途放弃等待也不会卡在`Submitting`
        let core = self.core.clone();
        let gateway = self.gateway.clone();
        let registration = tokio::spawn(
            async move {
                let outcome = gateway.register(&valid).await;
                match &outcome {
                    Ok(()) => core.settle_success(&valid),
                    Err(e) => core.settle_failure(e),
                }
                outcome
            }
            .instrument(tracing::Span::current()),
        );

        match registration.await {
            Ok(outcome) => outcome.map_err(FormError::Submission),
            // 任务panic时状态尚未更新
            Err(e) => {
                let e = GatewayError::UnexpectedError(
                    anyhow::Error::new(e).context("the list registration task did not finish."),
                );
                self.core.settle_failure(&e);
                Err(FormError::Submission(e))
            }
        }
    }

    /// Closes the success dialog. A form that just succeeded goes back to idle.
    pub fn dismiss_dialog(&self) {
        let mut state = self.state();
        state.dialog_open = false;
        if state.status == SubmissionStatus::Succeeded {
            state.status = SubmissionStatus::Idle;
        }
    }

    pub fn request_help(&self) -> HelpRequest {
        tracing::info!("help requested from the subscription form.");
        self.core.settings.help().clone()
    }
}
