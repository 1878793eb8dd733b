use std::{fmt::Debug, sync::Arc};

use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::Deserialize;

use crate::{
    domain::SubscriptionRequest,
    form::{
        EventLog, FieldErrors, FormError, FormEvent, FormSettings, SubmissionStatus,
        SubscriptionForm,
    },
    gateway::{GatewayError, SubmissionGateway},
    util::error_chain_fmt,
};

#[derive(serde::Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub country: String,
    // Browsers omit unchecked checkboxes and send `on` for checked ones.
    #[serde(rename = "acceptTerms", default, deserialize_with = "deserialize_checkbox")]
    pub accept_terms: bool,
}

fn deserialize_checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    ))
}

impl From<FormData> for SubscriptionRequest {
    fn from(form: FormData) -> Self {
        Self {
            name: form.name,
            email: form.email,
            country: form.country,
            accept_terms: form.accept_terms,
        }
    }
}

#[derive(serde::Serialize)]
struct SubscribeResponse<'a> {
    status: SubmissionStatus,
    #[serde(skip_serializing_if = "no_events")]
    events: &'a [FormEvent],
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<&'a FieldErrors>,
}

fn no_events(events: &&[FormEvent]) -> bool {
    events.is_empty()
}

#[tracing::instrument(name = "subscribing through the marketing form", skip_all)]
pub async fn subscribe(
    form: web::Form<FormData>,
    gateway: web::Data<dyn SubmissionGateway>,
    settings: web::Data<FormSettings>,
) -> Result<HttpResponse, SubscribeError> {
    // 每个请求独立的表单实例与事件记录
    let events = Arc::new(EventLog::default());
    let subscription =
        SubscriptionForm::new(gateway.into_inner(), events.clone(), settings.into_inner());
    subscription.fill(form.0.into());

    match subscription.submit().await {
        Ok(()) => Ok(HttpResponse::Ok().json(SubscribeResponse {
            status: subscription.status(),
            events: &events.take(),
            field_errors: None,
        })),
        Err(FormError::Validation(errors)) => Err(SubscribeError::ValidationError(errors)),
        Err(FormError::AlreadySubmitting) => Err(SubscribeError::InFlight),
        Err(FormError::Submission(source)) => Err(SubscribeError::SubmissionError {
            source,
            events: events.take(),
        }),
    }
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("{0}")]
    ValidationError(FieldErrors),
    #[error("a submission is already in flight.")]
    InFlight,
    #[error("failed to register the subscriber.")]
    SubmissionError {
        #[source]
        source: GatewayError,
        events: Vec<FormEvent>,
    },
}

impl Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubscribeError::InFlight => StatusCode::CONFLICT,
            SubscribeError::SubmissionError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // The gateway's reason stays in the logs; the body only carries what the
    // form itself would render.
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            SubscribeError::ValidationError(errors) => SubscribeResponse {
                status: SubmissionStatus::Idle,
                events: &[],
                field_errors: Some(errors),
            },
            SubscribeError::InFlight => SubscribeResponse {
                status: SubmissionStatus::Submitting,
                events: &[],
                field_errors: None,
            },
            SubscribeError::SubmissionError { events, .. } => SubscribeResponse {
                status: SubmissionStatus::Failed,
                events,
                field_errors: None,
            },
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
