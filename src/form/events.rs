use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Toast {
    pub variant: ToastVariant,
    pub title: String,
    pub description: Vec<String>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SuccessDialog {
    pub title: String,
    pub prompt: String,
    pub audio_url: String,
    pub continue_label: String,
}

/// Side effects the form asks its surroundings to render.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormEvent {
    Toast(Toast),
    SuccessDialog(SuccessDialog),
}

impl FormEvent {
    pub fn toast(&self) -> Option<&Toast> {
        match self {
            FormEvent::Toast(toast) => Some(toast),
            FormEvent::SuccessDialog(_) => None,
        }
    }
}

fn serialize_millis<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match duration {
        Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
        None => serializer.serialize_none(),
    }
}

/// Receives every [`FormEvent`] a form emits.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: FormEvent);
}

impl<F> Notifier for F
where
    F: Fn(FormEvent) + Send + Sync,
{
    fn notify(&self, event: FormEvent) {
        self(event)
    }
}

/// A notifier that keeps what it receives, for callers that render events
/// after the submission settles.
#[derive(Debug, Default)]
pub struct EventLog(Mutex<Vec<FormEvent>>);

impl EventLog {
    pub fn take(&self) -> Vec<FormEvent> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn snapshot(&self) -> Vec<FormEvent> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for EventLog {
    fn notify(&self, event: FormEvent) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
