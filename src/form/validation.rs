use std::collections::BTreeMap;

use crate::domain::{Country, SubscriberEmail, SubscriberName, SubscriptionRequest, ValidRequest};

use super::FormMessages;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Country,
    AcceptTerms,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Country => "country",
            Field::AcceptTerms => "acceptTerms",
        }
    }
}

/// Field name to human-readable message, one entry per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<_> = self.fields().map(|field| field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Each rule parses its own field, yielding the typed value or the message to
/// show next to that field.
fn name_rule(
    request: &SubscriptionRequest,
    messages: &FormMessages,
) -> Result<SubscriberName, String> {
    if request.name.trim().is_empty() {
        return Err(messages.name_required.clone());
    }
    SubscriberName::parse(&request.name).map_err(|_| messages.name_invalid.clone())
}

fn email_rule(
    request: &SubscriptionRequest,
    messages: &FormMessages,
) -> Result<SubscriberEmail, String> {
    if request.email.trim().is_empty() {
        return Err(messages.email_required.clone());
    }
    SubscriberEmail::parse(&request.email).map_err(|_| messages.email_invalid.clone())
}

fn country_rule(
    request: &SubscriptionRequest,
    messages: &FormMessages,
) -> Result<Country, String> {
    if request.country.trim().is_empty() {
        return Err(messages.country_required.clone());
    }
    Country::parse(&request.country).map_err(|_| messages.country_invalid.clone())
}

fn terms_rule(request: &SubscriptionRequest, messages: &FormMessages) -> Result<(), String> {
    if request.accept_terms {
        Ok(())
    } else {
        Err(messages.terms_required.clone())
    }
}

/// Keeps a passing field's value, records a failing field's message.
fn check<T>(
    field: Field,
    outcome: Result<T, String>,
    errors: &mut BTreeMap<Field, String>,
) -> Option<T> {
    outcome.map_err(|message| errors.insert(field, message)).ok()
}

/// Checks every field of `request` in one pass. Pure: no logging, no side
/// effects.
pub fn validate(
    request: &SubscriptionRequest,
    messages: &FormMessages,
) -> Result<ValidRequest, FieldErrors> {
    let mut errors = BTreeMap::new();
    let name = check(Field::Name, name_rule(request, messages), &mut errors);
    let email = check(Field::Email, email_rule(request, messages), &mut errors);
    let country = check(Field::Country, country_rule(request, messages), &mut errors);
    let terms = check(Field::AcceptTerms, terms_rule(request, messages), &mut errors);

    match (name, email, country, terms) {
        (Some(name), Some(email), Some(country), Some(())) => Ok(ValidRequest {
            name,
            email,
            country,
        }),
        _ => Err(FieldErrors(errors)),
    }
}
