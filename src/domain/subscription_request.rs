use super::{Country, SubscriberEmail, SubscriberName};

/// Raw field state of the subscription form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub name: String,
    pub email: String,
    pub country: String,
    pub accept_terms: bool,
}

impl SubscriptionRequest {
    pub fn new(name: &str, email: &str, country: &str, accept_terms: bool) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            country: country.into(),
            accept_terms,
        }
    }
}

/// A request whose every field passed validation. Terms acceptance is
/// implied: there is no way to build one for a subscriber who declined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    pub name: SubscriberName,
    pub email: SubscriberEmail,
    pub country: Country,
}
