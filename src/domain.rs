mod country;
mod subscriber_email;
mod subscriber_name;
mod subscription_request;

pub use country::Country;
pub use subscriber_email::SubscriberEmail;
pub use subscriber_name::SubscriberName;
pub use subscription_request::{SubscriptionRequest, ValidRequest};
