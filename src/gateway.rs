mod mailchimp;
mod simulated;

pub use mailchimp::{MailchimpClient, MemberStatus};
pub use simulated::SimulatedGateway;

use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{
    config::{GatewayConfig, GatewayMode},
    domain::ValidRequest,
    util::error_chain_fmt,
};

/// The remote mailing list a validated subscriber is registered with.
///
/// Every call settles exactly once; a failure always comes back as a
/// [`GatewayError`] whose message is the diagnostic reason.
#[async_trait::async_trait]
pub trait SubmissionGateway: Send + Sync {
    async fn register(&self, request: &ValidRequest) -> Result<(), GatewayError>;
}

#[derive(thiserror::Error)]
pub enum GatewayError {
    #[error("the list provider rejected the subscriber ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("failed to reach the list provider.")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Arc<dyn SubmissionGateway>> {
    let gateway: Arc<dyn SubmissionGateway> = match config.mode {
        GatewayMode::Mailchimp => Arc::new(MailchimpClient::from_config(config)?),
        GatewayMode::Simulated => {
            tracing::warn!("list provider is bypassed, every submission will succeed.");
            Arc::new(SimulatedGateway::new(Duration::from_millis(
                config.simulated_delay_milliseconds,
            )))
        }
    };

    Ok(gateway)
}
