use std::time::Duration;

use crate::domain::ValidRequest;

use super::{GatewayError, SubmissionGateway};

/// Stands in for the list provider: waits, then reports success.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait::async_trait]
impl SubmissionGateway for SimulatedGateway {
    #[tracing::instrument(name = "simulating list registration", skip_all)]
    async fn register(&self, _request: &ValidRequest) -> Result<(), GatewayError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!("list provider bypassed, registration simulated.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use claim::assert_ok;

    use super::SimulatedGateway;
    use crate::{
        domain::{Country, SubscriberEmail, SubscriberName, ValidRequest},
        gateway::SubmissionGateway,
    };

    #[tokio::test]
    async fn always_succeeds_after_the_delay() {
        let gateway = SimulatedGateway::new(Duration::from_millis(50));
        let request = ValidRequest {
            name: SubscriberName::parse("Ana").unwrap(),
            email: SubscriberEmail::parse("ana@example.com").unwrap(),
            country: Country::parse("Brazil").unwrap(),
        };

        let started = Instant::now();
        assert_ok!(gateway.register(&request).await);
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
