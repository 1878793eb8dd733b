use std::time::Duration;

use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};

use crate::{config::GatewayConfig, domain::ValidRequest};

use super::{GatewayError, SubmissionGateway};

/// Status a new list member is created with. `pending` makes the provider
/// send its own opt-in confirmation email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Subscribed,
    Pending,
}

pub struct MailchimpClient {
    client: reqwest::Client,
    base_url: reqwest::Url,
    list_id: String,
    api_key: SecretString,
    member_status: MemberStatus,
}

impl MailchimpClient {
    pub fn new(
        base_url: &str,
        list_id: &str,
        api_key: SecretString,
        member_status: MemberStatus,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build the list provider client.")?;
        let mut base_url = reqwest::Url::parse(base_url)
            .with_context(|| format!("`{base_url}` is not a valid list provider url."))?;
        // 保留路径前缀，后面按相对路径拼接
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            list_id: list_id.into(),
            api_key,
            member_status,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.base_url,
            &config.list_id,
            config.api_key.clone(),
            config.member_status,
            Duration::from_millis(config.timeout_milliseconds),
        )
    }
}

#[async_trait::async_trait]
impl SubmissionGateway for MailchimpClient {
    #[tracing::instrument(
        name = "adding member to the mailing list",
        skip_all,
        fields(list_id = %self.list_id)
    )]
    async fn register(&self, request: &ValidRequest) -> Result<(), GatewayError> {
        let url = self
            .base_url
            .join(&format!("3.0/lists/{}/members", self.list_id))
            .context("failed to build the list members url.")?;
        let body = AddMemberBody {
            email_address: request.email.as_ref(),
            status: self.member_status,
            merge_fields: MergeFields {
                fname: request.name.as_ref(),
                country: request.country.as_ref(),
            },
        };

        let response = self
            .client
            .post(url)
            .basic_auth("anystring", Some(self.api_key.expose_secret()))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // The provider answers errors with a problem document; fall back to
        // the status reason when the body is missing or malformed.
        let detail = response
            .json::<ProblemBody>()
            .await
            .ok()
            .and_then(|problem| problem.detail.or(problem.title))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_owned());

        Err(GatewayError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

#[derive(serde::Serialize)]
struct AddMemberBody<'a> {
    email_address: &'a str,
    status: MemberStatus,
    merge_fields: MergeFields<'a>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
struct MergeFields<'a> {
    fname: &'a str,
    country: &'a str,
}

#[derive(serde::Deserialize)]
struct ProblemBody {
    title: Option<String>,
    detail: Option<String>,
}
