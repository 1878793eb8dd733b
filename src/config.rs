use anyhow::Context;
use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::{form::FormMessages, gateway::MemberStatus};

#[derive(serde::Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub gateway: GatewayConfig,
    pub form: FormConfig,
}

#[derive(serde::Deserialize)]
pub struct WebConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl WebConfig {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    /// Register subscribers with the real list provider.
    Mailchimp,
    /// Skip the provider: wait, then report success.
    Simulated,
}

#[derive(serde::Deserialize)]
pub struct GatewayConfig {
    pub mode: GatewayMode,
    pub base_url: String,
    pub list_id: String,
    pub api_key: SecretString,
    pub member_status: MemberStatus,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub simulated_delay_milliseconds: u64,
}

#[derive(serde::Deserialize)]
pub struct FormConfig {
    pub help_email: String,
    pub help_subject: String,
    pub audio_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub success_toast_milliseconds: u64,
    #[serde(default)]
    pub messages: FormMessages,
}

fn file_source() -> config::builder::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder()
        .add_source(config::File::new("config.yaml", config::FileFormat::Yaml))
}

fn load(
    builder: config::builder::ConfigBuilder<config::builder::DefaultState>,
) -> anyhow::Result<Config> {
    builder
        .build()
        .context("failed to read config.yaml.")?
        .try_deserialize::<Config>()
        .context("failed to deserialize config.yaml.")
}

/// Reads `config.yaml`, then lets `APP_`-prefixed environment variables
/// override single keys, `__` separating sections
/// (`APP_GATEWAY__API_KEY` sets `gateway.api_key`).
pub fn config() -> anyhow::Result<Config> {
    load(
        file_source().add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        ),
    )
}

/// `config.yaml` alone, no environment overrides.
pub fn file_config() -> anyhow::Result<Config> {
    load(file_source())
}
