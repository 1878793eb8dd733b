use std::net::TcpListener;

use actix_web::web;
use anyhow::Context;
use subscription_form::{config, form::FormSettings, gateway, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 遥测初始化
    telemetry::init_subscriber("subscription-form");

    let config = config::config()?;
    let address = config.web.server_address();
    let listener =
        TcpListener::bind(&address).with_context(|| format!("failed to bind {address}."))?;

    // 按配置选择真实或模拟的名单服务
    let gateway = web::Data::from(gateway::from_config(&config.gateway)?);
    let settings = web::Data::new(FormSettings::from_config(&config.form)?);

    tracing::info!("listening on {address}.");
    subscription_form::run(listener, gateway, settings)?.await?;

    Ok(())
}
