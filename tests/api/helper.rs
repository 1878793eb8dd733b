use std::net::TcpListener;

use actix_web::web;
use once_cell::sync::Lazy;
use subscription_form::{
    config::{Config, GatewayMode},
    form::FormSettings,
    gateway, telemetry,
};
use wiremock::MockServer;

// Set `TEST_LOG` to see the server's logs while tests run.
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        telemetry::set_global_default(telemetry::get_subscriber("test", "debug", std::io::stdout));
    } else {
        telemetry::set_global_default(telemetry::get_subscriber("test", "debug", std::io::sink));
    }
});

pub struct TestApp {
    pub address: String,
    pub list_provider: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn post_subscribe(&self, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/subscribe", &self.address))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body.to_owned())
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub async fn get_help(&self) -> reqwest::Response {
        self.client
            .get(format!("{}/help", &self.address))
            .send()
            .await
            .expect("failed to execute request.")
    }
}

/// Starts the server on a random port with the list provider pointed at a
/// fresh mock server.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    Lazy::force(&TRACING);

    let list_provider = MockServer::start().await;
    let mut config = subscription_form::config::file_config().expect("failed to load config.");
    // 端口为0时由系统随机分配
    config.web.port = 0;
    config.gateway.mode = GatewayMode::Mailchimp;
    config.gateway.base_url = list_provider.uri();
    config.gateway.list_id = "test-list".into();
    config.gateway.timeout_milliseconds = 2000;
    config.gateway.simulated_delay_milliseconds = 10;
    customize(&mut config);

    let listener =
        TcpListener::bind(config.web.server_address()).expect("failed to bind web port.");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://{}:{}", &config.web.host, port);

    let gateway = web::Data::from(
        gateway::from_config(&config.gateway).expect("failed to build the gateway."),
    );
    let settings = web::Data::new(
        FormSettings::from_config(&config.form).expect("failed to build form settings."),
    );
    let server =
        subscription_form::run(listener, gateway, settings).expect("failed to start server.");
    tokio::spawn(server);

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address,
        list_provider,
        client,
    }
}

pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}
