use subscription_form::config::GatewayMode;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::helper::{spawn_app, spawn_app_with};

const ANA: &str = "name=Ana&email=ana%40example.com&country=Brazil&acceptTerms=on";

#[tokio::test]
async fn valid_subscribe_registers_the_member() {
    let app = spawn_app().await;

    Mock::given(path("/3.0/lists/test-list/members"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.list_provider)
        .await;

    let res = app.post_subscribe(ANA).await;
    assert_eq!(200, res.status().as_u16());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "succeeded");
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["kind"], "toast");
    assert_eq!(events[0]["variant"], "success");
    assert_eq!(events[0]["duration_ms"], 6000);
    assert!(events[0]["description"][0]
        .as_str()
        .unwrap()
        .starts_with("Ana, "));
    assert_eq!(events[1]["kind"], "success_dialog");
    assert!(events[1]["audio_url"].as_str().unwrap().starts_with("https://"));

    let provider_request = &app.list_provider.received_requests().await.unwrap()[0];
    let member: serde_json::Value = serde_json::from_slice(&provider_request.body).unwrap();
    assert_eq!(member["email_address"], "ana@example.com");
    assert_eq!(member["merge_fields"]["FNAME"], "Ana");
    assert_eq!(member["merge_fields"]["COUNTRY"], "Brazil");
}

#[tokio::test]
async fn invalid_subscribe_returns_field_errors() {
    let app = spawn_app().await;

    Mock::given(path("/3.0/lists/test-list/members"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.list_provider)
        .await;

    let datas = [
        ("name=&email=ana%40example.com&country=Brazil&acceptTerms=on", "name", "name is empty."),
        ("name=Ana&email=bad&country=Brazil&acceptTerms=on", "email", "email is invalid."),
        ("name=Ana&email=ana%40example.com&country=&acceptTerms=on", "country", "country is empty."),
        ("name=Ana&email=ana%40example.com&country=Brazil", "acceptTerms", "terms not accepted."),
    ];
    for (body, field, payload) in datas {
        let res = app.post_subscribe(body).await;
        assert_eq!(400, res.status().as_u16(), "{payload}");

        let body: serde_json::Value = res.json().await.unwrap();
        let errors = body["field_errors"].as_object().unwrap();
        assert_eq!(errors.len(), 1, "{payload}");
        assert!(errors.contains_key(field), "{payload}");
    }
}

#[tokio::test]
async fn empty_form_reports_all_four_fields() {
    let app = spawn_app().await;

    let res = app.post_subscribe("name=&email=bad&country=").await;
    assert_eq!(400, res.status().as_u16());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "idle");
    assert_eq!(body["field_errors"].as_object().unwrap().len(), 4);
    assert!(body.get("events").is_none());
}

#[tokio::test]
async fn provider_failure_returns_generic_error() {
    let app = spawn_app().await;

    Mock::given(path("/3.0/lists/test-list/members"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "title": "Member Exists",
            "detail": "ana@example.com is already a list member."
        })))
        .expect(1)
        .mount(&app.list_provider)
        .await;

    let res = app.post_subscribe(ANA).await;
    assert_eq!(500, res.status().as_u16());

    let text = res.text().await.unwrap();
    assert!(!text.contains("Member Exists"));
    assert!(!text.contains("already a list member"));

    let body: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["status"], "failed");
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["variant"], "destructive");
}

#[tokio::test]
async fn simulated_mode_never_calls_the_provider() {
    let app = spawn_app_with(|config| config.gateway.mode = GatewayMode::Simulated).await;

    Mock::given(path("/3.0/lists/test-list/members"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&app.list_provider)
        .await;

    let res = app.post_subscribe(ANA).await;
    assert_eq!(200, res.status().as_u16());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "succeeded");
}
