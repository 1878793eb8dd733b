use crate::helper::{assert_is_redirect_to, spawn_app, spawn_app_with};

#[tokio::test]
async fn help_redirects_to_prefilled_mailto() {
    let app = spawn_app().await;

    let res = app.get_help().await;
    assert_is_redirect_to(
        &res,
        "mailto:help@example.com?subject=Ajuda%20com%20formul%C3%A1rio",
    );
}

#[tokio::test]
async fn help_uses_configured_support_address() {
    let app = spawn_app_with(|config| {
        config.form.help_email = "support@example.org".into();
        config.form.help_subject = "Form help".into();
    })
    .await;

    let res = app.get_help().await;
    assert_is_redirect_to(&res, "mailto:support@example.org?subject=Form%20help");
}
