/// User-facing text of the form. Every field has a default so a partial
/// `form.messages` section in the configuration only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct FormMessages {
    pub name_required: String,
    pub name_invalid: String,
    pub email_required: String,
    pub email_invalid: String,
    pub country_required: String,
    pub country_invalid: String,
    pub terms_required: String,

    pub success_title: String,
    pub success_message: String,
    pub success_details: String,
    pub check_email: String,

    pub error_title: String,
    pub error_message: String,

    pub dialog_title: String,
    pub dialog_prompt: String,
    pub dialog_continue: String,
}

impl Default for FormMessages {
    fn default() -> Self {
        Self {
            name_required: "Please enter your name.".into(),
            name_invalid: "Please enter a valid name.".into(),
            email_required: "Please enter your email.".into(),
            email_invalid: "Please enter a valid email address.".into(),
            country_required: "Please enter your country.".into(),
            country_invalid: "Please enter a valid country.".into(),
            terms_required: "You must accept the terms to continue.".into(),

            success_title: "Subscription confirmed!".into(),
            success_message: "your subscription was received.".into(),
            success_details: "Get ready for what is coming next.".into(),
            check_email: "Check your inbox for the next steps.".into(),

            error_title: "Something went wrong".into(),
            error_message: "We could not complete your subscription. Please try again.".into(),

            dialog_title: "CONGRATULATIONS ON STARTING YOUR JOURNEY".into(),
            dialog_prompt: "LISTEN TO THE AUDIO BELOW".into(),
            dialog_continue: "CONTINUE MY JOURNEY".into(),
        }
    }
}
