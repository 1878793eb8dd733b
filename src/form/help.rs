use anyhow::Context;

use crate::domain::SubscriberEmail;

/// Pre-filled `mailto:` link pointing at the support inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRequest {
    link: reqwest::Url,
}

impl HelpRequest {
    pub fn compose(support: &SubscriberEmail, subject: &str) -> anyhow::Result<Self> {
        let mut link = reqwest::Url::parse(&format!("mailto:{support}"))
            .with_context(|| format!("failed to build a mailto link for `{support}`."))?;
        link.query_pairs_mut().append_pair("subject", subject);
        // Mail clients do not decode `+` as a space. A literal `+` has already
        // been escaped as `%2B`, so every remaining `+` is a space.
        let query = link.query().map(|q| q.replace('+', "%20"));
        link.set_query(query.as_deref());

        Ok(Self { link })
    }

    pub fn as_str(&self) -> &str {
        self.link.as_str()
    }
}
