use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// SendGrid dynamic template id, e.g. `d-0123456789abcdef`.
    #[serde(default)]
    pub template_id: String,

    #[serde(default = "NotificationConfig::default_subject")]
    pub subject: String,

    /// Frontend site the links in emails point to.
    #[serde(default = "NotificationConfig::default_site_url")]
    pub site_url: Url,
}

impl NotificationConfig {
    #[inline]
    pub fn default_subject() -> String { data_subscriptions_core::DEFAULT_EMAIL_SUBJECT.to_string() }

    #[inline]
    pub fn default_site_url() -> Url {
        Url::parse("http://localhost:5000/").expect("default site URL is valid")
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            template_id: String::new(),
            subject: Self::default_subject(),
            site_url: Self::default_site_url(),
        }
    }
}

impl From<NotificationConfig> for data_subscriptions_core::config::NotificationConfig {
    fn from(NotificationConfig { template_id, subject, site_url }: NotificationConfig) -> Self {
        Self { template_id, subject, site_url }
    }
}
