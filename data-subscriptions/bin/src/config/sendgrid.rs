use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SendGridConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "SendGridConfig::default_from_email")]
    pub from_email: String,

    #[serde(default = "SendGridConfig::default_from_name")]
    pub from_name: String,

    #[serde(default = "notification::sendgrid::Config::default_api_url")]
    pub api_url: Url,
}

impl SendGridConfig {
    #[inline]
    pub fn default_from_email() -> String { "noreply@localhost".to_string() }

    #[inline]
    pub fn default_from_name() -> String {
        data_subscriptions_core::PROJECT_NAME_WITH_INITIAL_CAPITAL.to_string()
    }
}

impl Default for SendGridConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            from_email: Self::default_from_email(),
            from_name: Self::default_from_name(),
            api_url: notification::sendgrid::Config::default_api_url(),
        }
    }
}

impl From<SendGridConfig> for notification::sendgrid::Config {
    fn from(SendGridConfig { api_key, from_email, from_name, api_url }: SendGridConfig) -> Self {
        Self { api_key, from_email, from_name, api_url }
    }
}
