//! SendGrid v3 client sending emails rendered from dynamic templates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use url::Url;

use crate::{
    error::{CreateMailerSnafu, HttpRequestSnafu},
    Error, Notification, NotificationClient,
};

/// Configuration for the SendGrid client.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// SendGrid API key.
    pub api_key: String,

    /// Sender address.
    pub from_email: String,

    /// Sender display name.
    pub from_name: String,

    /// Base URL of the SendGrid API.
    #[serde(default = "Config::default_api_url")]
    pub api_url: Url,
}

impl Config {
    /// # Panics
    ///
    /// Never, the URL is a valid literal.
    #[inline]
    #[must_use]
    pub fn default_api_url() -> Url {
        Url::parse("https://api.sendgrid.com").expect("SendGrid API URL is valid")
    }
}

/// SendGrid API client for sending emails.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    from_email: String,
    from_name: String,
}

impl Client {
    /// Creates a new SendGrid client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use notification::sendgrid::{Client, Config};
    ///
    /// # fn example() -> Result<(), notification::Error> {
    /// let config = Config {
    ///     api_key: "SG.xxxx".to_string(),
    ///     from_email: "noreply@example.com".to_string(),
    ///     from_name: "Data Portal".to_string(),
    ///     api_url: Config::default_api_url(),
    /// };
    ///
    /// let client = Client::new(config)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(Config { api_key, from_email, from_name, api_url }: Config) -> Result<Self, Error> {
        tracing::info!(from_email = %from_email, api_url = %api_url, "Using SendGrid mailer");

        let http = reqwest::Client::builder().build().context(CreateMailerSnafu)?;
        let endpoint = format!("{}/v3/mail/send", api_url.as_str().trim_end_matches('/'));

        Ok(Self { http, endpoint, api_key, from_email, from_name })
    }
}

#[async_trait]
impl NotificationClient for Client {
    async fn send_notification(&self, notification: &Notification) -> Result<(), Error> {
        let Notification::TemplateEmail { to, subject, template_id, template_data } =
            notification;

        let payload = serde_json::json!({
            "personalizations": [{
                "to": [{ "email": to }],
                "dynamic_template_data": template_data,
            }],
            "from": { "email": self.from_email, "name": self.from_name },
            "subject": subject,
            "template_id": template_id,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context(HttpRequestSnafu { endpoint: &self.endpoint })?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text().await);
            tracing::error!(%status, to = %to, "Failed to send email: {body}");
            return Err(Error::SendEmail { status: status.as_u16(), body });
        }

        tracing::info!(to = %to, template_id = %template_id, "Successfully sent template email");
        Ok(())
    }
}

/// Body of a rejected request, or a note on why it could not be read.
fn error_body(body: reqwest::Result<String>) -> String {
    body.unwrap_or_else(|error| {
        tracing::warn!(%error, "Failed to read response body of rejected email");
        format!("<unreadable response body: {error}>")
    })
}
