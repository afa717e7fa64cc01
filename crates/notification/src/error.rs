use snafu::Snafu;

/// Errors that can occur in the notification crate.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Failed to create mailer client.
    #[snafu(display("Failed to create mailer client, error: {source}"))]
    CreateMailer {
        /// The underlying reqwest error.
        source: reqwest::Error,
    },

    /// The provider rejected the email.
    #[snafu(display("Failed to send email, status: {status}, response: {body}"))]
    SendEmail {
        /// HTTP status returned by the provider.
        status: u16,
        /// Response body returned by the provider.
        body: String,
    },

    /// HTTP request failed.
    #[snafu(display("HTTP request to {endpoint} failed: {source}"))]
    HttpRequest {
        /// The endpoint the request was sent to.
        endpoint: String,
        /// The underlying reqwest error.
        source: reqwest::Error,
    },
}
