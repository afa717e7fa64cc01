use snafu::Snafu;

use crate::MetadataKind;

/// Errors that can occur in the catalog crate.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Failed to create the HTTP client.
    #[snafu(display("Failed to create catalog HTTP client, error: {source}"))]
    BuildHttpClient {
        /// The underlying reqwest error.
        source: reqwest::Error,
    },

    /// The catalog could not be reached or the response body could not be read.
    #[snafu(display("Failed to request `{kind}` for id `{id}`, error: {source}"))]
    HttpRequest {
        kind: MetadataKind,
        id: String,
        /// The underlying reqwest error.
        source: reqwest::Error,
    },

    /// The catalog answered with something that is not an action response.
    #[snafu(display(
        "Malformed `{kind}` response for id `{id}` (HTTP status {status}), error: {source}"
    ))]
    DecodeResponse {
        kind: MetadataKind,
        id: String,
        status: u16,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },

    /// The action succeeded but carried no result.
    #[snafu(display("`{kind}` response for id `{id}` has no result"))]
    MissingResult { kind: MetadataKind, id: String },

    /// The action failed for a reason other than the entity being unknown.
    #[snafu(display("`{kind}` failed for id `{id}`: {error_type}: {message}"))]
    ActionFailed { kind: MetadataKind, id: String, error_type: String, message: String },
}
