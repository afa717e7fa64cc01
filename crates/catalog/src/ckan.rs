//! CKAN Action API client.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use url::Url;

use crate::{
    error::{
        BuildHttpClientSnafu, DecodeResponseSnafu, HttpRequestSnafu, MissingResultSnafu,
    },
    DatasetMetadata, Error, MetadataClient, MetadataKind, UserMetadata,
};

/// `__type` of the action error CKAN returns for unknown ids.
const NOT_FOUND_ERROR: &str = "Not Found Error";

/// Configuration for the CKAN client.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the CKAN instance, e.g. `https://demo.ckan.org`.
    pub url: Url,

    /// API key sent in the `Authorization` header. Required to see user
    /// emails.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Envelope of every CKAN action response.
#[derive(Debug, Deserialize)]
struct ActionResponse<T> {
    success: bool,

    result: Option<T>,

    #[serde(default)]
    error: Option<ActionError>,
}

#[derive(Debug, Deserialize)]
struct ActionError {
    #[serde(rename = "__type", default)]
    type_: String,

    #[serde(default)]
    message: Option<serde_json::Value>,
}

impl ActionError {
    fn message(&self) -> String {
        match &self.message {
            Some(serde_json::Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

/// CKAN client resolving users and datasets one id at a time.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Client {
    /// Creates a new CKAN client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(Config { url, api_key }: Config) -> Result<Self, Error> {
        tracing::info!(url = %url, authenticated = api_key.is_some(), "Using CKAN catalog");

        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(BuildHttpClientSnafu)?;

        Ok(Self { http, base_url: url.as_str().trim_end_matches('/').to_string(), api_key })
    }

    /// Calls the action serving `kind` for a single id.
    ///
    /// Returns `Ok(None)` when the catalog does not know the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the response is malformed or the
    /// action fails for any reason other than "not found".
    pub async fn show<T>(&self, kind: MetadataKind, id: &str) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
    {
        let endpoint = format!("{}/api/3/action/{}", self.base_url, kind.action());

        let mut request = self.http.get(&endpoint).query(&[("id", id)]);
        if let Some(api_key) = &self.api_key {
            request = request.header(reqwest::header::AUTHORIZATION, api_key);
        }

        let response = request.send().await.context(HttpRequestSnafu { kind, id })?;
        let status = response.status();
        let body = response.text().await.context(HttpRequestSnafu { kind, id })?;

        let envelope: ActionResponse<T> = serde_json::from_str(&body).context(
            DecodeResponseSnafu { kind, id, status: status.as_u16() },
        )?;

        if envelope.success {
            return envelope.result.map(Some).context(MissingResultSnafu { kind, id });
        }

        match envelope.error {
            Some(error) if error.type_ == NOT_FOUND_ERROR => {
                tracing::debug!(%kind, id, "Catalog does not know this id");
                Ok(None)
            }
            error => {
                let (error_type, message) = error.map_or_else(
                    || (String::new(), String::new()),
                    |error| {
                        let message = error.message();
                        (error.type_, message)
                    },
                );
                tracing::error!(%kind, id, %status, %error_type, %message, "Catalog action failed");
                Err(Error::ActionFailed { kind, id: id.to_string(), error_type, message })
            }
        }
    }

    async fn show_many<T>(
        &self,
        kind: MetadataKind,
        ids: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, T>, Error>
    where
        T: DeserializeOwned,
    {
        let mut records = BTreeMap::new();
        for id in ids {
            if let Some(record) = self.show(kind, id).await? {
                drop(records.insert(id.clone(), record));
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl MetadataClient for Client {
    async fn fetch_users(
        &self,
        ids: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, UserMetadata>, Error> {
        self.show_many(MetadataKind::User, ids).await
    }

    async fn fetch_packages(
        &self,
        ids: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, DatasetMetadata>, Error> {
        self.show_many(MetadataKind::Package, ids).await
    }
}
