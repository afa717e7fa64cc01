//! # Catalog Crate
//!
//! Read-only lookups of user and dataset metadata held by a CKAN catalog.
//!
//! Lookups are keyed by a set of ids and answer with a mapping from id to
//! record. Ids the catalog does not know are simply absent from the mapping;
//! only transport failures and malformed responses are reported as errors.

pub mod ckan;
mod error;

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use self::error::Error;

/// The kind of entity a metadata lookup is made for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetadataKind {
    /// A catalog user, resolved with `user_show`.
    User,
    /// A dataset, resolved with `package_show`.
    Package,
}

impl MetadataKind {
    /// Name of the catalog action serving this kind of entity.
    #[inline]
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::User => "user_show",
            Self::Package => "package_show",
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.action()) }
}

/// A catalog user.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserMetadata {
    pub id: String,

    /// Only exposed to privileged API keys.
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub display_name: String,
}

/// The organization owning a dataset.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Organization {
    pub name: String,

    #[serde(default)]
    pub title: String,
}

/// A catalog dataset (a CKAN "package").
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatasetMetadata {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub organization: Option<Organization>,
}

/// Trait for clients able to resolve catalog metadata by id.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Fetches the users with the given ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is unreachable or answers with a
    /// malformed response. Unknown ids are not an error.
    async fn fetch_users(
        &self,
        ids: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, UserMetadata>, Error>;

    /// Fetches the datasets with the given ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is unreachable or answers with a
    /// malformed response. Unknown ids are not an error.
    async fn fetch_packages(
        &self,
        ids: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, DatasetMetadata>, Error>;
}
