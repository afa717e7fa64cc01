use std::collections::{BTreeMap, BTreeSet, HashMap};

use catalog::{DatasetMetadata, MetadataClient, MetadataKind, UserMetadata};
use snafu::ResultExt;

use crate::{error, Result};

/// Metadata fetched during a single decision.
///
/// Every id is requested from the catalog at most once, including ids the
/// catalog does not know. A cache is meant to live no longer than the decision
/// that created it.
pub struct MetadataCache<'a, M: ?Sized> {
    client: &'a M,
    users: HashMap<String, Option<UserMetadata>>,
    datasets: HashMap<String, Option<DatasetMetadata>>,
}

impl<'a, M> MetadataCache<'a, M>
where
    M: MetadataClient + ?Sized,
{
    #[inline]
    pub fn new(client: &'a M) -> Self {
        Self { client, users: HashMap::new(), datasets: HashMap::new() }
    }

    /// # Errors
    ///
    /// Returns an error if the user is not cached yet and the catalog lookup
    /// fails.
    pub async fn user(&mut self, id: &str) -> Result<Option<UserMetadata>> {
        if !self.users.contains_key(id) {
            let ids = BTreeSet::from([id.to_string()]);
            let mut found = self
                .client
                .fetch_users(&ids)
                .await
                .context(error::FetchMetadataSnafu { kind: MetadataKind::User })?;

            let _ = self.users.insert(id.to_string(), found.remove(id));
        }

        Ok(self.users.get(id).cloned().flatten())
    }

    /// Resolves `ids`, fetching all the uncached ones with a single catalog
    /// call. Unknown ids are absent from the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog lookup fails.
    pub async fn datasets(
        &mut self,
        ids: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, DatasetMetadata>> {
        let missing: BTreeSet<String> =
            ids.iter().filter(|id| !self.datasets.contains_key(*id)).cloned().collect();

        if !missing.is_empty() {
            let mut found = self
                .client
                .fetch_packages(&missing)
                .await
                .context(error::FetchMetadataSnafu { kind: MetadataKind::Package })?;

            for id in missing {
                let dataset = found.remove(&id);
                let _ = self.datasets.insert(id, dataset);
            }
        }

        Ok(ids
            .iter()
            .filter_map(|id| {
                let dataset = self.datasets.get(id)?.clone()?;
                Some((id.clone(), dataset))
            })
            .collect())
    }

    /// # Errors
    ///
    /// Returns an error if the dataset is not cached yet and the catalog
    /// lookup fails.
    pub async fn dataset(&mut self, id: &str) -> Result<Option<DatasetMetadata>> {
        let ids = BTreeSet::from([id.to_string()]);
        Ok(self.datasets(&ids).await?.remove(id))
    }
}
