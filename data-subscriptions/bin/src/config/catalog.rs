use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Base URL of the CKAN instance.
    #[serde(default = "CatalogConfig::default_url")]
    pub url: Url,

    /// API key of a sysadmin, without it user emails are hidden.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl CatalogConfig {
    #[inline]
    pub fn default_url() -> Url {
        Url::parse("http://localhost:5000").expect("default catalog URL is valid")
    }
}

impl Default for CatalogConfig {
    fn default() -> Self { Self { url: Self::default_url(), api_key: None } }
}

impl From<CatalogConfig> for catalog::ckan::Config {
    fn from(CatalogConfig { url, api_key }: CatalogConfig) -> Self {
        Self { url, api_key: api_key.filter(|key| !key.is_empty()) }
    }
}
