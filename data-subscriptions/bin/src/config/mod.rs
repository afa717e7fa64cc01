mod catalog;
mod error;
mod notification;
mod sendgrid;

use std::path::{Path, PathBuf};

use data_subscriptions_cli_common::config::LogConfig;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::{ensure, ResultExt};

pub use self::{
    catalog::CatalogConfig, error::Error, notification::NotificationConfig,
    sendgrid::SendGridConfig,
};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub sendgrid: SendGridConfig,

    #[serde(default)]
    pub notification: NotificationConfig,
}

impl Config {
    #[inline]
    pub fn default_path() -> PathBuf {
        [
            data_subscriptions_core::PROJECT_CONFIG_DIR.to_path_buf(),
            PathBuf::from(data_subscriptions_core::CONFIG_NAME),
        ]
        .into_iter()
        .collect()
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let data = std::fs::read_to_string(&path)
            .context(error::OpenConfigSnafu { filename: path.as_ref().to_path_buf() })?;

        Self::from_yaml(&data, path.as_ref())
    }

    fn from_yaml(data: &str, filename: &Path) -> Result<Self, Error> {
        let mut config: Self = serde_yaml::from_str(data)
            .context(error::ParseConfigSnafu { filename: filename.to_path_buf() })?;

        config.log.file_path = match config.log.file_path.map(|path| {
            path.try_resolve()
                .map(|path| path.to_path_buf())
                .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
        }) {
            Some(Ok(path)) => Some(path),
            Some(Err(err)) => return Err(err),
            None => None,
        };

        Ok(config)
    }

    /// Splits off the logger setup and checks the settings every mail needs.
    pub fn into_runtime(self) -> Result<(LogConfig, data_subscriptions_core::config::Config), Error> {
        let Self { log, catalog, sendgrid, notification } = self;

        ensure!(!sendgrid.api_key.is_empty(), error::MissingSendGridApiKeySnafu);
        ensure!(!notification.template_id.is_empty(), error::MissingTemplateIdSnafu);

        Ok((
            log,
            data_subscriptions_core::config::Config {
                catalog: catalog.into(),
                sendgrid: sendgrid.into(),
                notification: notification.into(),
            },
        ))
    }
}
