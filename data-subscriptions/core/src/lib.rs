pub mod config;
pub mod error;
pub mod model;
pub mod template;

mod cache;
mod decision;

use std::{path::PathBuf, sync::LazyLock};

use directories::ProjectDirs;

pub use self::{
    cache::MetadataCache,
    decision::{BatchReport, NotificationDecision, UnsubscribeNotificationDecision},
    error::{Error, Result},
};

pub const PROJECT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PROJECT_NAME: &str = "data-subscriptions";
pub const PROJECT_NAME_WITH_INITIAL_CAPITAL: &str = "Data Subscriptions";

pub const PROGRAM_NAME: &str = "data-subscriptions";
pub const CONFIG_NAME: &str = "data-subscriptions.yaml";

/// Subject of the update email, as configured in the original mailer.
pub const DEFAULT_EMAIL_SUBJECT: &str = "A dataset you have subscribed to has been updated";

pub static PROJECT_CONFIG_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    ProjectDirs::from("", PROJECT_NAME, PROJECT_NAME)
        .expect("Creating `ProjectDirs` should always success")
        .config_dir()
        .to_path_buf()
});
