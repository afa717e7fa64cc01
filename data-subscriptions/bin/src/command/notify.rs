use std::{future::Future, path::Path, process};

use data_subscriptions_core::{
    config::Config as CoreConfig,
    model::{NotificationCandidate, Subscription},
    NotificationDecision, UnsubscribeNotificationDecision, PROGRAM_NAME,
};
use snafu::{ensure, ResultExt};
use tokio::runtime::Runtime;

use crate::{
    config::Config,
    error,
    error::Result,
    shadow::{PKG_VERSION, SHORT_COMMIT},
};

/// Emails every candidate listed in the JSON file at `input`.
#[allow(clippy::result_large_err)]
pub fn run_notify(config: Config, input: &Path) -> Result<()> {
    let data = std::fs::read_to_string(input)
        .context(error::ReadCandidatesSnafu { path: input.to_path_buf() })?;
    let candidates: Vec<NotificationCandidate> = serde_json::from_str(&data)
        .context(error::ParseCandidatesSnafu { path: input.to_path_buf() })?;

    run(config, |config| notify(config, candidates))
}

/// Emails `user_id` that `dataset_id` is no longer subscribable.
#[allow(clippy::result_large_err)]
pub fn run_notify_non_subscribable(config: Config, dataset_id: &str, user_id: &str) -> Result<()> {
    let subscription = Subscription::new(dataset_id, user_id);

    run(config, |config| notify_non_subscribable(config, subscription))
}

async fn notify(config: CoreConfig, candidates: Vec<NotificationCandidate>) -> Result<()> {
    let (catalog, mailer) = clients(&config)?;

    tracing::info!("Dispatching notifications for {} candidates", candidates.len());
    let report = NotificationDecision::new(&catalog, &mailer, &config.notification)
        .dispatch_batch(&candidates)
        .await;

    ensure!(
        report.is_complete(),
        error::IncompleteBatchSnafu { failed: report.failed.len(), total: report.total() }
    );
    Ok(())
}

async fn notify_non_subscribable(config: CoreConfig, subscription: Subscription) -> Result<()> {
    let (catalog, mailer) = clients(&config)?;

    let outcome = UnsubscribeNotificationDecision::new(&catalog, &mailer, &config.notification)
        .decide_and_dispatch(&subscription)
        .await?;

    tracing::info!("Non-subscribable dataset notification outcome: {outcome:?}");
    Ok(())
}

#[allow(clippy::result_large_err)]
fn clients(config: &CoreConfig) -> Result<(catalog::ckan::Client, notification::sendgrid::Client)> {
    let catalog = catalog::ckan::Client::new(config.catalog.clone())
        .context(error::CreateCatalogClientSnafu)?;
    let mailer = notification::sendgrid::Client::new(config.sendgrid.clone())
        .context(error::CreateMailClientSnafu)?;

    Ok((catalog, mailer))
}

/// Sets up logging and a Tokio runtime, then drives `job` to completion.
#[allow(clippy::result_large_err)]
fn run<F, Fut>(config: Config, job: F) -> Result<()>
where
    F: FnOnce(CoreConfig) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let (log, config) = config.into_runtime()?;

    log.init().context(error::InitializeLoggerSnafu)?;

    tracing::info!(
        "{PROGRAM_NAME} {PKG_VERSION} ({SHORT_COMMIT}) is starting, pid: {}",
        process::id()
    );

    tracing::info!("Initializing Tokio runtime");

    let exit_status = match Runtime::new().context(error::InitializeTokioRuntimeSnafu) {
        Ok(runtime) => runtime.block_on(job(config)),
        Err(err) => Err(err),
    };

    if let Err(ref error) = exit_status {
        tracing::error!(%error);
    }

    tracing::info!("{PROGRAM_NAME} is finished");
    exit_status
}
