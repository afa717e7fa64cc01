use url::Url;

#[derive(Clone, Debug)]
pub struct Config {
    pub catalog: catalog::ckan::Config,

    pub sendgrid: notification::sendgrid::Config,

    pub notification: NotificationConfig,
}

/// Settings shared by every notification the decisions dispatch.
#[derive(Clone, Debug)]
pub struct NotificationConfig {
    /// Provider-side template rendering the email.
    pub template_id: String,

    pub subject: String,

    /// Frontend site the dataset links in emails point to.
    pub site_url: Url,
}
