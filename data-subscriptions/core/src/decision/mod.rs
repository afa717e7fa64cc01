mod batch;
mod non_subscribable;
mod update;

use notification::{Notification, NotificationClient};
use snafu::ResultExt;

pub use self::{
    batch::BatchReport, non_subscribable::UnsubscribeNotificationDecision,
    update::NotificationDecision,
};
use crate::{config::NotificationConfig, error, template::TemplateData, Result};

/// Sends `template_data` to the user it was built for. One attempt only.
async fn dispatch<S>(
    sender: &S,
    config: &NotificationConfig,
    template_data: &TemplateData,
) -> Result<()>
where
    S: NotificationClient + ?Sized,
{
    let notification = Notification::TemplateEmail {
        to: template_data.user.email.clone(),
        subject: config.subject.clone(),
        template_id: config.template_id.clone(),
        template_data: serde_json::to_value(template_data)
            .context(error::SerializeTemplateDataSnafu)?,
    };

    sender
        .send_notification(&notification)
        .await
        .context(error::DispatchSnafu { recipient: notification.recipient() })
}
