//! Example: Send a dynamic template email using the SendGrid API.
//!
//! # Prerequisites
//!
//! 1. Create a dynamic template in SendGrid and note its id
//! 2. Set `SENDGRID_API_KEY` and `SENDGRID_TEMPLATE_ID` environment variables
//! 3. Configure the sender identity and recipient email
//!
//! # Usage
//!
//! ```bash
//! export SENDGRID_API_KEY="SG.xxxx"
//! export SENDGRID_TEMPLATE_ID="d-xxxx"
//! cargo run --example send_template_email
//! ```

use notification::{
    sendgrid::{Client, Config},
    Notification, NotificationClient,
};

#[tokio::main]
async fn main() -> Result<(), notification::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Replace with your verified sender identity
    let config = Config {
        api_key: std::env::var("SENDGRID_API_KEY").unwrap_or_default(),
        from_email: "noreply@yourdomain.com".to_string(),
        from_name: "Data Portal".to_string(),
        api_url: Config::default_api_url(),
    };

    let client = Client::new(config)?;

    let notification = Notification::TemplateEmail {
        to: "user@example.com".to_string(),
        subject: "A dataset you have subscribed to has been updated".to_string(),
        template_id: std::env::var("SENDGRID_TEMPLATE_ID").unwrap_or_default(),
        template_data: serde_json::json!({
            "user": { "id": "user-1", "email": "user@example.com", "name": "Example User" },
            "datasets": [{ "id": "dataset-1", "name": "air-quality", "title": "Air Quality" }],
        }),
    };

    tracing::info!("Sending template email");
    client.send_notification(&notification).await?;

    tracing::info!("Email sent successfully");
    Ok(())
}
