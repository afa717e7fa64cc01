//! # Notification Crate
//!
//! This crate provides functionality for sending notifications via various
//! channels. Currently supports transactional emails rendered from SendGrid
//! dynamic templates.
//!
//! ## Features
//!
//! - SendGrid v3 mail send integration
//! - Dynamic template data passed through as JSON
//! - Provider error bodies surfaced in logs and errors
//! - Async/await support

mod error;
pub mod sendgrid;

use async_trait::async_trait;
pub use error::Error;

/// Represents different types of notifications that can be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// An email rendered by the provider from a stored template.
    TemplateEmail {
        /// The recipient's email address.
        to: String,
        /// The email subject.
        subject: String,
        /// Identifier of the template stored at the provider.
        template_id: String,
        /// Values for the template placeholders.
        template_data: serde_json::Value,
    },
}

impl Notification {
    /// The recipient's email address.
    #[must_use]
    pub fn recipient(&self) -> &str {
        let Self::TemplateEmail { to, .. } = self;
        to
    }
}

/// Trait for notification clients that can send notifications.
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// Sends a notification. Exactly one delivery attempt is made.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification fails to send.
    async fn send_notification(&self, notification: &Notification) -> Result<(), Error>;
}
