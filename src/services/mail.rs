use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::config::APP_CONFIG;
use crate::rabbitmq_service::rabbitmq_service::RabbitMQService;
use crate::rabbitmq_service::structs::MailMessage;

/// Outbound e-mail seam. Delivery is best-effort and never fails the caller.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, text: &str);

    async fn send_to_all(&self, recipients: &[String], subject: &str, text: &str) {
        for to in recipients {
            self.send(to, subject, text).await;
        }
    }
}

pub struct RabbitMqMailer {
    queue: String,
    from: String,
}

impl RabbitMqMailer {
    pub fn new(queue: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            from: from.into(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(
            APP_CONFIG.mail_queue.clone(),
            APP_CONFIG.default_from_email.clone(),
        )
    }
}

#[async_trait]
impl MailSender for RabbitMqMailer {
    async fn send(&self, to: &str, subject: &str, text: &str) {
        let message = MailMessage::send_email(to, subject, text, &self.from);

        let connection = match RabbitMQService::connection().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!("Mail to {} dropped, RabbitMQ unavailable: {}", to, e);
                return;
            }
        };

        match RabbitMQService::publish_to_mail_queue(connection, &self.queue, &message).await {
            Ok(()) => tracing::debug!("Queued mail '{}' to {}", subject, to),
            Err(e) => tracing::warn!("Failed to queue mail to {}: {}", to, e),
        }
    }
}

static DEFAULT_MAILER: Lazy<Arc<dyn MailSender>> =
    Lazy::new(|| Arc::new(RabbitMqMailer::from_config()));

/// Process-wide RabbitMQ mailer built from `APP_CONFIG`.
pub fn default_mailer() -> Arc<dyn MailSender> {
    DEFAULT_MAILER.clone()
}
