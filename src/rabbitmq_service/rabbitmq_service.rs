use crate::config::APP_CONFIG;
use crate::rabbitmq_service::structs::MailMessage;
use anyhow::Context;
use lapin::{BasicProperties, Connection, ConnectionProperties, options::*};
use tokio::sync::OnceCell;

pub static RABBITMQ_CONNECTION: OnceCell<Connection> = OnceCell::const_new();

pub struct RabbitMQService;

impl RabbitMQService {
    pub async fn connection() -> Result<&'static Connection, anyhow::Error> {
        RABBITMQ_CONNECTION
            .get_or_try_init(|| async {
                Connection::connect(&APP_CONFIG.rabbitmq_uri, ConnectionProperties::default())
                    .await
                    .context("Failed to connect to RabbitMQ")
            })
            .await
    }

    pub async fn create_mail_queue(
        connection: &Connection,
        queue: &str,
    ) -> Result<(), anyhow::Error> {
        let channel = connection
            .create_channel()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create RabbitMQ channel: {}", e))?;

        channel
            .queue_declare(queue, QueueDeclareOptions::default(), Default::default())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create RabbitMQ queue: {}", e))?;

        Ok(())
    }

    pub async fn publish_to_mail_queue(
        connection: &Connection,
        queue: &str,
        message: &MailMessage,
    ) -> Result<(), anyhow::Error> {
        let serialize_msg = serde_json::to_string(message)?;

        let channel = connection.create_channel().await?;

        channel
            .basic_publish(
                "",
                queue,
                BasicPublishOptions::default(),
                serialize_msg.as_bytes(),
                BasicProperties::default(),
            )
            .await?;

        Ok(())
    }
}
