use std::net::SocketAddr;

use academy_service::bootstrap::initialize_admin_user;
use academy_service::rabbitmq_service::rabbitmq_service::RabbitMQService;
use academy_service::redis_service::init_redis_connection;
use academy_service::static_service::get_database_connection;
use academy_service::{app, config::APP_CONFIG, utils::tracing::init_standard_tracing};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    let db_connection = get_database_connection().await;

    Migrator::up(db_connection, None)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    match RabbitMQService::connection().await {
        Ok(connection) => {
            match RabbitMQService::create_mail_queue(connection, &APP_CONFIG.mail_queue).await {
                Ok(()) => tracing::info!("Create rabbitmq queue successfully"),
                Err(e) => tracing::error!("Failed to create mail queue: {}", e),
            }
        }
        Err(e) => {
            tracing::error!("Failed to connect to RabbitMQ: {}", e);
            tracing::warn!("Continuing without mail delivery...");
        }
    }

    tracing::info!("Initializing Redis connection...");
    if let Err(e) = init_redis_connection().await {
        tracing::error!("Failed to initialize Redis connection: {}", e);
        tracing::warn!("Continuing without Redis (logout blacklist disabled)...");
    } else {
        tracing::info!("Redis connection initialized successfully");
    }

    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(db_connection).await {
        tracing::error!("Failed to initialize admin user: {}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    let app = app::create_app().await?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(&http_address)
        .await
        .with_context(|| format!("Failed to bind {http_address}"))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server stopped unexpectedly")?;

    Ok(())
}
