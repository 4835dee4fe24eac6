mod api;
mod dest;
mod flush;
mod sheets;
mod state;
mod telegram;

use anyhow::Context as _;
use chrono::NaiveTime;
use chrono_tz::Tz;
use std::{
    net::{Ipv4Addr, SocketAddrV4},
    path::PathBuf,
};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

pub use api::{Chat, Message, Update, router};
pub use dest::FileDestination;
pub use sheets::SheetsStore;
pub use state::AppState;
pub use telegram::TelegramApi;

/// Everything the server needs, already parsed and validated by the CLI.
pub struct ServerConfig {
    pub bot_token: String,
    pub webhook_url: String,
    pub spreadsheet_id: String,
    pub sheet_range: String,
    pub sheets_token: String,
    pub destination_file: PathBuf,
    pub flush_time: NaiveTime,
    pub timezone: Tz,
    pub port: u16,
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    // Initialize tracing if not already initialized
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "payday=info,payday_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let state = AppState::new(
        SheetsStore::new(
            config.spreadsheet_id,
            config.sheet_range,
            config.sheets_token,
        ),
        TelegramApi::new(&config.bot_token),
        FileDestination::new(config.destination_file),
        config.timezone,
    );

    state
        .messenger
        .set_webhook(&config.webhook_url)
        .await
        .context("failed to register the webhook with the bot api")?;

    let _flush = flush::spawn(state.clone(), config.flush_time);

    let app = router(state);

    let listen = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, config.port);
    let listener = tokio::net::TcpListener::bind(listen).await?;
    tracing::info!("Webhook server listening on http://{}", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
