mod app;
mod config;
mod effects;
mod logging;
mod sessions;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use digest_engine::{fetch_background, WebhookClient};
use digest_logging::digest_info;
use tokio::net::TcpListener;

use self::app::{router, AppState};
use self::config::DigestConfig;
use self::effects::EffectRunner;
use self::sessions::SessionRegistry;
use self::ui::Renderer;

pub async fn run_app() -> anyhow::Result<()> {
    let config = DigestConfig::load().context("loading configuration")?;
    logging::initialize(config.log_destination);
    digest_info!(
        "Starting digest on {} (webhook {}, {} topics, timeout {}s)",
        config.bind_addr,
        config.webhook_url,
        config.topics.len(),
        config.timeout_secs
    );

    let settings = config.fetch_settings();
    let webhook = WebhookClient::new(&config.webhook_url, &settings)
        .context("building webhook client")?;
    let background = fetch_background(&config.template_url, &settings).await;
    let renderer = Renderer::new().context("compiling page template")?;

    let state = AppState {
        title: Arc::from(config.title.as_str()),
        sessions: SessionRegistry::new(config.topics.clone(), config.session_idle_ttl()),
        runner: Arc::new(EffectRunner::new(Arc::new(webhook))),
        renderer: Arc::new(renderer),
        background: Arc::new(background),
    };

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    digest_info!("Listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;
    digest_info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
