use anyhow::Context;
use helpdesk_api::{
    adapters::outbound::memory::seed_sample_tickets, config::read_config, domain, factory, router,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "helpdesk_api=info,vector_index=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("invalid log filter")?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    let settings = read_config().context("failed to read configuration")?;
    let components = factory::build(&settings).context("failed to build services")?;

    if settings.application.seed_sample_tickets {
        seed_sample_tickets(components.ticket_store.as_ref()).await?;
    }

    tokio::spawn(domain::run_promotion_worker(
        components.promotion_scanner,
        settings.promotion.interval(),
    ));

    let app = router::create(components.app_state, settings.application.app_url.clone());

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
