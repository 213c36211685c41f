use std::net::SocketAddr;
use std::sync::Arc;

use tms_api::{app, AppState};
use tms_carriers::{
    Exporter, Gls, GlsApiConfig, HttpGlsTransport, HttpTransmissionTransport, TcpLabelPrinter,
    Transmission, TransmissionApiConfig,
};
use tms_core::store::OrderStore;
use tms_store::{DbClient, PgOrderStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tms_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = tms_store::app_config::Config::load()?;
    tracing::info!("Starting carrier bridge API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url).await?;
    let store: Arc<dyn OrderStore> = Arc::new(PgOrderStore::new(db.pool.clone()));

    let transmission = Arc::new(Transmission::new(
        store.clone(),
        Arc::new(HttpTransmissionTransport::new(TransmissionApiConfig {
            root_url: config.carriers.transmission.root_url.clone(),
            user: config.carriers.transmission.user.clone(),
            password: config.carriers.transmission.password.clone(),
        })),
    ));
    let gls = Arc::new(Gls::new(
        store.clone(),
        Arc::new(HttpGlsTransport::new(GlsApiConfig {
            root_url: config.carriers.gls.root_url.clone(),
            user: config.carriers.gls.user.clone(),
            password: config.carriers.gls.password.clone(),
        })),
        Arc::new(TcpLabelPrinter::new(config.printer.port)),
    ));
    let exporter = Arc::new(Exporter::new(store, transmission, gls));

    let app = app(AppState { exporter });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
