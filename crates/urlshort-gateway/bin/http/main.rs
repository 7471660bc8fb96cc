mod cli;

use crate::cli::{DynamicArgs, Mode, StaticArgs, StorageBackendArg, CLI};
use anyhow::Context;
use axum::Router;
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use urlshort_gateway::{App, MappingSource};
use urlshort_generator::RandomGenerator;
use urlshort_shortener::{Shortener, ShortenerService};
use urlshort_storage::{InMemoryStore, RedisStore, Storage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    urlshort_telemetry::init(config.log_format).context("failed to initialise logging")?;

    let router = match &config.mode {
        Mode::Static(args) => static_router(args).await?,
        Mode::Dynamic(args) => dynamic_router(args).await?,
    };
    let app = App::with_layers(router, config.request_timeout());

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(
        listen_addr = %listener.local_addr()?,
        request_timeout_secs = config.request_timeout_secs,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    info!("bye bye");
    Ok(())
}

async fn static_router(args: &StaticArgs) -> anyhow::Result<Router> {
    let source = MappingSource::select(args.yaml.as_deref(), args.json.as_deref())?;
    let table = source
        .load()
        .await
        .with_context(|| format!("failed to load mappings from {}", source.path().display()))?;

    Ok(App::static_router(Arc::new(table), App::hello_router()))
}

async fn dynamic_router(args: &DynamicArgs) -> anyhow::Result<Router> {
    info!(
        storage_backend = %args.storage,
        expiration_minutes = args.expiration_minutes,
        max_attempts = args.max_attempts,
        public_base_url = %args.public_base_url,
        "starting dynamic mode"
    );

    let shortener = match args.storage {
        StorageBackendArg::InMemory => {
            let store = InMemoryStore::new(args.expiration_minutes)?;
            shortener(store, args.max_attempts)
        }
        StorageBackendArg::Redis => {
            let config = args.redis_config();
            let store = RedisStore::connect(&config).await.with_context(|| {
                format!("failed to connect to redis at {}:{}", config.host, config.port)
            })?;
            shortener(store, args.max_attempts)
        }
    };

    Ok(App::dynamic_router(shortener, args.public_base_url.clone()))
}

fn shortener<S: Storage>(store: S, max_attempts: u32) -> Arc<dyn Shortener> {
    Arc::new(ShortenerService::new(store, RandomGenerator::new()).with_max_attempts(max_attempts))
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}
