//! apicors gateway binary.
//!
//! - Loads `apicors.yaml` (or `$APICORS_CONFIG`)
//! - Serves the demo API behind the CORS layer
//! - SIGHUP re-reads the file and swaps in the new CORS policy

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use apicors_core::error::{CorsError, Result};
use apicors_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "apicors-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = config::config_path();
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = AppState::new(&cfg)?;
    #[cfg(unix)]
    spawn_reload_on_sighup(state.clone(), path);

    let app = router::build_router(state);

    tracing::info!(%listen, "apicors-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| CorsError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| CorsError::Internal(format!("server failed: {e}")))
}

#[cfg(unix)]
fn spawn_reload_on_sighup(state: AppState, path: String) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut hup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "SIGHUP handler unavailable; reload disabled");
                return;
            }
        };
        while hup.recv().await.is_some() {
            tracing::info!(%path, "SIGHUP: reloading cors policy");
            match config::load_from_file(&path) {
                // reload logs its own failure and keeps the previous policy
                Ok(cfg) => {
                    state.reload(&cfg.apicors).ok();
                }
                Err(e) => tracing::warn!(error = %e, "config reload failed"),
            }
        }
    });
}
