use crate::api::{self, AppState};
use crate::output::Output;
use axum::extract::Request;
use axum::ServiceExt;
use clap::Args;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use watchlist_config::{Config, PathManager};
use watchlist_core::MovieService;

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides server.host)
    #[arg(long, env = "WATCHLIST_HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port)
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// JSON file holding the movie collection (overrides storage.data_file)
    #[arg(long, value_name = "PATH", env = "WATCHLIST_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Directory of static frontend files (overrides server.static_dir)
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write logs to the default log file (<log dir>/watchlist.log)
    #[arg(long, conflicts_with = "log_file")]
    pub log_to_file: bool,

    /// Disable CORS headers
    #[arg(long)]
    pub no_cors: bool,
}

impl ServeArgs {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data_file) = self.data_file {
            config.storage.data_file = Some(data_file);
        }
        if let Some(static_dir) = self.static_dir {
            config.server.static_dir = Some(static_dir);
        }
        if self.no_cors {
            config.server.cors = false;
        }
    }
}

pub async fn run_serve(args: ServeArgs, mut config: Config, paths: &PathManager, output: &Output) -> Result<()> {
    args.apply(&mut config);
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;

    let service = Arc::new(MovieService::from_config(&config, paths));
    let data_file = service.store().path().to_path_buf();
    if !service.store().exists() {
        info!("No movies file at {:?} yet; it will be created on the first write", data_file);
    }

    let app = api::router(AppState::new(service, config.defaults.page_size), &config.server);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .wrap_err_with(|| format!("Failed to bind {}", config.server.address()))?;
    let addr = listener.local_addr()?;

    info!(address = %addr, data_file = %data_file.display(), "Server started");
    output.success(format!("Server listening on http://{}", addr));
    output.info(format!("API available at http://{}/api/movies", addr));
    if let Some(dir) = &config.server.static_dir {
        output.info(format!("Serving frontend from {}", dir.display()));
    }

    let make_service = ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app);
    axum::serve(listener, make_service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
