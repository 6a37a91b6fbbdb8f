use std::{
    fs::OpenOptions,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

use finance_tracker::{
    AppState, build_router, create_app_state, graceful_shutdown, logging_middleware,
};

/// The REST API server for finance_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "FINANCE_DB_PATH", default_value = "finance_db.sqlite")]
    db_path: PathBuf,

    /// Keep entries in memory instead of a database. Entries are lost on exit.
    #[arg(long, env = "FINANCE_IN_MEMORY")]
    in_memory: bool,

    /// The address to serve the API from.
    #[arg(long, env = "FINANCE_HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "FINANCE_PORT", default_value_t = 5000)]
    port: u16,

    /// File path for the debug log.
    #[arg(long, env = "FINANCE_LOG_PATH", default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let state = if args.in_memory {
        tracing::info!("Storing entries in memory");
        AppState::in_memory()
    } else {
        tracing::info!("Storing entries in {}", args.db_path.display());
        let conn = Connection::open(&args.db_path).expect("Could not open database file.");
        create_app_state(conn).expect("Could not initialize the database.")
    };

    let addr = SocketAddr::new(args.host, args.port);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router =
        add_tracing_layer(build_router(state)).layer(middleware::from_fn(logging_middleware));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn setup_logging(log_path: &Path) {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
