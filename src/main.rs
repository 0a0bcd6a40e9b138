use std::{future::IntoFuture, net::SocketAddr, process, sync::Arc, time::Duration};

use rengoring::{
    application::{auth::TokenVerifier, error::AppError},
    config,
    infra::{
        error::InfraError,
        http::{self, ApiRateLimiter, ApiState},
        memory::InMemoryRepositories,
        telemetry,
    },
};
use tokio::sync::Notify;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let secret = settings.auth.jwt_secret.as_deref().ok_or_else(|| {
        AppError::from(InfraError::configuration(
            "auth.jwt_secret must be set to serve the API",
        ))
    })?;

    let repositories = if settings.data.seed_mock_data {
        InMemoryRepositories::seeded()
    } else {
        InMemoryRepositories::empty()
    };

    let rate_limiter = ApiRateLimiter::new(
        Duration::from_secs(settings.api_rate_limit.window_seconds.get().into()),
        settings.api_rate_limit.max_requests.get(),
    );

    let state = ApiState::in_memory(
        Arc::new(repositories),
        TokenVerifier::new(secret, settings.auth.leeway_seconds),
        rate_limiter,
    );

    serve_http(&settings, state).await
}

async fn serve_http(settings: &config::Settings, state: ApiState) -> Result<(), AppError> {
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(
        target = "rengoring::server",
        addr = %settings.server.addr,
        "listening"
    );

    let draining = Arc::new(Notify::new());
    let drain_signal = draining.clone();
    let server = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { drain_signal.notified().await })
    .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result.map_err(server_error),
        () = shutdown_signal() => {}
    }

    info!(
        target = "rengoring::server",
        grace_seconds = settings.server.graceful_shutdown.as_secs(),
        "shutdown requested; draining connections"
    );
    draining.notify_one();

    match tokio::time::timeout(settings.server.graceful_shutdown, server).await {
        Ok(result) => result.map_err(server_error),
        Err(_) => {
            warn!(
                target = "rengoring::server",
                "graceful shutdown timed out; dropping remaining connections"
            );
            Ok(())
        }
    }
}

fn server_error(err: std::io::Error) -> AppError {
    AppError::unexpected(format!("server error: {err}"))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
