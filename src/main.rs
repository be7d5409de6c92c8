use std::{process, sync::Arc, time::Duration};

use pressroom::{
    application::{admin::posts::AdminPostService, error::AppError},
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{AdminState, build_admin_router},
        telemetry,
    },
};
use sqlx::postgres::PgPool;
use tracing::{Dispatch, Level, dispatcher, error, info};
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

    telemetry::init(&settings.logging)?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let pool = connect(&settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| InfraError::database(format!("failed to run migrations: {err}")))?;

    let repos = Arc::new(PostgresRepositories::new(pool));
    let posts = AdminPostService::new(repos.clone(), repos.clone());

    let token = settings.admin.token.clone().ok_or_else(|| {
        InfraError::configuration(
            "admin.token must be set (PRESSROOM_ADMIN__TOKEN or --admin-token) to serve",
        )
    })?;

    let state = AdminState {
        posts,
        health: repos,
        admin_token: token.into(),
    };

    let router = build_admin_router(state);
    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::Io)?;

    info!(addr = %settings.server.addr, "admin surface listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(settings.server.graceful_shutdown))
        .await
        .map_err(InfraError::Io)?;

    info!("shutdown complete");
    Ok(())
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let pool = connect(&settings).await?;
    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| InfraError::database(format!("failed to run migrations: {err}")))?;

    info!("migrations applied");
    Ok(())
}

async fn connect(settings: &config::Settings) -> Result<PgPool, AppError> {
    let url = settings
        .database
        .url
        .as_deref()
        .ok_or_else(|| InfraError::configuration("database.url must be set"))?;

    let pool = PostgresRepositories::connect(url, settings.database.max_connections.get())
        .await
        .map_err(|err| InfraError::database(format!("failed to connect: {err}")))?;

    Ok(pool)
}

async fn shutdown_signal(drain: Duration) {
    wait_for_signal().await;
    info!("shutdown signal received, draining connections");

    // Bound the drain so a stuck connection cannot hold the process open.
    tokio::spawn(async move {
        tokio::time::sleep(drain).await;
        error!("graceful shutdown window elapsed, exiting");
        process::exit(1);
    });
}

async fn wait_for_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
