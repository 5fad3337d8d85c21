use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::{
    ServerError, ServerResult, TRACING_TARGET_SHUTDOWN, TRACING_TARGET_STARTUP, shutdown_signal,
};
use crate::config::ServerConfig;

/// Binds the configured address and serves `app` until SIGINT or SIGTERM.
///
/// After the signal, in-flight listings get the configured shutdown timeout
/// to finish. Connections still open after that are dropped and
/// [`ServerError::ShutdownTimeout`] is returned.
pub async fn serve_http(app: Router, config: &ServerConfig) -> ServerResult<()> {
    config
        .validate()
        .map_err(|err| ServerError::InvalidConfig(format!("{err:#}")))?;

    let address = config.server_addr();
    let listener = TcpListener::bind(address).await.map_err(|source| {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            %address,
            error = %source,
            "Cannot bind listener"
        );
        ServerError::Bind { address, source }
    })?;

    tracing::info!(target: TRACING_TARGET_STARTUP, %address, "Serving listings");
    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_STARTUP,
            "Listening on all interfaces, restrict access with firewall rules"
        );
    }

    let started = Instant::now();
    let result = serve_until(listener, app, shutdown_signal(), config.shutdown_timeout()).await;

    match &result {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            uptime_secs = started.elapsed().as_secs(),
            "Server stopped"
        ),
        Err(error) => tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            uptime_secs = started.elapsed().as_secs(),
            %error,
            "Server stopped with an error"
        ),
    }

    result
}

/// Serves `app` on `listener` until `signal` resolves, then drains for at
/// most `grace`.
pub(crate) async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace: Duration,
) -> ServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let draining = Arc::new(Notify::new());
    let notify = Arc::clone(&draining);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        signal.await;
        notify.notify_one();
    })
    .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result.map_err(ServerError::Runtime),
        () = draining.notified() => {}
    }

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        grace_secs = grace.as_secs_f32(),
        "Draining in-flight listings"
    );

    match tokio::time::timeout(grace, server).await {
        Ok(result) => result.map_err(ServerError::Runtime),
        Err(_) => Err(ServerError::ShutdownTimeout(grace)),
    }
}
