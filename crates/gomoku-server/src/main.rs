//! Gomoku relay server.
//!
//! Configured entirely from the environment (`PORT`, `GOMOKU_HOST`,
//! `GOMOKU_NOTIFY_REJECTIONS`); log verbosity follows `RUST_LOG`.

use gomoku::prelude::*;

#[tokio::main]
async fn main() -> Result<(), GomokuError> {
    init_tracing("info");

    let config = ServerConfig::from_env()?;
    tracing::info!(
        addr = %config.bind_addr(),
        notify_rejections = config.notify_rejections,
        "starting gomoku server"
    );

    let server = GomokuServer::builder().config(config).build().await?;
    tracing::info!(addr = %server.local_addr()?, "listening");

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        })
        .await
}
