use std::net::SocketAddr;
use std::sync::Arc;

use crate::clients::google_calendar::GoogleConnector;
use crate::infra::config::Config;
use crate::tools::dispatcher::Dispatcher;

pub fn build_dispatcher(cfg: &Config) -> Arc<Dispatcher> {
    Arc::new(Dispatcher::new(Arc::new(GoogleConnector::from_config(cfg))))
}

pub async fn run_server(cfg: Config) -> anyhow::Result<()> {
    cfg.validate()?;
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        credentials = cfg.google.has_key(),
        "BOOT calendar-mcp-gateway"
    );

    let dispatcher = build_dispatcher(&cfg);
    // Warm up eagerly; a failure here is retried on the first tool call.
    if let Err(e) = dispatcher.ensure_ready().await {
        tracing::warn!(error = %e, "calendar provider not ready");
    }

    if cfg.mode == "stdio" {
        crate::infra::runtime::mcp_transport::serve_stdio(dispatcher)
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = crate::infra::http_app::build_app(dispatcher);
    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
