//! MCP transports (stdio + streamable HTTP) for the calendar tool handler.

use std::sync::Arc;

use rmcp::serve_server;
use rmcp::transport::streamable_http_server::tower::{
    StreamableHttpServerConfig, StreamableHttpService,
};

pub use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
pub use rmcp::ServerHandler;

use crate::tools::dispatcher::Dispatcher;
use crate::tools::mcp_router::CalendarSvc;

/// Speak MCP JSON-RPC over stdin/stdout until the peer disconnects.
pub async fn serve_stdio(
    dispatcher: Arc<Dispatcher>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!("serving MCP over stdio");
    let running = serve_server(
        CalendarSvc::new(dispatcher),
        (tokio::io::stdin(), tokio::io::stdout()),
    )
    .await?;
    running.waiting().await?;
    Ok(())
}

/// Streamable HTTP service (POST frames, GET SSE) to mount at `/mcp`.
/// Each session gets its own handler over the shared dispatcher.
pub fn make_streamable_http_service(
    dispatcher: Arc<Dispatcher>,
    session_mgr: Arc<LocalSessionManager>,
) -> StreamableHttpService<CalendarSvc, LocalSessionManager> {
    let cfg = StreamableHttpServerConfig::default();
    let service_factory = move || Ok(CalendarSvc::new(dispatcher.clone()));
    StreamableHttpService::new(service_factory, session_mgr, cfg)
}
