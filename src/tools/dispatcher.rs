//! Uniform `(name, arguments)` invocation surface over the registered tools.
//!
//! The provider connection is created on first use through the injected
//! [`CalendarConnector`]. Concurrent first callers wait on the same
//! initialization; a failed attempt leaves the dispatcher uninitialized so the
//! next call tries again.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OnceCell;

use crate::core::content::ToolResult;
use crate::core::error::GatewayError;
use crate::core::tool::ToolDescriptor;
use crate::domain::{CalendarConnector, CalendarProvider};
use crate::infra::logging::log_metric;
use crate::tools::registry::{build_registry, ToolRegistry};

pub struct Dispatcher {
    registry: ToolRegistry,
    connector: Arc<dyn CalendarConnector>,
    calendar: OnceCell<Arc<dyn CalendarProvider>>,
}

impl Dispatcher {
    pub fn new(connector: Arc<dyn CalendarConnector>) -> Self {
        Self::with_registry(build_registry(), connector)
    }

    pub fn with_registry(registry: ToolRegistry, connector: Arc<dyn CalendarConnector>) -> Self {
        Self {
            registry,
            connector,
            calendar: OnceCell::new(),
        }
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.registry.list()
    }

    pub fn is_ready(&self) -> bool {
        self.calendar.initialized()
    }

    /// Connect to the provider unless already connected.
    pub async fn ensure_ready(&self) -> Result<Arc<dyn CalendarProvider>, GatewayError> {
        self.calendar
            .get_or_try_init(|| async {
                tracing::info!("connecting calendar provider");
                let calendar = self.connector.connect().await;
                if let Err(e) = &calendar {
                    tracing::warn!(error = %e, "calendar provider connection failed");
                }
                calendar
            })
            .await
            .map(Arc::clone)
    }

    pub async fn call_tool(
        &self,
        name: &str,
        arguments: &serde_json::Value,
    ) -> Result<ToolResult, GatewayError> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| GatewayError::UnknownTool(name.to_owned()))?;
        tracing::debug!(tool = name, "tool call");
        metrics::counter!("tool_calls_total", "tool" => tool.name()).increment(1);

        let start = Instant::now();
        let res = match self.ensure_ready().await {
            Ok(calendar) => tool.call(calendar.as_ref(), arguments).await,
            Err(e) => Err(e),
        };
        log_metric(tool.name(), "latency_ms", start.elapsed().as_millis() as f64);

        if let Err(e) = &res {
            metrics::counter!("tool_errors_total", "tool" => tool.name(), "kind" => e.kind())
                .increment(1);
            tracing::warn!(tool = name, error = %e, "tool call failed");
        }
        res
    }
}
