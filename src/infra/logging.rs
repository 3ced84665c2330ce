use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Safe to call more than once.
///
/// Output goes to stderr: in stdio mode stdout carries MCP frames.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Histogram sample labelled by tool (or remote operation), mirrored at debug.
pub fn log_metric(tool: &str, metric: &str, value: f64) {
    metrics::histogram!(metric.to_owned(), "tool" => tool.to_owned()).record(value);
    tracing::debug!(tool, metric, value, "metric");
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_twice_keeps_first_subscriber() {
        super::init();
        super::init();
    }

    #[test]
    fn log_metric_without_recorder_is_a_noop() {
        super::log_metric("list_events", "latency_ms", 1.5);
    }
}
