use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    calendar_mcp_gateway::cli::run().await
}
