use std::sync::Arc;

use intervals_strain_client::config::Config;
use intervals_strain_client::http_client::ReqwestIntervalsClient;
use intervals_strain_mcp::StrainMcpHandler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = intervals_strain_mcp::logging::init();
    tracing::info!("intervals_strain_mcp: log filter: {}", filter);

    let config = Config::from_env()?;
    let client = ReqwestIntervalsClient::from_config(&config);
    let handler = StrainMcpHandler::new(Arc::new(client));

    tracing::info!(
        "intervals_strain_mcp: registered {} tools and {} prompts",
        handler.tool_count(),
        handler.prompt_count()
    );
    tracing::info!("intervals_strain_mcp: starting stdio MCP server...");

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let server = rmcp::serve_server(handler, transport).await?;
    server.waiting().await?;

    Ok(())
}
