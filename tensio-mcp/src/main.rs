//! Tensio MCP Server
//!
//! Line-delimited JSON-RPC over stdio. Logs go to stderr.
//!
//! Tools:
//! - stats: describe, percentile, correlate, regress, t_test, compare_periods, ...
//! - insights: bp_trend, week_over_week, exercise/diet/medication correlation, insights, ...
//! - help, list_tools

mod config;
mod server;

use config::ServerConfig;
use server::{McpError, McpRequest, McpResponse, Server, PROTOCOL_VERSION};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn encode(response: &McpResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(
            r#"{{"jsonrpc":"2.0","error":{{"code":{},"message":"Response serialization failed: {}"}}}}"#,
            server::INTERNAL_ERROR,
            e.to_string().replace('"', "'")
        )
    })
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let (config, config_err) = match ServerConfig::from_env() {
        Ok(c) => (c, None),
        Err(e) => (ServerConfig::default(), Some(e)),
    };
    init_tracing(&config);
    if let Some(e) = config_err {
        warn!(error = %e, "invalid config, using defaults");
    }

    info!(version = env!("CARGO_PKG_VERSION"), protocol = PROTOCOL_VERSION, "tensio MCP server started");

    let server = Server::new(&config);
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    info!("server ready, waiting for requests");

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("client disconnected (EOF)");
                break;
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(bytes = line.len(), "received");

        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => match server.handle(&request) {
                Some(response) => response,
                None => continue,
            },
            Err(e) => {
                warn!(error = %e, "error parsing request");
                McpResponse::error(None, McpError::parse_error(e))
            }
        };

        let mut out = encode(&response);
        out.push('\n');
        if let Err(e) = stdout.write_all(out.as_bytes()).await {
            error!(error = %e, "error writing response");
            break;
        }
        if let Err(e) = stdout.flush().await {
            error!(error = %e, "error flushing stdout");
            break;
        }
    }

    info!("server shutting down");
    Ok(())
}
