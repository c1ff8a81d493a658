use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

mod rpc;

use rpc::RpcClient;

#[derive(Parser)]
#[command(name = "edgegate", about = "edgegate CLI - call MCP tools through the gateway")]
struct Cli {
    /// Gateway URL
    #[arg(long, env = "EDGEGATE_URL", default_value = "http://localhost:8000")]
    url: String,

    /// Endpoint path (/mcp, /read or /write)
    #[arg(long, default_value = "/mcp")]
    path: String,

    /// Bearer token forwarded to the backend
    #[arg(long, env = "EDGEGATE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tools served by the endpoint
    Tools,

    /// Call a tool and print its result
    Call {
        /// Tool name
        name: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Check the gateway is answering
    Ping,

    /// Print the server descriptor returned by `initialize`
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let client = RpcClient::new(&cli.url, &cli.path, cli.token);

    match cli.command {
        Commands::Tools => {
            let result = client.call("tools/list", json!({})).await?;
            for tool in result["tools"].as_array().into_iter().flatten() {
                println!(
                    "{:<20} {}",
                    tool["name"].as_str().unwrap_or_default(),
                    tool["description"].as_str().unwrap_or_default()
                );
            }
        }
        Commands::Call { name, args } => {
            let arguments: Value = serde_json::from_str(&args)?;
            if !arguments.is_object() {
                anyhow::bail!("--args must be a JSON object");
            }
            let result = client
                .call("tools/call", json!({ "name": name, "arguments": arguments }))
                .await?;
            for text in rpc::content_text(&result) {
                match serde_json::from_str::<Value>(text) {
                    Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                    Err(_) => println!("{text}"),
                }
            }
        }
        Commands::Ping => {
            client.call("ping", json!({})).await?;
            println!("ok");
        }
        Commands::Info => {
            let result = client.call("initialize", json!({})).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
