use clap::Parser;
use php_api_mcp::{client, logging};

/// Drives a php-api-mcp server through its startup handshake.
#[derive(Parser)]
#[command(name = "php-api-mcp-client", version)]
struct Args {
    /// Server executable
    #[arg(long, default_value = "php-api-mcp")]
    server: String,
    /// Arguments forwarded to the server
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    server_args: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();

    let mut conn = client::StdioClient::spawn(&args.server, &args.server_args)?;
    let replies = client::handshake(&mut conn).await?;
    for (method, reply) in ["initialize", "tools/list"].iter().zip(&replies) {
        println!("{method} response: {reply}");
    }
    conn.shutdown().await
}
