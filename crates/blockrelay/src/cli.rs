use clap::Parser;

/// blockrelay — HTTP bridge to an Ethereum-compatible JSON-RPC node.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// JSON-RPC endpoint of the node. Falls back to the public Polygon
    /// endpoint when unset or empty.
    #[arg(long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Address to bind the web server to.
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on.
    #[arg(long, default_value = "8080", env = "PORT")]
    pub port: u16,

    /// Per-request timeout for calls to the node, in seconds.
    #[arg(long, default_value = "10")]
    pub rpc_timeout_secs: u64,
}
