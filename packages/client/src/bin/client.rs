//! Liftoff CLI client.
//!
//! Connects to the round server's broadcast hub and sends typed lines as chat
//! messages. `/start`, `/reset`, `/speed`, `/state` and `/ranking` drive the
//! round over the HTTP API; round events are printed as they arrive.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin liftoff-client -- --name alice
//! cargo run --bin liftoff-client -- -n bob --url ws://127.0.0.1:3000/ws --api-url http://127.0.0.1:3000
//! ```

use clap::Parser;

use liftoff_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "liftoff-client")]
#[command(about = "CLI client for the Liftoff round server", long_about = None)]
struct Args {
    /// Name shown as the sender of your chat messages
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket endpoint of the broadcast hub
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Root URL of the round HTTP API
    #[arg(short = 'a', long, default_value = "http://127.0.0.1:8080")]
    api_url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = liftoff_client::run_client(args.url, args.api_url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
