//! Liftoff round server.
//!
//! Serves the round HTTP API and the WebSocket broadcast hub. Round events
//! and chat messages are pushed to every connected session.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin liftoff-server
//! cargo run --bin liftoff-server -- --host 0.0.0.0 --port 3000 --synthetic-participants 6
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use liftoff_server::{
    bootstrap,
    domain::{MAX_SYNTHETIC_PARTICIPANTS, RoundSettings, Wager},
    ui::Server,
};
use liftoff_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "liftoff-server")]
#[command(about = "Crash-style round server with a WebSocket broadcast hub", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Tick period in milliseconds at speed factor 1
    #[arg(long, default_value = "100")]
    base_interval_ms: u64,

    /// Number of engine-driven participants
    #[arg(
        long,
        default_value = "4",
        value_parser = clap::value_parser!(u16).range(0..=MAX_SYNTHETIC_PARTICIPANTS as i64)
    )]
    synthetic_participants: u16,

    /// Starting balance of the primary participant, in points
    #[arg(long, default_value = "1000")]
    starting_balance: u64,

    /// Display name of the primary participant
    #[arg(long, default_value = "me")]
    primary_name: String,
}

impl Args {
    fn round_settings(&self) -> RoundSettings {
        RoundSettings {
            base_interval: Duration::from_millis(self.base_interval_ms.max(1)),
            synthetic_participants: usize::from(self.synthetic_participants),
            starting_balance: Wager::from_points(self.starting_balance),
            primary_name: self.primary_name.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let settings = args.round_settings();
    tracing::info!(
        "Roster: '{}' + {} synthetic participant(s), base tick {:?}",
        settings.primary_name,
        settings.synthetic_participants,
        settings.base_interval
    );

    let app = bootstrap::build(settings, Arc::new(SystemClock));
    let runtime = app.runtime.clone();

    let server = Server::new(app.state);
    let result = server.run(args.host, args.port).await;

    runtime.shutdown().await;

    if let Err(e) = result {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
