//! Command-line interface for connect_four_live.

use clap::{Parser, Subcommand};

/// Connect Four Live - real-time two-player Connect Four over a room relay
#[derive(Parser, Debug)]
#[command(name = "connect_four_live")]
#[command(about = "Real-time Connect Four over a websocket room relay", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the room relay server
    Relay {
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Play a game from the terminal
    Play {
        /// Relay websocket URL
        #[arg(long, default_value = "ws://127.0.0.1:3000/ws")]
        relay_url: String,

        /// Invitation token from the Main player; omit it to be Main and
        /// create the room yourself
        #[arg(long)]
        invitation: Option<String>,
    },
}
