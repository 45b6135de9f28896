//! Connect Four Live - unified CLI.
//!
//! Runs either the room relay server or a terminal endpoint.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use connect_four_live::{
    Column, GameOutcome, GameSync, MoveTransport, Position, RelayClient, Role, ServerMessage,
    Session, relay,
};
use std::collections::HashMap;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Relay { port, host } => {
            info!("Starting Connect Four Live relay");
            relay::run_relay(&host, port).await
        }
        Command::Play {
            relay_url,
            invitation,
        } => run_play(relay_url, invitation).await,
    }
}

/// Runs one terminal endpoint: bootstrap the role, connect to the relay,
/// then funnel stdin column picks and relay deliveries through the same
/// synchronization component until the game ends.
async fn run_play(relay_url: String, invitation: Option<String>) -> Result<()> {
    let session = Session::from_invitation(invitation.as_deref());
    let (client, mut deliveries) = RelayClient::connect(&relay_url).await?;
    let mut game = GameSync::from_session(client, session)?;
    let role = game.role();

    println!("Connect Four - you are the {role} player");
    match role {
        Role::Main => {
            let room = game.create_room()?;
            println!("Share this invitation with a friend: {room}");
            println!("Waiting for them to make the first move...");
        }
        Role::Invited => {
            println!("Joined room {}. Your move first!", game.room().unwrap_or(""));
        }
    }
    println!("Type a column letter (A-G) to drop a disc, or q to quit.\n");

    // Disc occupancy for the text board, maintained incrementally from
    // each applied move.
    let mut discs: HashMap<Position, Role> = HashMap::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                if input.eq_ignore_ascii_case("q") {
                    break;
                }
                // Main starts a rematch in a fresh room with `n`.
                if input.eq_ignore_ascii_case("n") {
                    if role == Role::Main && game.room().is_none() {
                        let room = game.create_room()?;
                        discs.clear();
                        println!("New game! Share this invitation: {room}");
                    }
                    continue;
                }
                let Some(column) = input.chars().next().and_then(Column::from_letter) else {
                    println!("Pick a column A-G.");
                    continue;
                };
                match game.request_move(column) {
                    Ok(Some(position)) => {
                        discs.insert(position, role);
                        print_board(&discs);
                        report(&game, role);
                    }
                    // Full column, not our turn, or no game: a quiet no-op.
                    Ok(None) => println!("(no move)"),
                    Err(error) => warn!(%error, "Move failed"),
                }
            }
            delivery = deliveries.recv() => {
                let Some(ServerMessage::ReceiveMove { position, by }) = delivery else {
                    println!("Relay connection lost.");
                    break;
                };
                match game.on_remote_move(position, by) {
                    Ok(_) => {
                        discs.insert(position, by);
                        println!("\nOpponent played {position}.");
                        print_board(&discs);
                        report(&game, role);
                    }
                    Err(error) => warn!(%error, "Ignoring bad remote move"),
                }
            }
        }
    }

    Ok(())
}

/// Announces turn state or the final result after a move is applied.
fn report<T: MoveTransport>(game: &GameSync<T>, role: Role) {
    match game.view().outcome {
        GameOutcome::InProgress => {
            if game.is_my_turn() {
                println!("Your move.");
            } else {
                println!("Your opponent's move.");
            }
        }
        GameOutcome::Won(winner) => {
            if winner == role {
                println!("{winner} player wins - congratulations!");
            } else {
                println!("{winner} player wins... you'll get 'em next time.");
            }
            epilogue(role);
        }
        GameOutcome::Draw => {
            println!("No one wins. Aren't ties the best?");
            epilogue(role);
        }
    }
}

fn epilogue(role: Role) {
    match role {
        Role::Main => println!("Type n to start a new game, or q to quit."),
        Role::Invited => println!("Ask for a new invitation to play again, or q to quit."),
    }
}

/// Paints the board: rows top to bottom, `M` for Main, `I` for Invited.
fn print_board(discs: &HashMap<Position, Role>) {
    println!("  A B C D E F G");
    for row in 1..=6u8 {
        print!("{row} ");
        for column in Column::ALL {
            let cell = Position::new(column, row)
                .and_then(|pos| discs.get(&pos))
                .map(|role| match role {
                    Role::Main => 'M',
                    Role::Invited => 'I',
                })
                .unwrap_or('.');
            print!("{cell} ");
        }
        println!();
    }
}
