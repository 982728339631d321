//! Ghost Chess terminal
//!
//! Play against the classical engine from a terminal and step through the
//! engine's ghost preview of the expected continuation.

mod commands;
mod render;

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chess_core::Position;
use game_session::{GameConfig, GameMode, GameRecord, GameSession, SessionResult};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Command, HELP};

fn print_usage() {
    println!("Ghost Chess");
    println!();
    println!("Usage:");
    println!("  ghost-chess [--config FILE] [--fen FEN | --load FILE]");
    println!();
    println!("Options:");
    println!("  --config FILE   TOML game configuration");
    println!("  --fen FEN       start from this position");
    println!("  --load FILE     resume a saved JSON game record");
    println!();
    println!("Set RUST_LOG=debug for search details.");
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    fen: Option<String>,
    load: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().context("--config needs a file")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--fen" => parsed.fen = Some(iter.next().context("--fen needs a position")?.clone()),
            "--load" => {
                let path = iter.next().context("--load needs a file")?;
                parsed.load = Some(PathBuf::from(path));
            }
            "--help" | "-h" => parsed.help = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    if parsed.fen.is_some() && parsed.load.is_some() {
        bail!("--fen and --load cannot be combined");
    }
    Ok(parsed)
}

fn open_session(args: &Args) -> anyhow::Result<GameSession> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let session = if let Some(fen) = &args.fen {
        let start = Position::from_fen(fen.trim()).context("invalid --fen")?;
        GameSession::from_position(&config, start)?
    } else if let Some(path) = &args.load {
        let record = GameRecord::load(path)?;
        GameSession::from_record(&config, &record)?
    } else {
        GameSession::new(&config)?
    };
    Ok(session)
}

/// Lets the engine move while it is its turn in a human-vs-engine game.
async fn engine_reply(session: &mut GameSession) -> SessionResult<()> {
    if !matches!(session.mode(), GameMode::HumanVsEngine { .. })
        || session.is_game_over()
        || session.is_player_turn()
    {
        return Ok(());
    }
    play_engine(session).await
}

/// Searches on the blocking pool, then plays the reply.
async fn play_engine(session: &mut GameSession) -> SessionResult<()> {
    let reply = session.compute_engine_move().await?;
    let eval = reply.evaluation;
    let mv = session.apply_engine_reply(reply)?;
    println!("engine plays {mv} ({eval:+.2})");
    Ok(())
}

fn show_game(session: &GameSession) {
    let state = session.game_state();
    println!("{}", render::board(&state.position));
    println!("{}", render::status_line(state));
}

/// Runs one command. Returns false when the user quits.
async fn execute(session: &mut GameSession, cmd: Command) -> SessionResult<bool> {
    let preview = session.preview().clone();
    match cmd {
        Command::Move(text) => {
            let mv = session.parse_move(&text)?;
            session.make_player_move(mv)?;
            engine_reply(session).await?;
            show_game(session);
        }
        Command::Go => {
            play_engine(session).await?;
            show_game(session);
        }
        Command::Undo(n) => {
            session.undo_moves(n)?;
            show_game(session);
        }
        Command::Preview { thinking } => {
            let position = session.game_state().position.clone();
            let state = preview.request_preview(position, thinking).await?;
            println!("{}", render::preview(&state));
            if let Some(t) = &state.thinking {
                println!("{}", render::thinking(t));
            }
        }
        Command::Next => println!("{}", render::preview(&preview.step_forward()?)),
        Command::Prev => println!("{}", render::preview(&preview.step_back()?)),
        Command::Reset => println!("{}", render::preview(&preview.reset()?)),
        Command::Pause => println!("{}", render::preview(&preview.pause()?)),
        Command::Resume => println!("{}", render::preview(&preview.resume()?)),
        Command::Mode(mode) => println!("{}", render::preview(&preview.set_mode(mode))),
        Command::Tick => {
            let state = preview.tick();
            println!("{}", render::preview(&state));
            if let Some(pos) = state.current_position() {
                println!("{}", render::board(pos));
            }
        }
        Command::Accept => {
            let moves = session.accept_preview()?;
            println!("accepted {} move(s)", moves.len());
            engine_reply(session).await?;
            show_game(session);
        }
        Command::Dismiss => {
            preview.dismiss();
            println!("{}", render::preview(&preview.state()));
        }
        Command::Think => println!("{}", render::thinking(&session.thinking().await?)),
        Command::Fen => println!("{}", session.game_state().position),
        Command::Save(path) => {
            session.record().save(&path)?;
            println!("saved to {}", path.display());
        }
        Command::Board => show_game(session),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&args)?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let mut session = open_session(&args)?;
    engine_reply(&mut session).await?;
    show_game(&session);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let cmd = match line.parse::<Command>() {
            Ok(cmd) => cmd,
            Err(commands::CommandError::Empty) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match execute(&mut session, cmd).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                warn!(error = %e, "command failed");
                println!("error: {e}");
            }
        }
    }

    session.engine().shutdown();
    info!(moves = session.game_state().moves.len(), "goodbye");
    Ok(())
}
