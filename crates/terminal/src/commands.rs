//! Parsing of terminal input lines.

use std::path::PathBuf;
use std::str::FromStr;

use game_session::PreviewMode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Play a move given in coordinate notation.
    Move(String),
    /// Let the engine move on its turn in a human-vs-engine game.
    Go,
    Undo(usize),
    Preview { thinking: bool },
    Next,
    Prev,
    Reset,
    Pause,
    Resume,
    Mode(PreviewMode),
    Tick,
    Accept,
    Dismiss,
    Think,
    Fen,
    Save(PathBuf),
    Board,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty line")]
    Empty,
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{command}` expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

pub const HELP: &str = "\
Commands:
  move <uci> | <uci>   play a move, e.g. e2e4 or a7a8q
  go                   engine moves when it is its turn, e.g. after undo
  undo [n]             take back n moves (default 1)
  preview [think]      search and load the ghost line
  next | prev          step the ghost line
  reset                back to the start of the ghost line
  pause | resume       stop or restart auto play
  mode auto|step       auto play or step-through
  tick                 one auto-play step
  accept               play the shown ghost moves
  dismiss              drop the ghost line
  think                describe the position
  fen                  print the position as FEN
  save <path>          write the game as JSON
  board                print the board
  quit";

fn looks_like_move(word: &str) -> bool {
    word.parse::<chess_core::Move>().is_ok()
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, args)) = parts.split_first() else {
            return Err(CommandError::Empty);
        };

        let cmd = match head.to_ascii_lowercase().as_str() {
            "move" | "m" => match args {
                [mv] => Command::Move(mv.to_string()),
                _ => {
                    return Err(CommandError::BadArgument {
                        command: "move",
                        expected: "one move such as e2e4",
                    })
                }
            },
            "go" => Command::Go,
            "undo" | "u" => match args {
                [] => Command::Undo(1),
                [n] => Command::Undo(n.parse().map_err(|_| CommandError::BadArgument {
                    command: "undo",
                    expected: "a move count",
                })?),
                _ => {
                    return Err(CommandError::BadArgument {
                        command: "undo",
                        expected: "at most one move count",
                    })
                }
            },
            "preview" | "p" => Command::Preview {
                thinking: args.first().is_some_and(|a| *a == "think"),
            },
            "next" | "n" => Command::Next,
            "prev" | "b" => Command::Prev,
            "reset" => Command::Reset,
            "pause" => Command::Pause,
            "resume" => Command::Resume,
            "mode" => match args {
                ["auto"] => Command::Mode(PreviewMode::AutoPlay),
                ["step"] => Command::Mode(PreviewMode::StepThrough),
                _ => {
                    return Err(CommandError::BadArgument {
                        command: "mode",
                        expected: "`auto` or `step`",
                    })
                }
            },
            "tick" | "t" => Command::Tick,
            "accept" => Command::Accept,
            "dismiss" => Command::Dismiss,
            "think" => Command::Think,
            "fen" => Command::Fen,
            "save" => match args {
                [path] => Command::Save(PathBuf::from(path)),
                _ => {
                    return Err(CommandError::BadArgument {
                        command: "save",
                        expected: "a file path",
                    })
                }
            },
            "board" | "d" => Command::Board,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ if args.is_empty() && looks_like_move(head) => Command::Move(head.to_string()),
            _ => return Err(CommandError::Unknown(head.to_string())),
        };
        Ok(cmd)
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
