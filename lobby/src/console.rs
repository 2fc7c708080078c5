//! Line-at-a-time driver over an [`Arcade`].

use crate::{
    arcade::Arcade,
    command::{self, Command, CommandError},
    render,
};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Print(String),
    /// Blank line, nothing to say.
    Skip,
    Quit,
}

pub struct Console {
    arcade: Arcade,
}

impl Console {
    pub fn new(arcade: Arcade) -> Self {
        Self { arcade }
    }

    pub fn arcade(&self) -> &Arcade {
        &self.arcade
    }

    pub fn banner(&self) -> String {
        format!(
            "welcome to the arcade, balance {} (type 'help')",
            self.arcade.balance()
        )
    }

    pub async fn handle(&self, line: &str) -> Flow {
        let command = match command::parse(line) {
            Ok(Command::Quit) => return Flow::Quit,
            Ok(command) => command,
            Err(CommandError::Empty) => return Flow::Skip,
            Err(err) => return Flow::Print(err.to_string()),
        };
        debug!(?command, "command");

        let mut out = self.run(command).await;
        if let Some(balance) = self.arcade.rescue_offer() {
            out.push_str(&format!(
                "\nbalance is down to {balance}: type 'rescue' for a fresh stake"
            ));
        }
        Flow::Print(out)
    }

    async fn run(&self, command: Command) -> String {
        let arcade = &self.arcade;
        let played = match command {
            Command::Wager(wager) => arcade.submit_wager(wager).await,
            Command::Action(game, action) => arcade.player_action(game, action).await,
            Command::Balance => return format!("balance {}", arcade.balance()),
            Command::Rescue => {
                return match arcade.accept_rescue() {
                    Ok(balance) => format!("rescued, balance {balance}"),
                    Err(err) => describe(&err),
                }
            }
            Command::Mute => {
                return match arcade.toggle_mute() {
                    Ok(true) => "sound off".to_string(),
                    Ok(false) => "sound on".to_string(),
                    Err(err) => describe(&err),
                }
            }
            Command::History => {
                return match arcade.history().to_json_lines() {
                    Ok(lines) if lines.is_empty() => "no rounds yet".to_string(),
                    Ok(lines) => lines.trim_end().to_string(),
                    Err(err) => format!("could not render history: {err}"),
                }
            }
            Command::Paytable => return render::paytables(arcade.paytable()),
            Command::Help => return render::HELP.to_string(),
            Command::Quit => return String::new(),
        };

        match played {
            Ok(reply) => format!(
                "{}\nbalance {}",
                render::reply(&reply),
                arcade.balance()
            ),
            Err(err) => err.to_string(),
        }
    }
}

/// The error and its causes on one line.
fn describe(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        cause = inner.source();
    }
    text
}
