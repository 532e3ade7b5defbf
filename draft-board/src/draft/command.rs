// User commands: validated mutations of a session's draft state.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::BoardConfig;
use crate::players::PlayerTables;

use super::availability::round_pool;
use super::plan::plan_entry;
use super::session::SessionState;

/// The three actions the board exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    /// Mark a player as taken by any team.
    RemovePlayer { name: String },
    /// Put a picked player back on the board.
    UndoPlayer { name: String },
    /// Draft a player onto the user's team for a round.
    PickPlayer { round: u32, name: String },
}

/// What applying a command did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Valid but nothing to change (decided round, undo of an unpicked name).
    Unchanged,
}

/// A submission that cannot be applied. The state is left untouched and the
/// message is shown inline on the next render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no player selected")]
    EmptySelection,

    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    #[error("{0} is already off the board")]
    AlreadyPicked(String),

    #[error("{name} is not a candidate for round {round}")]
    NotInPool { round: u32, name: String },

    #[error("round {0} is not part of the draft plan")]
    UnknownRound(u32),
}

/// Validate `cmd` against the current state and apply it.
pub fn apply(
    state: &mut SessionState,
    tables: &PlayerTables,
    board: &BoardConfig,
    cmd: Command,
) -> Result<Outcome, CommandError> {
    match cmd {
        Command::RemovePlayer { name } => {
            let name = selected(&name)?;
            if !tables.is_known(name) {
                return Err(CommandError::UnknownPlayer(name.to_string()));
            }
            if state.is_picked(name) {
                return Err(CommandError::AlreadyPicked(name.to_string()));
            }
            if state.is_on_my_team(name) {
                warn!("'{}' is on my team and is now also marked picked", name);
            }
            state.remove_player(name);
            info!("Removed {} from the board ({} picked)", name, state.picked.len());
            Ok(Outcome::Applied)
        }
        Command::UndoPlayer { name } => {
            let name = selected(&name)?;
            if state.undo_player(name) {
                info!("Put {} back on the board ({} picked)", name, state.picked.len());
                Ok(Outcome::Applied)
            } else {
                warn!("undo requested for '{}', which is not picked", name);
                Ok(Outcome::Unchanged)
            }
        }
        Command::PickPlayer { round, name } => {
            let entry = plan_entry(round).ok_or(CommandError::UnknownRound(round))?;

            if let Some(existing) = state.pick_for_round(round) {
                debug!("Round {} already decided ({}), ignoring pick", round, existing);
                return Ok(Outcome::Unchanged);
            }

            let name = selected(&name)?;
            let pool = round_pool(tables, state, entry, board.candidate_pool_size);
            if !pool.iter().any(|p| p.name == name) {
                return Err(CommandError::NotInPool {
                    round,
                    name: name.to_string(),
                });
            }

            let next_round = state.my_team.len() + 1;
            if round as usize != next_round {
                debug!(
                    "Pick submitted for round {} while round {} is next; appending anyway",
                    round, next_round
                );
            }

            state.draft_player(name);
            info!("Round {} pick: {}", round, name);
            Ok(Outcome::Applied)
        }
    }
}

fn selected(name: &str) -> Result<&str, CommandError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(CommandError::EmptySelection)
    } else {
        Ok(trimmed)
    }
}
