// Per-session draft state: globally picked players and the user's roster.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::SeedConfig;

/// Mutable state owned by exactly one browser session.
///
/// Both lists hold player names. `picked` is in insertion order (the draft
/// log reads its tail); `my_team` is in draft order, so `my_team[i - 1]` is
/// the user's round `i` pick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Players taken off the board by any team.
    pub picked: Vec<String>,
    /// The user's own drafted roster.
    pub my_team: Vec<String>,
}

impl SessionState {
    /// Build the initial state of a fresh session from the configured seeds.
    pub fn seeded(seed: &SeedConfig) -> Self {
        let state = SessionState {
            picked: seed.picked.clone(),
            my_team: seed.my_team.clone(),
        };
        for name in state.overlap() {
            warn!("seeded player '{}' is both picked and on my team", name);
        }
        state
    }

    pub fn is_picked(&self, name: &str) -> bool {
        self.picked.iter().any(|n| n == name)
    }

    pub fn is_on_my_team(&self, name: &str) -> bool {
        self.my_team.iter().any(|n| n == name)
    }

    /// Whether `name` is excluded from availability by either list.
    pub fn is_taken(&self, name: &str) -> bool {
        self.is_picked(name) || self.is_on_my_team(name)
    }

    /// The last `n` picked names, most recent first.
    pub fn recent_picks(&self, n: usize) -> Vec<&str> {
        self.picked.iter().rev().take(n).map(String::as_str).collect()
    }

    /// Names present in both lists.
    pub fn overlap(&self) -> Vec<&str> {
        self.picked
            .iter()
            .filter(|n| self.is_on_my_team(n))
            .map(String::as_str)
            .collect()
    }

    /// Mark a player as picked by someone.
    pub fn remove_player(&mut self, name: &str) {
        self.picked.push(name.to_string());
    }

    /// Put a picked player back on the board. Removes exactly one occurrence,
    /// the most recent one. Returns false if the name was not picked.
    pub fn undo_player(&mut self, name: &str) -> bool {
        match self.picked.iter().rposition(|n| n == name) {
            Some(idx) => {
                self.picked.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Append a player to the user's roster as the next round's pick.
    pub fn draft_player(&mut self, name: &str) {
        self.my_team.push(name.to_string());
    }

    /// The user's pick for a 1-based round, if that round is decided.
    pub fn pick_for_round(&self, round: u32) -> Option<&str> {
        let idx = (round as usize).checked_sub(1)?;
        self.my_team.get(idx).map(String::as_str)
    }
}
