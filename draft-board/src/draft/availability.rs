// Availability filtering: which players are still on the board.

use std::collections::HashSet;

use crate::players::{PlayerRecord, PlayerTable, PlayerTables, Position};

use super::plan::PlanEntry;
use super::session::SessionState;

/// Players of `table` that are neither picked nor on the user's team,
/// sorted by ascending rank. Ties keep file order.
///
/// Always recomputed from scratch; nothing is cached between renders.
pub fn available_players<'a>(table: &'a PlayerTable, state: &SessionState) -> Vec<&'a PlayerRecord> {
    let taken: HashSet<&str> = state
        .picked
        .iter()
        .chain(state.my_team.iter())
        .map(String::as_str)
        .collect();

    let mut available: Vec<&PlayerRecord> = table
        .players
        .iter()
        .filter(|p| !taken.contains(p.name.as_str()))
        .collect();
    available.sort_by_key(|p| p.rank);
    available
}

/// Narrow rows to a single position, preserving order.
pub fn at_position<'a>(rows: &[&'a PlayerRecord], position: Position) -> Vec<&'a PlayerRecord> {
    rows.iter().copied().filter(|p| p.position == position).collect()
}

/// The top `limit` rows by rank at `position`.
///
/// Excludes nothing beyond the position filter; callers decide which rows
/// go in (the draft board hands in the available rows).
pub fn candidate_pool<'a>(
    rows: &[&'a PlayerRecord],
    position: Position,
    limit: usize,
) -> Vec<&'a PlayerRecord> {
    let mut pool = at_position(rows, position);
    pool.sort_by_key(|p| p.rank);
    pool.truncate(limit);
    pool
}

/// Selectable players for one draft round: the top `limit` available rows
/// of the round's table at the round's position.
pub fn round_pool<'a>(
    tables: &'a PlayerTables,
    state: &SessionState,
    entry: &PlanEntry,
    limit: usize,
) -> Vec<&'a PlayerRecord> {
    let available = available_players(tables.table(entry.side), state);
    candidate_pool(&available, entry.position, limit)
}

/// Names the user may mark as picked: every known player across both tables
/// (offense first, each table by rank) that is not already picked.
pub fn removal_candidates<'a>(tables: &'a PlayerTables, state: &SessionState) -> Vec<&'a str> {
    let picked: HashSet<&str> = state.picked.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    let mut offense: Vec<&PlayerRecord> = tables.offense.players.iter().collect();
    offense.sort_by_key(|p| p.rank);
    let mut defense: Vec<&PlayerRecord> = tables.defense.players.iter().collect();
    defense.sort_by_key(|p| p.rank);

    offense
        .into_iter()
        .chain(defense)
        .map(|p| p.name.as_str())
        .filter(|name| !picked.contains(name))
        .filter(|name| seen.insert(*name))
        .collect()
}
