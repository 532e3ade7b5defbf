// The fixed round-by-round draft plan.

use serde::Serialize;

use crate::players::{Position, Side};

/// Which table and position feed one round's pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub round: u32,
    pub side: Side,
    pub position: Position,
}

const fn entry(round: u32, side: Side, position: Position) -> PlanEntry {
    PlanEntry {
        round,
        side,
        position,
    }
}

/// Rounds 1..=21 in order. Round 21 asks the offense table for a linebacker,
/// which never matches; its pick form stays empty.
pub const DRAFT_PLAN: [PlanEntry; 21] = [
    entry(1, Side::Offense, Position::RB),
    entry(2, Side::Offense, Position::RB),
    entry(3, Side::Defense, Position::LB),
    entry(4, Side::Offense, Position::QB),
    entry(5, Side::Offense, Position::WR),
    entry(6, Side::Defense, Position::LB),
    entry(7, Side::Offense, Position::RB),
    entry(8, Side::Defense, Position::LB),
    entry(9, Side::Offense, Position::WR),
    entry(10, Side::Offense, Position::RB),
    entry(11, Side::Defense, Position::DL),
    entry(12, Side::Defense, Position::DB),
    entry(13, Side::Defense, Position::LB),
    entry(14, Side::Defense, Position::DB),
    entry(15, Side::Defense, Position::DL),
    entry(16, Side::Offense, Position::TE),
    entry(17, Side::Offense, Position::K),
    entry(18, Side::Offense, Position::WR),
    entry(19, Side::Offense, Position::RB),
    entry(20, Side::Offense, Position::RB),
    entry(21, Side::Offense, Position::LB),
];

/// Look up the plan entry for a 1-based round.
pub fn plan_entry(round: u32) -> Option<&'static PlanEntry> {
    DRAFT_PLAN.iter().find(|e| e.round == round)
}

pub fn total_rounds() -> u32 {
    DRAFT_PLAN.len() as u32
}
