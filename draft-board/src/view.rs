// View model: the whole page as a plain render tree.
//
// `build_view` is re-run from scratch on every request against the current
// session state. It holds no state of its own; the only inputs besides the
// tables and the session are the two position selectors and an optional
// notice from the last submitted form.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::draft::availability::{at_position, available_players, removal_candidates, round_pool};
use crate::draft::plan::DRAFT_PLAN;
use crate::draft::session::SessionState;
use crate::players::{PlayerRecord, PlayerTables, Position, Side};

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Positions chosen in the offense and defense selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSelection {
    pub offense: Position,
    pub defense: Position,
}

impl Default for ViewSelection {
    fn default() -> Self {
        ViewSelection {
            offense: Side::Offense.positions()[0],
            defense: Side::Defense.positions()[0],
        }
    }
}

impl ViewSelection {
    /// Build a selection from raw query values. Missing, unknown, or
    /// wrong-side positions fall back to the side's first position.
    pub fn from_query(offense: Option<&str>, defense: Option<&str>) -> Self {
        let defaults = ViewSelection::default();
        ViewSelection {
            offense: parse_for_side(offense, Side::Offense).unwrap_or(defaults.offense),
            defense: parse_for_side(defense, Side::Defense).unwrap_or(defaults.defense),
        }
    }
}

fn parse_for_side(raw: Option<&str>, side: Side) -> Option<Position> {
    let pos = Position::from_str_pos(raw?)?;
    side.positions().contains(&pos).then_some(pos)
}

// ---------------------------------------------------------------------------
// Render tree
// ---------------------------------------------------------------------------

/// The complete page.
#[derive(Debug, Clone, Serialize)]
pub struct DraftView {
    pub title: String,
    /// Inline message from the last rejected form submission.
    pub notice: Option<String>,
    pub selection: ViewSelection,
    pub summary: SummaryPanel,
    pub remove_form: SelectForm,
    pub undo_form: SelectForm,
    pub offense: PositionPanel,
    pub defense: PositionPanel,
    pub board: Vec<RoundWidget>,
}

/// Team summary and draft log.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryPanel {
    pub team_name: String,
    pub my_team: Vec<String>,
    /// Most recent picked players, newest first.
    pub draft_log: Vec<String>,
}

/// A dropdown plus submit button.
#[derive(Debug, Clone, Serialize)]
pub struct SelectForm {
    pub label: String,
    pub submit: String,
    pub options: Vec<String>,
}

impl SelectForm {
    /// An empty form renders disabled instead of submitting nothing.
    pub fn is_disabled(&self) -> bool {
        self.options.is_empty()
    }
}

/// Position selector and the available players at the selected position.
#[derive(Debug, Clone, Serialize)]
pub struct PositionPanel {
    pub side: Side,
    pub positions: Vec<Position>,
    pub selected: Position,
    pub rows: Vec<PlayerRecord>,
}

/// One round of the draft board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state")]
pub enum RoundWidget {
    /// The user already has a pick for this round; read-only.
    Decided { round: u32, name: String },
    /// Still open: choose from the round's candidate pool.
    Pending {
        round: u32,
        side: Side,
        position: Position,
        options: Vec<String>,
    },
}

impl RoundWidget {
    pub fn round(&self) -> u32 {
        match self {
            RoundWidget::Decided { round, .. } | RoundWidget::Pending { round, .. } => *round,
        }
    }

    /// Success line shown for a decided round, e.g. "#3 Pick: Roquan Smith".
    pub fn decided_label(&self) -> Option<String> {
        match self {
            RoundWidget::Decided { round, name } => Some(format!("#{round} Pick: {name}")),
            RoundWidget::Pending { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the page for the given session state.
pub fn build_view(
    tables: &PlayerTables,
    state: &SessionState,
    config: &Config,
    selection: ViewSelection,
    notice: Option<String>,
) -> DraftView {
    let summary = SummaryPanel {
        team_name: config.app.team_name.clone(),
        my_team: state.my_team.clone(),
        draft_log: state
            .recent_picks(config.board.draft_log_len)
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    let remove_form = SelectForm {
        label: "Picked Player".into(),
        submit: "Remove Player".into(),
        options: removal_candidates(tables, state)
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    let undo_form = SelectForm {
        label: "Undo Picked Player".into(),
        submit: "Undo".into(),
        options: state.picked.clone(),
    };

    let offense = position_panel(tables, state, Side::Offense, selection.offense);
    let defense = position_panel(tables, state, Side::Defense, selection.defense);

    let board = DRAFT_PLAN
        .iter()
        .map(|entry| match state.pick_for_round(entry.round) {
            Some(name) => RoundWidget::Decided {
                round: entry.round,
                name: name.to_string(),
            },
            None => RoundWidget::Pending {
                round: entry.round,
                side: entry.side,
                position: entry.position,
                options: round_pool(tables, state, entry, config.board.candidate_pool_size)
                    .into_iter()
                    .map(|p| p.name.clone())
                    .collect(),
            },
        })
        .collect();

    debug!(
        "Built view: {} picked, {} on my team, offense {} / defense {}",
        state.picked.len(),
        state.my_team.len(),
        selection.offense,
        selection.defense
    );

    DraftView {
        title: config.app.title.clone(),
        notice,
        selection,
        summary,
        remove_form,
        undo_form,
        offense,
        defense,
        board,
    }
}

fn position_panel(
    tables: &PlayerTables,
    state: &SessionState,
    side: Side,
    selected: Position,
) -> PositionPanel {
    let available = available_players(tables.table(side), state);
    PositionPanel {
        side,
        positions: side.positions().to_vec(),
        selected,
        rows: at_position(&available, selected).into_iter().cloned().collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, BoardConfig, DataPaths, SeedConfig, ServerConfig};
    use crate::players::PlayerTable;

    fn record(rank: u32, name: &str, position: Position) -> PlayerRecord {
        PlayerRecord {
            rank,
            name: name.to_string(),
            position,
            bye: Some(9),
        }
    }

    fn config() -> Config {
        Config {
            app: AppConfig {
                title: "Draft Assistent".into(),
                team_name: "Super Smash Bros.".into(),
            },
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8501,
                secure_cookies: false,
            },
            data_paths: DataPaths {
                offense: "data/offense.csv".into(),
                defense: "data/defense.csv".into(),
            },
            board: BoardConfig {
                candidate_pool_size: 15,
                draft_log_len: 15,
            },
            seed: SeedConfig::default(),
        }
    }

    fn tables() -> PlayerTables {
        PlayerTables {
            offense: PlayerTable::new(
                Side::Offense,
                vec![
                    record(1, "Josh Allen", Position::QB),
                    record(2, "Justin Jefferson", Position::WR),
                    record(3, "Derrick Henry", Position::RB),
                    record(4, "Nick Chubb", Position::RB),
                    record(5, "Patrick Mahomes II", Position::QB),
                    record(6, "Aaron Jones", Position::RB),
                ],
            ),
            defense: PlayerTable::new(
                Side::Defense,
                vec![
                    record(1, "Roquan Smith", Position::LB),
                    record(2, "Aaron Donald", Position::DL),
                    record(3, "Fred Warner", Position::LB),
                ],
            ),
        }
    }

    fn my_team_state() -> SessionState {
        SessionState {
            picked: vec!["Josh Allen".into()],
            my_team: vec![
                "Derrick Henry".into(),
                "Nick Chubb".into(),
                "Roquan Smith".into(),
                "Patrick Mahomes II".into(),
            ],
        }
    }

    #[test]
    fn selection_falls_back_per_side() {
        assert_eq!(ViewSelection::from_query(None, None), ViewSelection::default());

        let sel = ViewSelection::from_query(Some("rb"), Some("DB"));
        assert_eq!(sel.offense, Position::RB);
        assert_eq!(sel.defense, Position::DB);

        // LB is a defense position; the offense selector ignores it.
        let sel = ViewSelection::from_query(Some("LB"), Some("QB"));
        assert_eq!(sel.offense, Position::QB);
        assert_eq!(sel.defense, Position::DL);

        let sel = ViewSelection::from_query(Some("nonsense"), None);
        assert_eq!(sel.offense, Position::QB);
    }

    #[test]
    fn decided_rounds_show_my_team_in_order() {
        let view = build_view(
            &tables(),
            &my_team_state(),
            &config(),
            ViewSelection::default(),
            None,
        );

        assert_eq!(view.board.len(), 21);
        assert_eq!(
            view.board[2],
            RoundWidget::Decided {
                round: 3,
                name: "Roquan Smith".into()
            }
        );
        assert_eq!(
            view.board[2].decided_label().as_deref(),
            Some("#3 Pick: Roquan Smith")
        );
        assert!(matches!(view.board[4], RoundWidget::Pending { round: 5, .. }));
        assert!(view.board[4].decided_label().is_none());
        for (i, w) in view.board.iter().enumerate() {
            assert_eq!(w.round(), i as u32 + 1);
        }
    }

    #[test]
    fn pending_round_pool_comes_from_available_rows() {
        let state = SessionState::default();
        let view = build_view(&tables(), &state, &config(), ViewSelection::default(), None);

        match &view.board[0] {
            RoundWidget::Pending {
                side,
                position,
                options,
                ..
            } => {
                assert_eq!(*side, Side::Offense);
                assert_eq!(*position, Position::RB);
                assert_eq!(options, &vec!["Derrick Henry", "Nick Chubb", "Aaron Jones"]);
            }
            other => panic!("expected pending round 1, got {other:?}"),
        }

        // Round 21 asks the offense table for LB: an empty pool, never a panic.
        match &view.board[20] {
            RoundWidget::Pending { options, .. } => assert!(options.is_empty()),
            other => panic!("expected pending round 21, got {other:?}"),
        }
    }

    #[test]
    fn position_panels_show_available_rows_at_selection() {
        let view = build_view(
            &tables(),
            &my_team_state(),
            &config(),
            ViewSelection::from_query(Some("RB"), Some("LB")),
            None,
        );

        let offense_names: Vec<&str> = view.offense.rows.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(offense_names, vec!["Aaron Jones"]);
        assert_eq!(view.offense.selected, Position::RB);
        assert_eq!(view.offense.positions.len(), 5);

        let defense_names: Vec<&str> = view.defense.rows.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(defense_names, vec!["Fred Warner"]);
    }

    #[test]
    fn forms_list_candidates_and_picked() {
        let view = build_view(
            &tables(),
            &my_team_state(),
            &config(),
            ViewSelection::default(),
            None,
        );

        assert!(!view.remove_form.options.contains(&"Josh Allen".to_string()));
        assert!(view.remove_form.options.contains(&"Derrick Henry".to_string()));
        assert_eq!(view.undo_form.options, vec!["Josh Allen"]);
        assert!(!view.undo_form.is_disabled());
    }

    #[test]
    fn draft_log_is_last_fifteen_newest_first() {
        let state = SessionState {
            picked: (1..=20).map(|i| format!("Player {i}")).collect(),
            my_team: vec![],
        };
        let view = build_view(&tables(), &state, &config(), ViewSelection::default(), None);

        let expected: Vec<String> = (6..=20).rev().map(|i| format!("Player {i}")).collect();
        assert_eq!(view.summary.draft_log, expected);
        assert_eq!(view.summary.team_name, "Super Smash Bros.");
    }

    #[test]
    fn empty_undo_form_is_disabled() {
        let view = build_view(
            &tables(),
            &SessionState::default(),
            &config(),
            ViewSelection::default(),
            Some("no player selected".into()),
        );
        assert!(view.undo_form.is_disabled());
        assert_eq!(view.notice.as_deref(), Some("no player selected"));
        assert_eq!(view.title, "Draft Assistent");
    }

    #[test]
    fn view_serializes_round_state_tag() {
        let view = build_view(
            &tables(),
            &my_team_state(),
            &config(),
            ViewSelection::default(),
            None,
        );
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["board"][0]["state"], "Decided");
        assert_eq!(json["board"][0]["name"], "Derrick Henry");
        assert_eq!(json["board"][4]["state"], "Pending");
        assert_eq!(json["selection"]["offense"], "QB");
    }
}
