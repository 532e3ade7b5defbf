// Player rating tables: loading and normalization.
//
// Reads FantasyPros-style ranking exports: `;`-separated, one header row,
// with the columns RK, PLAYER NAME, CLEAN_POS and BYE WEEK. Any other columns
// (TIERS, TEAM, POS, ...) are ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use crate::config::{Config, DataPaths};

/// Header names consulted in a ranking file, in canonical field order
/// (rank, name, position, bye).
pub const REQUIRED_COLUMNS: [&str; 4] = ["RK", "PLAYER NAME", "CLEAN_POS", "BYE WEEK"];

const DELIMITER: u8 = b';';

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Fantasy football positions across both ranking tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    K,
    DL,
    LB,
    DB,
}

impl Position {
    /// Parse a CLEAN_POS value (case-insensitive, surrounding whitespace ignored).
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::QB),
            "RB" => Some(Position::RB),
            "WR" => Some(Position::WR),
            "TE" => Some(Position::TE),
            "K" => Some(Position::K),
            "DL" => Some(Position::DL),
            "LB" => Some(Position::LB),
            "DB" => Some(Position::DB),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::K => "K",
            Position::DL => "DL",
            Position::LB => "LB",
            Position::DB => "DB",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Which ranking table a player (or a draft round) comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Offense,
    Defense,
}

impl Side {
    /// Positions offered by this side's position selector, in display order.
    pub fn positions(&self) -> &'static [Position] {
        match self {
            Side::Offense => &[Position::QB, Position::RB, Position::WR, Position::TE, Position::K],
            Side::Defense => &[Position::DL, Position::LB, Position::DB],
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Side::Offense => "Offense",
            Side::Defense => "Defense",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// One row of a ranking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub rank: u32,
    pub name: String,
    pub position: Position,
    /// Bye week; `None` when the export leaves it blank or writes "-".
    pub bye: Option<u32>,
}

/// A loaded ranking table, rows in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerTable {
    pub side: Side,
    pub players: Vec<PlayerRecord>,
}

impl PlayerTable {
    pub fn new(side: Side, players: Vec<PlayerRecord>) -> Self {
        PlayerTable { side, players }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Both ranking tables, shared read-only by every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerTables {
    pub offense: PlayerTable,
    pub defense: PlayerTable,
}

impl PlayerTables {
    pub fn table(&self, side: Side) -> &PlayerTable {
        match side {
            Side::Offense => &self.offense,
            Side::Defense => &self.defense,
        }
    }

    /// Whether `name` appears in either table.
    pub fn is_known(&self, name: &str) -> bool {
        self.offense.contains(name) || self.defense.contains(name)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("{path} is missing required column `{column}`")]
    MissingColumn { path: String, column: &'static str },

    #[error("{path} line {line}: {message}")]
    Row {
        path: String,
        line: u64,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Raw ranking row. Every field is read as text so that a bad value can be
/// reported with its column name instead of a generic CSV error.
#[derive(Debug, Deserialize)]
struct RawRankingRow {
    #[serde(rename = "RK")]
    rank: String,
    #[serde(rename = "PLAYER NAME")]
    name: String,
    #[serde(rename = "CLEAN_POS")]
    position: String,
    #[serde(rename = "BYE WEEK")]
    bye: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_bye(raw: &str) -> Result<Option<u32>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|_| format!("BYE WEEK `{trimmed}` is not a week number"))
}

// ---------------------------------------------------------------------------
// Reader-based loader (enables testing without temp files)
// ---------------------------------------------------------------------------

/// Parse a ranking table from any reader. `path` is only used in error
/// messages.
pub fn load_table_from_reader<R: Read>(
    rdr: R,
    side: Side,
    path: &str,
) -> Result<PlayerTable, LoadError> {
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::Headers)
        .from_reader(rdr);

    let headers = reader.headers().map_err(csv_err)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn {
                path: path.to_string(),
                column,
            });
        }
    }

    let mut players = Vec::new();
    let mut seen = HashSet::new();

    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Row {
            path: path.to_string(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            message: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row_err = |message: String| LoadError::Row {
            path: path.to_string(),
            line,
            message,
        };

        let raw: RawRankingRow = record
            .deserialize(Some(&headers))
            .map_err(|e| row_err(e.to_string()))?;

        let name = raw.name.trim().to_string();
        if name.is_empty() {
            return Err(row_err("PLAYER NAME is empty".into()));
        }
        let rank = raw
            .rank
            .trim()
            .parse::<u32>()
            .map_err(|_| row_err(format!("RK `{}` is not an integer", raw.rank.trim())))?;
        let bye = parse_bye(&raw.bye).map_err(row_err)?;

        let Some(position) = Position::from_str_pos(&raw.position) else {
            warn!(
                "skipping {} player '{}': unknown CLEAN_POS '{}'",
                side,
                name,
                raw.position.trim()
            );
            continue;
        };

        if !seen.insert(name.clone()) {
            warn!("duplicate {} player '{}', keeping the first row", side, name);
            continue;
        }

        players.push(PlayerRecord {
            rank,
            name,
            position,
            bye,
        });
    }

    Ok(PlayerTable::new(side, players))
}

// ---------------------------------------------------------------------------
// Public path-based loaders
// ---------------------------------------------------------------------------

/// Load one ranking table from a file.
pub fn load_table(path: &Path, side: Side) -> Result<PlayerTable, LoadError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: display.clone(),
        source: e,
    })?;
    load_table_from_reader(file, side, &display)
}

/// Load both tables using paths from the config.
pub fn load_all(config: &Config) -> Result<PlayerTables, LoadError> {
    load_all_from_paths(&config.data_paths)
}

/// Load both tables from explicit paths. Exposed for testing and flexibility.
pub fn load_all_from_paths(paths: &DataPaths) -> Result<PlayerTables, LoadError> {
    let offense = load_table(Path::new(&paths.offense), Side::Offense)?;
    let defense = load_table(Path::new(&paths.defense), Side::Defense)?;
    Ok(PlayerTables { offense, defense })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
