use std::fmt;

use serde::{Deserialize, Serialize};

use super::metrics;

// ---------------------------------------------------------------------------
// Field selectors
// ---------------------------------------------------------------------------

/// Identifier columns a season record may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyField {
    Player,
    Team,
    League,
    Division,
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyField::Player => "playerID",
            KeyField::Team => "teamID",
            KeyField::League => "lgID",
            KeyField::Division => "divID",
        };
        write!(f, "{name}")
    }
}

/// Numeric columns, either stored on a record or derived from stored ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    Hits,
    AtBats,
    HomeRuns,
    RunsBattedIn,
    BattingAverage,
    EarnedRunAverage,
    Wins,
    Games,
    RunsScored,
    RunsAllowed,
    WinningPercentage,
    RunDifferential,
}

impl StatField {
    /// Human readable name, used for series and axis labels.
    pub fn label(self) -> &'static str {
        match self {
            StatField::Hits => "Hits",
            StatField::AtBats => "At Bats",
            StatField::HomeRuns => "Home Runs",
            StatField::RunsBattedIn => "RBIs",
            StatField::BattingAverage => "Batting Average",
            StatField::EarnedRunAverage => "ERA",
            StatField::Wins => "Wins",
            StatField::Games => "Games",
            StatField::RunsScored => "Runs Scored",
            StatField::RunsAllowed => "Runs Allowed",
            StatField::WinningPercentage => "Winning Percentage",
            StatField::RunDifferential => "Run Differential",
        }
    }
}

// ---------------------------------------------------------------------------
// SeasonRecord – what every pipeline stage needs from a row
// ---------------------------------------------------------------------------

/// One row of per-season statistics.
///
/// `key` and `stat` return `None` when the record type does not carry the
/// requested column, or when the value is blank / undefined for this row.
pub trait SeasonRecord {
    fn year(&self) -> i32;
    fn key(&self, field: KeyField) -> Option<&str>;
    fn stat(&self, field: StatField) -> Option<f64>;
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// BattingRecord – one row of Batting.csv
// ---------------------------------------------------------------------------

/// One player's batting line for one season (one stint with one team).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingRecord {
    #[serde(rename = "playerID")]
    pub player_id: String,
    #[serde(rename = "yearID")]
    pub year: i32,
    #[serde(rename = "teamID", default)]
    pub team_id: Option<String>,
    #[serde(rename = "lgID", default)]
    pub league: String,
    #[serde(rename = "H")]
    pub hits: u32,
    #[serde(rename = "AB")]
    pub at_bats: u32,
    #[serde(rename = "HR")]
    pub home_runs: u32,
    /// Blank in some early seasons.
    #[serde(rename = "RBI", default, deserialize_with = "csv::invalid_option")]
    pub rbi: Option<u32>,
}

impl SeasonRecord for BattingRecord {
    fn year(&self) -> i32 {
        self.year
    }

    fn key(&self, field: KeyField) -> Option<&str> {
        match field {
            KeyField::Player => Some(self.player_id.as_str()),
            KeyField::Team => non_blank(&self.team_id),
            KeyField::League => Some(self.league.as_str()).filter(|s| !s.is_empty()),
            KeyField::Division => None,
        }
    }

    fn stat(&self, field: StatField) -> Option<f64> {
        match field {
            StatField::Hits => Some(self.hits as f64),
            StatField::AtBats => Some(self.at_bats as f64),
            StatField::HomeRuns => Some(self.home_runs as f64),
            StatField::RunsBattedIn => self.rbi.map(|v| v as f64),
            StatField::BattingAverage => metrics::batting_average(self.hits, self.at_bats).ok(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PitchingRecord – one row of Pitching.csv
// ---------------------------------------------------------------------------

/// One pitcher's season ERA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchingRecord {
    #[serde(rename = "playerID", default)]
    pub player_id: Option<String>,
    #[serde(rename = "yearID")]
    pub year: i32,
    #[serde(rename = "teamID", default)]
    pub team_id: Option<String>,
    #[serde(rename = "lgID", default)]
    pub league: String,
    /// Blank when the pitcher recorded no outs.
    #[serde(rename = "ERA", default, deserialize_with = "csv::invalid_option")]
    pub era: Option<f64>,
}

impl SeasonRecord for PitchingRecord {
    fn year(&self) -> i32 {
        self.year
    }

    fn key(&self, field: KeyField) -> Option<&str> {
        match field {
            KeyField::Player => non_blank(&self.player_id),
            KeyField::Team => non_blank(&self.team_id),
            KeyField::League => Some(self.league.as_str()).filter(|s| !s.is_empty()),
            KeyField::Division => None,
        }
    }

    fn stat(&self, field: StatField) -> Option<f64> {
        match field {
            StatField::EarnedRunAverage => self.era.filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// TeamSeasonRecord – one row of Teams.csv
// ---------------------------------------------------------------------------

/// One team's season summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonRecord {
    #[serde(rename = "teamID")]
    pub team_id: String,
    #[serde(rename = "yearID")]
    pub year: i32,
    #[serde(rename = "lgID", default)]
    pub league: String,
    /// Divisions only exist from 1969 on.
    #[serde(rename = "divID", default, deserialize_with = "csv::invalid_option")]
    pub division: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "W")]
    pub wins: u32,
    #[serde(rename = "G")]
    pub games: u32,
    #[serde(rename = "R")]
    pub runs: u32,
    #[serde(rename = "RA")]
    pub runs_allowed: u32,
}

impl SeasonRecord for TeamSeasonRecord {
    fn year(&self) -> i32 {
        self.year
    }

    fn key(&self, field: KeyField) -> Option<&str> {
        match field {
            KeyField::Player => None,
            KeyField::Team => Some(self.team_id.as_str()),
            KeyField::League => Some(self.league.as_str()).filter(|s| !s.is_empty()),
            KeyField::Division => non_blank(&self.division),
        }
    }

    fn stat(&self, field: StatField) -> Option<f64> {
        match field {
            StatField::Wins => Some(self.wins as f64),
            StatField::Games => Some(self.games as f64),
            StatField::RunsScored => Some(self.runs as f64),
            StatField::RunsAllowed => Some(self.runs_allowed as f64),
            StatField::WinningPercentage => {
                metrics::winning_percentage(self.wins, self.games).ok()
            }
            StatField::RunDifferential => {
                Some(metrics::run_differential(self.runs, self.runs_allowed) as f64)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Datasets – what one session has loaded
// ---------------------------------------------------------------------------

/// The three raw datasets. `None` means the file was missing or unreadable.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub batting: Option<Vec<BattingRecord>>,
    pub pitching: Option<Vec<PitchingRecord>>,
    pub teams: Option<Vec<TeamSeasonRecord>>,
}

impl Datasets {
    /// Total number of loaded rows across all datasets.
    pub fn len(&self) -> usize {
        self.batting.as_ref().map_or(0, Vec::len)
            + self.pitching.as_ref().map_or(0, Vec::len)
            + self.teams.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which of the three input files a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Batting,
    Pitching,
    Teams,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatasetKind::Batting => "batting",
            DatasetKind::Pitching => "pitching",
            DatasetKind::Teams => "teams",
        };
        write!(f, "{name}")
    }
}
