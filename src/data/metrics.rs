use super::error::StatsError;
use super::model::{BattingRecord, TeamSeasonRecord};

// ---------------------------------------------------------------------------
// Derived metrics
// ---------------------------------------------------------------------------

/// Hits per at-bat. Zero at-bats is an undefined ratio, not a panic.
pub fn batting_average(hits: u32, at_bats: u32) -> Result<f64, StatsError> {
    ratio(hits, at_bats)
}

/// Wins per game played.
pub fn winning_percentage(wins: u32, games: u32) -> Result<f64, StatsError> {
    ratio(wins, games)
}

/// Runs scored minus runs allowed.
pub fn run_differential(runs: u32, runs_allowed: u32) -> i64 {
    runs as i64 - runs_allowed as i64
}

fn ratio(numerator: u32, denominator: u32) -> Result<f64, StatsError> {
    if denominator == 0 {
        return Err(StatsError::UndefinedRatio {
            numerator,
            denominator,
        });
    }
    Ok(numerator as f64 / denominator as f64)
}

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Per-record summaries handed to the display layer
// ---------------------------------------------------------------------------

/// A team season with its derived metrics attached.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSeasonSummary {
    pub record: TeamSeasonRecord,
    /// `None` when the team played no games.
    pub winning_pct: Option<f64>,
    pub run_differential: i64,
}

impl TeamSeasonSummary {
    pub fn from_record(record: &TeamSeasonRecord) -> Self {
        Self {
            winning_pct: winning_percentage(record.wins, record.games).ok(),
            run_differential: run_differential(record.runs, record.runs_allowed),
            record: record.clone(),
        }
    }
}

/// A batting line with its batting average attached.
#[derive(Debug, Clone, PartialEq)]
pub struct BattingSeasonSummary {
    pub record: BattingRecord,
    pub batting_average: Option<f64>,
}

impl BattingSeasonSummary {
    pub fn from_record(record: &BattingRecord) -> Self {
        Self {
            batting_average: batting_average(record.hits, record.at_bats).ok(),
            record: record.clone(),
        }
    }
}

/// Attach derived team metrics to every record, preserving order.
pub fn summarize_teams(records: &[TeamSeasonRecord]) -> Vec<TeamSeasonSummary> {
    records.iter().map(TeamSeasonSummary::from_record).collect()
}

/// Attach batting averages to every record, preserving order.
pub fn summarize_batting(records: &[BattingRecord]) -> Vec<BattingSeasonSummary> {
    records.iter().map(BattingSeasonSummary::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batting_average_basic() {
        assert_eq!(batting_average(3, 10), Ok(0.3));
    }

    #[test]
    fn zero_at_bats_is_undefined() {
        assert_eq!(
            batting_average(0, 0),
            Err(StatsError::UndefinedRatio {
                numerator: 0,
                denominator: 0
            })
        );
    }

    #[test]
    fn run_differential_can_be_negative() {
        assert_eq!(run_differential(600, 750), -150);
    }

    #[test]
    fn cubs_2015_summary() {
        let record = TeamSeasonRecord {
            team_id: "CHN".into(),
            year: 2015,
            league: "NL".into(),
            division: Some("C".into()),
            name: Some("Chicago Cubs".into()),
            wins: 90,
            games: 162,
            runs: 700,
            runs_allowed: 650,
        };
        let summary = TeamSeasonSummary::from_record(&record);
        assert_eq!(summary.winning_pct.map(|v| round_to(v, 4)), Some(0.5556));
        assert_eq!(summary.run_differential, 50);
    }

    #[test]
    fn undefined_average_does_not_stop_the_rest() {
        let mk = |hits, at_bats| BattingRecord {
            player_id: "p".into(),
            year: 2020,
            team_id: None,
            league: "AL".into(),
            hits,
            at_bats,
            home_runs: 0,
            rbi: Some(0),
        };
        let out = summarize_batting(&[mk(1, 4), mk(0, 0), mk(2, 8)]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].batting_average, Some(0.25));
        assert_eq!(out[1].batting_average, None);
        assert_eq!(out[2].batting_average, Some(0.25));
    }
}
