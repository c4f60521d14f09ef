use std::fmt;

use crate::config::{DashboardConfig, FeaturedEntity};
use crate::data::aggregate::{AggregateOp, aggregate_by_year, series_points};
use crate::data::filter::{SeasonFilter, distinct_years, filter, select_entity, sort_by_year};
use crate::data::metrics::{TeamSeasonSummary, round_to, summarize_teams};
use crate::data::model::{
    BattingRecord, DatasetKind, Datasets, KeyField, SeasonRecord, StatField, TeamSeasonRecord,
};
use crate::data::trend::fit_and_extrapolate;

pub const LEAGUE_OPTIONS: [&str; 2] = ["AL", "NL"];
pub const DIVISION_OPTIONS: [&str; 3] = ["C", "E", "W"];

// ---------------------------------------------------------------------------
// Selection – everything a view depends on besides the raw data
// ---------------------------------------------------------------------------

/// The user's current choices, passed explicitly into every computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSelection {
    pub start_year: i32,
    pub end_year: i32,
    /// Season shown by [`DashboardView::YearlyStats`]; latest available if unset.
    pub year: Option<i32>,
    pub league: Option<String>,
    pub division: Option<String>,
}

impl ViewSelection {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            start_year: config.start_year,
            end_year: config.end_year,
            year: None,
            league: None,
            division: None,
        }
    }

    fn range(&self) -> SeasonFilter {
        SeasonFilter::years(self.start_year, self.end_year)
    }
}

// ---------------------------------------------------------------------------
// Output – what the renderer draws
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    /// Connected line with point markers.
    Line,
    /// Unconnected markers.
    Points,
    Bars,
    /// Dashed extrapolation overlay.
    Predicted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    /// Series sharing a key share a colour (observed + predicted).
    pub color_key: String,
    pub style: SeriesStyle,
    pub points: Vec<(i32, f64)>,
}

impl Series {
    fn new(stat: &str, style: SeriesStyle, points: Vec<(i32, f64)>) -> Self {
        let name = match style {
            SeriesStyle::Predicted => format!("Predicted {stat}"),
            _ => stat.to_string(),
        };
        Self {
            name,
            color_key: stat.to_string(),
            style,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub y_label: String,
    pub series: Vec<Series>,
    /// Remarks such as a skipped prediction.
    pub notes: Vec<String>,
}

impl Chart {
    fn new(title: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            series: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }
}

/// Rows of display strings for tabular views.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutput {
    Charts(Vec<Chart>),
    Table { caption: String, table: RecordTable },
    /// The filters matched nothing.
    Empty { reason: String },
    /// A dataset this view needs failed to load.
    Unavailable { missing: DatasetKind },
}

// ---------------------------------------------------------------------------
// DashboardView – one variant per menu entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardView {
    YearlyStats,
    HomeRuns,
    AverageEra,
    AverageBattingAverage,
    PlayerStats,
    FeaturedTeam,
    TeamPerformance,
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DashboardView::YearlyStats => "Yearly Stats",
            DashboardView::HomeRuns => "Home Runs",
            DashboardView::AverageEra => "Average ERA",
            DashboardView::AverageBattingAverage => "Average Batting Average",
            DashboardView::PlayerStats => "Player Stats",
            DashboardView::FeaturedTeam => "Featured Team",
            DashboardView::TeamPerformance => "Team Performance",
        };
        write!(f, "{name}")
    }
}

impl DashboardView {
    pub const ALL: [DashboardView; 7] = [
        DashboardView::YearlyStats,
        DashboardView::HomeRuns,
        DashboardView::AverageEra,
        DashboardView::AverageBattingAverage,
        DashboardView::PlayerStats,
        DashboardView::FeaturedTeam,
        DashboardView::TeamPerformance,
    ];

    /// Run this view's pipeline over the raw datasets.
    pub fn compute(
        self,
        datasets: &Datasets,
        selection: &ViewSelection,
        config: &DashboardConfig,
    ) -> ViewOutput {
        log::debug!("Computing {self} for {selection:?}");
        match self {
            DashboardView::YearlyStats => {
                with_dataset(&datasets.teams, DatasetKind::Teams, |teams| {
                    yearly_stats(teams, selection)
                })
            }
            DashboardView::HomeRuns => {
                with_dataset(&datasets.batting, DatasetKind::Batting, |batting| {
                    home_runs(batting, selection)
                })
            }
            DashboardView::AverageEra => {
                with_dataset(&datasets.pitching, DatasetKind::Pitching, |pitching| {
                    let rows = in_range(pitching, selection);
                    yearly_chart(
                        &rows,
                        StatField::EarnedRunAverage,
                        AggregateOp::Mean,
                        format!("Average ERA in MLB: {}", span(selection)),
                        "Average ERA",
                        SeriesStyle::Line,
                    )
                })
            }
            DashboardView::AverageBattingAverage => {
                with_dataset(&datasets.batting, DatasetKind::Batting, |batting| {
                    let rows = in_range(batting, selection);
                    yearly_chart(
                        &rows,
                        StatField::BattingAverage,
                        AggregateOp::Mean,
                        format!("Average Batting Average (BA) in MLB: {}", span(selection)),
                        "Average Batting Average (BA)",
                        SeriesStyle::Line,
                    )
                })
            }
            DashboardView::PlayerStats => {
                with_dataset(&datasets.batting, DatasetKind::Batting, |batting| {
                    player_stats(batting, selection, config)
                })
            }
            DashboardView::FeaturedTeam => {
                with_dataset(&datasets.teams, DatasetKind::Teams, |teams| {
                    featured_team(teams, selection, &config.featured_team)
                })
            }
            DashboardView::TeamPerformance => {
                with_dataset(&datasets.teams, DatasetKind::Teams, |teams| {
                    team_performance(teams, selection)
                })
            }
        }
    }
}

/// Seasons offered by the year selector of the yearly stats view.
pub fn selectable_years(datasets: &Datasets, selection: &ViewSelection) -> Vec<i32> {
    datasets
        .teams
        .as_deref()
        .map(|teams| distinct_years(&filter(teams, &selection.range())))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Per-view computations
// ---------------------------------------------------------------------------

fn with_dataset<R>(
    rows: &Option<Vec<R>>,
    kind: DatasetKind,
    compute: impl FnOnce(&[R]) -> ViewOutput,
) -> ViewOutput {
    match rows {
        Some(rows) => compute(rows),
        None => ViewOutput::Unavailable { missing: kind },
    }
}

fn in_range<R: SeasonRecord + Clone>(records: &[R], selection: &ViewSelection) -> Vec<R> {
    sort_by_year(filter(records, &selection.range()))
}

fn span(selection: &ViewSelection) -> String {
    format!("{}-{}", selection.start_year, selection.end_year)
}

fn empty_range(what: &str, selection: &ViewSelection) -> ViewOutput {
    ViewOutput::Empty {
        reason: format!("No {what} records in {}", span(selection)),
    }
}

fn yearly_chart<R: SeasonRecord>(
    rows: &[R],
    field: StatField,
    op: AggregateOp,
    title: String,
    y_label: &str,
    style: SeriesStyle,
) -> ViewOutput {
    let yearly = aggregate_by_year(rows, field, op);
    let points = series_points(&yearly);
    if points.is_empty() {
        return ViewOutput::Empty {
            reason: format!("No {} data for the selected seasons", field.label()),
        };
    }

    let mut chart =
        Chart::new(title, y_label).with_series(Series::new(field.label(), style, points));
    let missing: Vec<String> = yearly
        .iter()
        .filter(|(_, agg)| agg.value().is_none())
        .map(|(year, _)| year.to_string())
        .collect();
    if !missing.is_empty() {
        chart.notes.push(format!("No data for {}", missing.join(", ")));
    }
    ViewOutput::Charts(vec![chart])
}

fn home_runs(batting: &[BattingRecord], selection: &ViewSelection) -> ViewOutput {
    let rows = in_range(batting, selection);
    if rows.is_empty() {
        return empty_range("batting", selection);
    }
    yearly_chart(
        &rows,
        StatField::HomeRuns,
        AggregateOp::Sum,
        format!("Home Runs in MLB: {}", span(selection)),
        "Home Runs",
        SeriesStyle::Bars,
    )
}

fn player_stats(
    batting: &[BattingRecord],
    selection: &ViewSelection,
    config: &DashboardConfig,
) -> ViewOutput {
    let mut charts = Vec::new();
    let mut found_any = false;

    for player in &config.featured_players {
        let seasons = sort_by_year(select_entity(
            batting,
            &player.id,
            KeyField::Player,
            selection.start_year,
            selection.end_year,
        ));
        if seasons.is_empty() {
            let mut chart = Chart::new(player.name.clone(), "Count");
            chart.notes.push(format!(
                "No batting records for {} ({}) in {}",
                player.name,
                player.id,
                span(selection)
            ));
            charts.push(chart);
            continue;
        }
        found_any = true;
        charts.extend(player_charts(player, &seasons, selection, config.prediction_horizon));
    }

    if !found_any {
        return ViewOutput::Empty {
            reason: format!("No featured player has batting records in {}", span(selection)),
        };
    }
    ViewOutput::Charts(charts)
}

/// Prediction chart plus history chart for one player. Stints with
/// different teams in the same season are summed first.
fn player_charts(
    player: &FeaturedEntity,
    seasons: &[BattingRecord],
    selection: &ViewSelection,
    horizon: u32,
) -> Vec<Chart> {
    let stats = [StatField::HomeRuns, StatField::RunsBattedIn];
    let history: Vec<Series> = stats
        .iter()
        .map(|field| {
            let yearly = aggregate_by_year(seasons, *field, AggregateOp::Sum);
            Series::new(field.label(), SeriesStyle::Line, series_points(&yearly))
        })
        .collect();

    let mut predicted = Chart::new(String::new(), "Count");
    predicted.series.extend(history.iter().cloned());
    let mut last_year = selection.end_year;
    for series in &history {
        match fit_and_extrapolate(&series.points, horizon) {
            Ok(fit) => {
                if let Some((year, _)) = fit.predictions.last() {
                    last_year = last_year.max(*year);
                }
                predicted.series.push(Series::new(
                    &series.color_key,
                    SeriesStyle::Predicted,
                    fit.predictions,
                ));
            }
            Err(e) => predicted
                .notes
                .push(format!("{}: prediction skipped ({e})", series.color_key)),
        }
    }
    predicted.title = format!(
        "{}: Home Runs and RBIs from {}-{} (Prediction)",
        player.name, selection.start_year, last_year
    );

    let mut observed = Chart::new(
        format!("{}: Home Runs and RBIs from {}", player.name, span(selection)),
        "Count",
    );
    observed.series = history;

    vec![predicted, observed]
}

fn featured_team(
    teams: &[TeamSeasonRecord],
    selection: &ViewSelection,
    team: &FeaturedEntity,
) -> ViewOutput {
    let seasons = sort_by_year(select_entity(
        teams,
        &team.id,
        KeyField::Team,
        selection.start_year,
        selection.end_year,
    ));
    if seasons.is_empty() {
        return ViewOutput::Empty {
            reason: format!("No seasons for {} ({}) in {}", team.name, team.id, span(selection)),
        };
    }

    let summaries = summarize_teams(&seasons);
    let win_pct: Vec<(i32, f64)> = summaries
        .iter()
        .filter_map(|s| s.winning_pct.map(|p| (s.record.year, p)))
        .collect();
    let run_diff: Vec<(i32, f64)> = summaries
        .iter()
        .map(|s| (s.record.year, s.run_differential as f64))
        .collect();

    ViewOutput::Charts(vec![
        Chart::new(
            format!("{} Performance: Winning Percentage Over Time", team.name),
            StatField::WinningPercentage.label(),
        )
        .with_series(Series::new(
            StatField::WinningPercentage.label(),
            SeriesStyle::Line,
            win_pct,
        )),
        Chart::new(
            format!("{} Performance: Run Differential Over Time", team.name),
            StatField::RunDifferential.label(),
        )
        .with_series(Series::new(
            StatField::RunDifferential.label(),
            SeriesStyle::Line,
            run_diff,
        )),
    ])
}

fn team_performance(teams: &[TeamSeasonRecord], selection: &ViewSelection) -> ViewOutput {
    let rows = in_range(teams, selection);
    if rows.is_empty() {
        return empty_range("team", selection);
    }

    let charts: Vec<Chart> = [StatField::WinningPercentage, StatField::RunDifferential]
        .into_iter()
        .map(|field| {
            let seasons: Vec<(i32, f64)> = rows
                .iter()
                .filter_map(|r| r.stat(field).map(|v| (r.year, v)))
                .collect();
            let mean = series_points(&aggregate_by_year(&rows, field, AggregateOp::Mean));
            let mut chart = Chart::new(
                format!("Team Performance: {} Over Time", field.label()),
                field.label(),
            );
            chart.series.push(Series {
                name: "Team seasons".to_string(),
                color_key: "Team seasons".to_string(),
                style: SeriesStyle::Points,
                points: seasons,
            });
            chart.series.push(Series {
                name: "League average".to_string(),
                color_key: "League average".to_string(),
                style: SeriesStyle::Line,
                points: mean,
            });
            chart
        })
        .collect();
    ViewOutput::Charts(charts)
}

fn yearly_stats(teams: &[TeamSeasonRecord], selection: &ViewSelection) -> ViewOutput {
    let in_range_teams = filter(teams, &selection.range());
    let Some(year) = selection
        .year
        .or_else(|| distinct_years(&in_range_teams).last().copied())
    else {
        return empty_range("team", selection);
    };

    let mut criteria = SeasonFilter::years(year, year);
    criteria.league = selection.league.clone();
    criteria.division = selection.division.clone();

    let caption = format!(
        "Year: {year}, League: {}, Division: {}",
        selection.league.as_deref().unwrap_or("All"),
        selection.division.as_deref().unwrap_or("All")
    );
    let rows = filter(&in_range_teams, &criteria);
    if rows.is_empty() {
        return ViewOutput::Empty {
            reason: format!("No team seasons match ({caption})"),
        };
    }

    ViewOutput::Table {
        caption,
        table: team_table(&summarize_teams(&rows)),
    }
}

fn team_table(summaries: &[TeamSeasonSummary]) -> RecordTable {
    let columns = [
        "Team", "Name", "Year", "League", "Division", "W", "G", "R", "RA", "Win %", "Run Diff",
    ];
    let rows = summaries
        .iter()
        .map(|s| {
            let r = &s.record;
            vec![
                r.team_id.clone(),
                r.name.clone().unwrap_or_default(),
                r.year.to_string(),
                r.league.clone(),
                r.division.clone().unwrap_or_default(),
                r.wins.to_string(),
                r.games.to_string(),
                r.runs.to_string(),
                r.runs_allowed.to_string(),
                s.winning_pct
                    .map(|p| format!("{:.4}", round_to(p, 4)))
                    .unwrap_or_else(|| "–".to_string()),
                format!("{:+}", s.run_differential),
            ]
        })
        .collect();

    RecordTable {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows,
    }
}
