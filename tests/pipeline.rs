use std::path::{Path, PathBuf};

use diamond_dash::data::aggregate::{AggregateOp, YearAggregate, aggregate_by_year, series_points};
use diamond_dash::data::error::StatsError;
use diamond_dash::data::filter::{SeasonFilter, filter, select_entity, sort_by_year};
use diamond_dash::data::loader::load_file;
use diamond_dash::data::metrics::{TeamSeasonSummary, batting_average, round_to};
use diamond_dash::data::model::{
    BattingRecord, KeyField, PitchingRecord, SeasonRecord, StatField, TeamSeasonRecord,
};
use diamond_dash::data::trend::fit_and_extrapolate;

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn load<T: serde::de::DeserializeOwned>(name: &str) -> Vec<T> {
    load_file(Path::new(&fixture(name))).expect("fixture should load")
}

fn batting() -> Vec<BattingRecord> {
    load("Batting.csv")
}

fn pitching() -> Vec<PitchingRecord> {
    load("Pitching.csv")
}

fn teams() -> Vec<TeamSeasonRecord> {
    load("Teams.csv")
}

#[test]
fn fixtures_load_completely() {
    assert_eq!(batting().len(), 13);
    assert_eq!(pitching().len(), 6);
    assert_eq!(teams().len(), 10);
}

#[test]
fn filter_keeps_exactly_the_range() {
    let all = batting();
    let (start, end) = (2012, 2014);
    let kept = filter(&all, &SeasonFilter::years(start, end));

    assert!(kept.iter().all(|r| (start..=end).contains(&r.year)));
    let expected = all
        .iter()
        .filter(|r| (start..=end).contains(&r.year))
        .count();
    assert_eq!(kept.len(), expected);
    for outside in all.iter().filter(|r| !(start..=end).contains(&r.year)) {
        assert!(!kept.contains(outside));
    }
}

#[test]
fn narrowing_twice_equals_narrowing_once() {
    let all = teams();
    let wide = filter(&all, &SeasonFilter::years(2012, 2016));
    let twice = filter(&wide, &SeasonFilter::years(2013, 2015));
    let once = filter(&all, &SeasonFilter::years(2013, 2015));
    assert_eq!(twice, once);
}

#[test]
fn sort_by_year_is_idempotent() {
    let once = sort_by_year(teams());
    let twice = sort_by_year(once.clone());
    assert_eq!(once, twice);
    assert!(once.windows(2).all(|w| w[0].year <= w[1].year));
}

#[test]
fn league_and_division_filters() {
    let criteria = SeasonFilter::years(2015, 2015)
        .with_league("NL")
        .with_division("C");
    let ids: Vec<String> = filter(&teams(), &criteria)
        .into_iter()
        .map(|t| t.team_id)
        .collect();
    assert_eq!(ids, vec!["CHN", "SLN"]);
}

#[test]
fn batting_average_edges() {
    assert_eq!(
        batting_average(0, 0),
        Err(StatsError::UndefinedRatio {
            numerator: 0,
            denominator: 0
        })
    );
    assert_eq!(batting_average(3, 10), Ok(0.3));
}

#[test]
fn home_runs_per_year() {
    let rows = sort_by_year(filter(&batting(), &SeasonFilter::years(2012, 2015)));
    let totals = aggregate_by_year(&rows, StatField::HomeRuns, AggregateOp::Sum);
    assert_eq!(
        series_points(&totals),
        vec![(2012, 52.0), (2013, 62.0), (2014, 49.0), (2015, 0.0)]
    );
}

#[test]
fn batting_average_mean_skips_zero_at_bats() {
    let rows = filter(&batting(), &SeasonFilter::years(2012, 2015));
    let means = aggregate_by_year(&rows, StatField::BattingAverage, AggregateOp::Mean);

    let expected_2014 = (173.0 / 602.0 + 96.0 / 352.0) / 2.0;
    match means.get(&2014) {
        Some(YearAggregate::Value(v)) => assert!((v - expected_2014).abs() < 1e-12),
        other => panic!("expected a value for 2014, got {other:?}"),
    }
    // Only a zero at-bat line in 2015.
    assert_eq!(means.get(&2015), Some(&YearAggregate::NoData));
}

#[test]
fn era_mean_per_year() {
    let rows = filter(&pitching(), &SeasonFilter::years(2012, 2022));
    let means = aggregate_by_year(&rows, StatField::EarnedRunAverage, AggregateOp::Mean);
    assert_eq!(means.get(&2012), Some(&YearAggregate::Value(3.5)));
    assert_eq!(means.get(&2013), Some(&YearAggregate::Value(5.0)));
    assert_eq!(means.get(&2014), Some(&YearAggregate::NoData));
    assert!(!means.contains_key(&2011));
}

#[test]
fn cubs_2015_derived_metrics() {
    let cubs = select_entity(&teams(), "CHN", KeyField::Team, 2012, 2022);
    assert_eq!(cubs.len(), 4);

    let season = cubs
        .iter()
        .find(|t| t.year == 2015)
        .expect("2015 season should exist");
    let summary = TeamSeasonSummary::from_record(season);
    assert_eq!(summary.winning_pct.map(|p| round_to(p, 4)), Some(0.5556));
    assert_eq!(summary.run_differential, 50);
    assert_eq!(season.stat(StatField::RunDifferential), Some(50.0));
}

#[test]
fn unknown_entity_is_empty() {
    assert!(select_entity(&batting(), "nobody01", KeyField::Player, 2012, 2022).is_empty());
}

#[test]
fn player_trend_extrapolates() {
    let trout = select_entity(&batting(), "troutmi01", KeyField::Player, 2012, 2022);
    let hr = series_points(&aggregate_by_year(&trout, StatField::HomeRuns, AggregateOp::Sum));
    assert_eq!(hr, vec![(2012, 30.0), (2013, 27.0), (2014, 36.0)]);

    let fit = fit_and_extrapolate(&hr, 4).expect("three seasons are enough");
    assert!((fit.slope - 3.0).abs() < 1e-9);
    let years: Vec<i32> = fit.predictions.iter().map(|p| p.0).collect();
    assert_eq!(years, vec![2015, 2016, 2017, 2018]);
    assert!((fit.predictions[0].1 - 37.0).abs() < 1e-6);
    assert!((fit.predictions[3].1 - 46.0).abs() < 1e-6);
}

#[test]
fn single_season_cannot_be_fit() {
    let trout = select_entity(&batting(), "troutmi01", KeyField::Player, 2014, 2014);
    let hr = series_points(&aggregate_by_year(&trout, StatField::HomeRuns, AggregateOp::Sum));
    assert_eq!(
        fit_and_extrapolate(&hr, 4),
        Err(StatsError::InsufficientData { distinct_years: 1 })
    );
}

#[test]
fn stints_are_summed_per_year() {
    let smith = select_entity(&batting(), "smithjo01", KeyField::Player, 2012, 2022);
    assert_eq!(smith.len(), 2);
    let hr = aggregate_by_year(&smith, StatField::HomeRuns, AggregateOp::Sum);
    let rbi = aggregate_by_year(&smith, StatField::RunsBattedIn, AggregateOp::Sum);
    assert_eq!(hr.get(&2013), Some(&YearAggregate::Value(15.0)));
    assert_eq!(rbi.get(&2013), Some(&YearAggregate::Value(42.0)));
}

#[test]
fn blank_rbi_outside_range_still_loads() {
    let old = select_entity(&batting(), "oldtimer01", KeyField::Player, 1800, 1900);
    assert_eq!(old.len(), 1);
    assert_eq!(old[0].rbi, None);
    assert_eq!(old[0].stat(StatField::RunsBattedIn), None);
}
