use std::path::PathBuf;

use diamond_dash::config::{DashboardConfig, DataPaths, FeaturedEntity};
use diamond_dash::data::loader::load_datasets;
use diamond_dash::data::model::{DatasetKind, Datasets};
use diamond_dash::view::{
    Chart, DashboardView, SeriesStyle, ViewOutput, ViewSelection, selectable_years,
};

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn config() -> DashboardConfig {
    DashboardConfig {
        data_dir: fixtures_dir(),
        ..DashboardConfig::default()
    }
}

fn datasets(config: &DashboardConfig) -> Datasets {
    let report = load_datasets(&DataPaths::resolve(config));
    assert!(report.issues.is_empty(), "fixtures should all load: {:?}", report.issues);
    report.datasets
}

fn charts(output: ViewOutput) -> Vec<Chart> {
    match output {
        ViewOutput::Charts(charts) => charts,
        other => panic!("expected charts, got {other:?}"),
    }
}

#[test]
fn home_runs_is_a_bar_chart() {
    let config = config();
    let data = datasets(&config);
    let selection = ViewSelection::from_config(&config);

    let out = charts(DashboardView::HomeRuns.compute(&data, &selection, &config));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].title, "Home Runs in MLB: 2012-2022");
    let series = &out[0].series[0];
    assert_eq!(series.style, SeriesStyle::Bars);
    assert_eq!(
        series.points,
        vec![(2012, 52.0), (2013, 62.0), (2014, 49.0), (2015, 0.0)]
    );
}

#[test]
fn average_era_notes_years_without_data() {
    let config = config();
    let data = datasets(&config);
    let selection = ViewSelection::from_config(&config);

    let out = charts(DashboardView::AverageEra.compute(&data, &selection, &config));
    assert_eq!(out[0].series[0].points, vec![(2012, 3.5), (2013, 5.0)]);
    assert_eq!(out[0].notes, vec!["No data for 2014".to_string()]);
}

#[test]
fn average_batting_average_skips_undefined_years() {
    let config = config();
    let data = datasets(&config);
    let selection = ViewSelection::from_config(&config);

    let out = charts(DashboardView::AverageBattingAverage.compute(&data, &selection, &config));
    let years: Vec<i32> = out[0].series[0].points.iter().map(|p| p.0).collect();
    assert_eq!(years, vec![2012, 2013, 2014]);
    assert_eq!(out[0].notes, vec!["No data for 2015".to_string()]);
}

#[test]
fn player_stats_predicts_each_featured_player() {
    let mut config = config();
    config
        .featured_players
        .push(FeaturedEntity::new("nobody01", "Nobody"));
    let data = datasets(&config);
    let selection = ViewSelection::from_config(&config);

    let out = charts(DashboardView::PlayerStats.compute(&data, &selection, &config));
    // Two charts per found player, one note-only chart for the missing one.
    assert_eq!(out.len(), 5);

    let trout = &out[0];
    assert_eq!(
        trout.title,
        "Mike Trout: Home Runs and RBIs from 2012-2022 (Prediction)"
    );
    let predicted: Vec<_> = trout
        .series
        .iter()
        .filter(|s| s.style == SeriesStyle::Predicted)
        .collect();
    assert_eq!(predicted.len(), 2);
    assert_eq!(predicted[0].name, "Predicted Home Runs");
    assert_eq!(predicted[0].color_key, "Home Runs");
    assert_eq!(predicted[0].points.len(), 4);
    assert_eq!(predicted[0].points[0].0, 2015);
    assert!((predicted[0].points[0].1 - 37.0).abs() < 1e-6);

    let history = &out[1];
    assert!(history.series.iter().all(|s| s.style == SeriesStyle::Line));

    let nobody = &out[4];
    assert!(nobody.series.is_empty());
    assert!(nobody.notes[0].contains("nobody01"));
}

#[test]
fn single_season_skips_prediction_but_keeps_history() {
    let config = config();
    let data = datasets(&config);
    let selection = ViewSelection {
        start_year: 2014,
        end_year: 2014,
        ..ViewSelection::from_config(&config)
    };

    let out = charts(DashboardView::PlayerStats.compute(&data, &selection, &config));
    let trout = &out[0];
    assert!(trout.series.iter().all(|s| s.style != SeriesStyle::Predicted));
    assert_eq!(trout.series.len(), 2);
    assert_eq!(trout.notes.len(), 2);
    assert!(trout.notes[0].starts_with("Home Runs: prediction skipped"));
}

#[test]
fn featured_team_trends() {
    let config = config();
    let data = datasets(&config);
    let selection = ViewSelection::from_config(&config);

    let out = charts(DashboardView::FeaturedTeam.compute(&data, &selection, &config));
    assert_eq!(out.len(), 2);
    assert!(out[0].title.starts_with("Chicago Cubs Performance"));

    let years: Vec<i32> = out[0].series[0].points.iter().map(|p| p.0).collect();
    assert_eq!(years, vec![2012, 2013, 2014, 2015]);
    assert_eq!(out[1].series[0].points.last(), Some(&(2015, 50.0)));
}

#[test]
fn team_performance_has_seasons_and_average() {
    let config = config();
    let data = datasets(&config);
    let selection = ViewSelection::from_config(&config);

    let out = charts(DashboardView::TeamPerformance.compute(&data, &selection, &config));
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].series[0].style, SeriesStyle::Points);
    assert_eq!(out[0].series[0].points.len(), 8);
    assert_eq!(out[0].series[1].style, SeriesStyle::Line);
    assert_eq!(out[0].series[1].points.len(), 4);
}

#[test]
fn yearly_stats_defaults_to_latest_season() {
    let config = config();
    let data = datasets(&config);
    let mut selection = ViewSelection::from_config(&config);
    assert_eq!(selectable_years(&data, &selection), vec![2012, 2013, 2014, 2015]);

    match DashboardView::YearlyStats.compute(&data, &selection, &config) {
        ViewOutput::Table { caption, table } => {
            assert_eq!(caption, "Year: 2015, League: All, Division: All");
            assert_eq!(table.rows.len(), 5);
        }
        other => panic!("expected table, got {other:?}"),
    }

    selection.league = Some("NL".into());
    selection.division = Some("C".into());
    match DashboardView::YearlyStats.compute(&data, &selection, &config) {
        ViewOutput::Table { table, .. } => {
            let cubs = &table.rows[0];
            assert_eq!(cubs[0], "CHN");
            assert_eq!(cubs[9], "0.5556");
            assert_eq!(cubs[10], "+50");
            assert_eq!(table.rows[1][0], "SLN");
        }
        other => panic!("expected table, got {other:?}"),
    }
}

#[test]
fn no_matching_rows_is_empty_not_error() {
    let config = config();
    let data = datasets(&config);
    let selection = ViewSelection {
        year: Some(2013),
        league: Some("AL".into()),
        ..ViewSelection::from_config(&config)
    };
    assert!(matches!(
        DashboardView::YearlyStats.compute(&data, &selection, &config),
        ViewOutput::Empty { .. }
    ));

    let inverted = ViewSelection {
        start_year: 2020,
        end_year: 2010,
        ..ViewSelection::from_config(&config)
    };
    for view in DashboardView::ALL {
        assert!(
            matches!(view.compute(&data, &inverted, &config), ViewOutput::Empty { .. }),
            "{view} should be empty for an inverted range"
        );
    }
}

#[test]
fn missing_dataset_only_affects_its_views() {
    let config = config();
    let mut data = datasets(&config);
    data.pitching = None;
    let selection = ViewSelection::from_config(&config);

    assert_eq!(
        DashboardView::AverageEra.compute(&data, &selection, &config),
        ViewOutput::Unavailable {
            missing: DatasetKind::Pitching
        }
    );
    assert!(matches!(
        DashboardView::HomeRuns.compute(&data, &selection, &config),
        ViewOutput::Charts(_)
    ));
}
