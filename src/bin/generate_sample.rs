use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

use diamond_dash::data::model::{BattingRecord, PitchingRecord, TeamSeasonRecord};

const FIRST_YEAR: i32 = 2010;
const LAST_YEAR: i32 = 2023;

/// (teamID, lgID, divID, name)
const TEAMS: [(&str, &str, &str, &str); 30] = [
    ("BAL", "AL", "E", "Baltimore Orioles"),
    ("BOS", "AL", "E", "Boston Red Sox"),
    ("NYA", "AL", "E", "New York Yankees"),
    ("TBA", "AL", "E", "Tampa Bay Rays"),
    ("TOR", "AL", "E", "Toronto Blue Jays"),
    ("CHA", "AL", "C", "Chicago White Sox"),
    ("CLE", "AL", "C", "Cleveland Guardians"),
    ("DET", "AL", "C", "Detroit Tigers"),
    ("KCA", "AL", "C", "Kansas City Royals"),
    ("MIN", "AL", "C", "Minnesota Twins"),
    ("HOU", "AL", "W", "Houston Astros"),
    ("LAA", "AL", "W", "Los Angeles Angels"),
    ("OAK", "AL", "W", "Oakland Athletics"),
    ("SEA", "AL", "W", "Seattle Mariners"),
    ("TEX", "AL", "W", "Texas Rangers"),
    ("ATL", "NL", "E", "Atlanta Braves"),
    ("MIA", "NL", "E", "Miami Marlins"),
    ("NYN", "NL", "E", "New York Mets"),
    ("PHI", "NL", "E", "Philadelphia Phillies"),
    ("WAS", "NL", "E", "Washington Nationals"),
    ("CHN", "NL", "C", "Chicago Cubs"),
    ("CIN", "NL", "C", "Cincinnati Reds"),
    ("MIL", "NL", "C", "Milwaukee Brewers"),
    ("PIT", "NL", "C", "Pittsburgh Pirates"),
    ("SLN", "NL", "C", "St. Louis Cardinals"),
    ("ARI", "NL", "W", "Arizona Diamondbacks"),
    ("COL", "NL", "W", "Colorado Rockies"),
    ("LAN", "NL", "W", "Los Angeles Dodgers"),
    ("SDN", "NL", "W", "San Diego Padres"),
    ("SFN", "NL", "W", "San Francisco Giants"),
];

/// Seeded splitmix64 stream; the same seed always yields the same league.
struct SeasonRng(u64);

impl SeasonRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in (0, 1].
    fn unit(&mut self) -> f64 {
        ((self.next_u64() >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    /// Normally distributed stat around `mean` (Box-Muller).
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let radius = (-2.0 * self.unit().ln()).sqrt();
        let angle = std::f64::consts::TAU * self.unit();
        mean + std_dev * radius * angle.cos()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn games_in(year: i32) -> u32 {
    if year == 2020 { 60 } else { 162 }
}

fn count(rng: &mut SeasonRng, mean: f64, std_dev: f64) -> u32 {
    rng.normal(mean, std_dev).round().max(0.0) as u32
}

fn team_seasons(rng: &mut SeasonRng) -> Vec<TeamSeasonRecord> {
    let mut rows = Vec::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        let games = games_in(year);
        let scale = games as f64 / 162.0;
        for (team_id, league, division, name) in TEAMS {
            let runs = count(rng, 700.0 * scale, 60.0 * scale);
            let runs_allowed = count(rng, 700.0 * scale, 60.0 * scale);
            let expected = games as f64 / 2.0 + (runs as f64 - runs_allowed as f64) / 10.0;
            let wins = (expected + rng.normal(0.0, 3.0)).round().clamp(0.0, games as f64) as u32;
            rows.push(TeamSeasonRecord {
                team_id: team_id.to_string(),
                year,
                league: league.to_string(),
                division: Some(division.to_string()),
                name: Some(name.to_string()),
                wins,
                games,
                runs,
                runs_allowed,
            });
        }
    }
    rows
}

/// One batting line with plausible counting stats for `at_bats`.
fn batting_line(
    rng: &mut SeasonRng,
    player_id: &str,
    year: i32,
    team: (&str, &str),
    at_bats: u32,
    power: f64,
) -> BattingRecord {
    let average = rng.normal(0.255, 0.025).clamp(0.150, 0.350);
    let home_runs = count(rng, at_bats as f64 * power, 3.0);
    BattingRecord {
        player_id: player_id.to_string(),
        year,
        team_id: Some(team.0.to_string()),
        league: team.1.to_string(),
        hits: (at_bats as f64 * average).round() as u32,
        at_bats,
        home_runs,
        rbi: Some(count(rng, home_runs as f64 * 2.6 + 10.0, 8.0)),
    }
}

fn batting_lines(rng: &mut SeasonRng) -> Vec<BattingRecord> {
    let mut rows = Vec::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        let scale = games_in(year) as f64 / 162.0;

        // Featured players get steady trends so the prediction overlay is visible.
        if year >= 2011 {
            let ab = (560.0 * scale) as u32;
            rows.push(batting_line(rng, "troutmi01", year, ("LAA", "AL"), ab, 0.060));
        }
        if year >= 2012 {
            let team = if year < 2019 { ("WAS", "NL") } else { ("PHI", "NL") };
            let ab = (540.0 * scale) as u32;
            rows.push(batting_line(rng, "harpebr03", year, team, ab, 0.055));
        }

        for i in 0..240 {
            let player_id = format!("player{i:03}01");
            let (team_id, league, _, _) = *rng.pick(&TEAMS);
            // Pitchers and September call-ups: some lines have no at-bats.
            let at_bats = if i % 12 == 0 {
                0
            } else {
                (count(rng, 380.0, 140.0).min(650) as f64 * scale) as u32
            };
            let mut line = batting_line(rng, &player_id, year, (team_id, league), at_bats, 0.035);
            if at_bats == 0 {
                line.hits = 0;
                line.home_runs = 0;
                line.rbi = Some(0);
            }
            // Every 40th player is traded mid-season and gets a second stint.
            if i % 40 == 1 && at_bats > 100 {
                let (team2, league2, _, _) = *rng.pick(&TEAMS);
                let stint_ab = at_bats / 3;
                let second =
                    batting_line(rng, &player_id, year, (team2, league2), stint_ab, 0.035);
                rows.push(line);
                rows.push(second);
            } else {
                rows.push(line);
            }
        }
    }
    rows
}

fn pitching_lines(rng: &mut SeasonRng) -> Vec<PitchingRecord> {
    let mut rows = Vec::new();
    for year in FIRST_YEAR..=LAST_YEAR {
        // League-wide ERA drifts upward over the decade.
        let base = 3.7 + (year - FIRST_YEAR) as f64 * 0.04;
        for i in 0..180 {
            let (team_id, league, _, _) = *rng.pick(&TEAMS);
            // A pitcher without a recorded out has a blank ERA.
            let era = if i % 45 == 0 {
                None
            } else {
                Some((rng.normal(base, 1.1).max(0.0) * 100.0).round() / 100.0)
            };
            rows.push(PitchingRecord {
                player_id: Some(format!("pitcher{i:03}01")),
                year,
                team_id: Some(team_id.to_string()),
                league: league.to_string(),
                era,
            });
        }
    }
    rows
}

fn write_csv<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV writer")?;
    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn teams_batch(rows: &[TeamSeasonRecord]) -> Result<RecordBatch> {
    let strings = |f: fn(&TeamSeasonRecord) -> Option<&str>| -> StringArray {
        rows.iter().map(f).collect()
    };
    let ints = |f: fn(&TeamSeasonRecord) -> i64| -> Int64Array {
        Int64Array::from(rows.iter().map(f).collect::<Vec<i64>>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("teamID", DataType::Utf8, false),
        Field::new("yearID", DataType::Int64, false),
        Field::new("lgID", DataType::Utf8, false),
        Field::new("divID", DataType::Utf8, true),
        Field::new("name", DataType::Utf8, true),
        Field::new("W", DataType::Int64, false),
        Field::new("G", DataType::Int64, false),
        Field::new("R", DataType::Int64, false),
        Field::new("RA", DataType::Int64, false),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(strings(|r| Some(r.team_id.as_str()))),
            Arc::new(ints(|r| r.year as i64)),
            Arc::new(strings(|r| Some(r.league.as_str()))),
            Arc::new(strings(|r| r.division.as_deref())),
            Arc::new(strings(|r| r.name.as_deref())),
            Arc::new(ints(|r| r.wins as i64)),
            Arc::new(ints(|r| r.games as i64)),
            Arc::new(ints(|r| r.runs as i64)),
            Arc::new(ints(|r| r.runs_allowed as i64)),
        ],
    )
    .context("building teams record batch")
}

fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    println!("Wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SeasonRng(42);
    let teams = team_seasons(&mut rng);
    let batting = batting_lines(&mut rng);
    let pitching = pitching_lines(&mut rng);

    write_csv(&out_dir.join("Teams.csv"), &teams)?;
    write_csv(&out_dir.join("Batting.csv"), &batting)?;
    write_csv(&out_dir.join("Pitching.csv"), &pitching)?;

    let batch = teams_batch(&teams)?;
    write_parquet(&out_dir.join("Teams.parquet"), &batch)?;

    let preview = pretty_format_batches(&[batch.slice(0, 5)]).context("formatting preview")?;
    println!("{preview}");
    Ok(())
}
