use super::model::{KeyField, SeasonRecord};

// ---------------------------------------------------------------------------
// Filter criteria: year range plus optional equality predicates
// ---------------------------------------------------------------------------

/// Inclusive year range with optional exact-match filters on identifier
/// columns. An unset filter places no constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonFilter {
    pub start_year: i32,
    pub end_year: i32,
    pub league: Option<String>,
    pub division: Option<String>,
    pub team: Option<String>,
    pub player: Option<String>,
}

impl SeasonFilter {
    /// Only constrain by year.
    pub fn years(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
            league: None,
            division: None,
            team: None,
            player: None,
        }
    }

    pub fn with_league(mut self, league: impl Into<String>) -> Self {
        self.league = Some(league.into());
        self
    }

    pub fn with_division(mut self, division: impl Into<String>) -> Self {
        self.division = Some(division.into());
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    fn predicates(&self) -> impl Iterator<Item = (KeyField, &str)> {
        [
            (KeyField::League, self.league.as_deref()),
            (KeyField::Division, self.division.as_deref()),
            (KeyField::Team, self.team.as_deref()),
            (KeyField::Player, self.player.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, wanted)| wanted.map(|w| (field, w)))
    }

    /// Whether a single record passes every active constraint.
    ///
    /// A record passes a key filter when its value for that column equals
    /// the wanted value. Records without the column never pass a set filter.
    pub fn matches<R: SeasonRecord>(&self, record: &R) -> bool {
        let year = record.year();
        if year < self.start_year || year > self.end_year {
            return false;
        }
        self.predicates()
            .all(|(field, wanted)| record.key(field) == Some(wanted))
    }
}

/// Return a new collection holding the records that pass `criteria`.
/// Input order is preserved. An inverted year range matches nothing.
pub fn filter<R: SeasonRecord + Clone>(records: &[R], criteria: &SeasonFilter) -> Vec<R> {
    records
        .iter()
        .filter(|r| criteria.matches(*r))
        .cloned()
        .collect()
}

/// Order records ascending by year. Equal years keep their input order.
pub fn sort_by_year<R: SeasonRecord>(mut records: Vec<R>) -> Vec<R> {
    records.sort_by_key(|r| r.year());
    records
}

/// Records whose `id_field` equals `entity_id`, limited to the year range.
/// An unknown identifier yields an empty collection.
pub fn select_entity<R: SeasonRecord + Clone>(
    records: &[R],
    entity_id: &str,
    id_field: KeyField,
    start_year: i32,
    end_year: i32,
) -> Vec<R> {
    let matching: Vec<R> = records
        .iter()
        .filter(|r| r.key(id_field) == Some(entity_id))
        .cloned()
        .collect();
    filter(&matching, &SeasonFilter::years(start_year, end_year))
}

/// Sorted distinct years present in `records`.
pub fn distinct_years<R: SeasonRecord>(records: &[R]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.year()).collect();
    years.sort_unstable();
    years.dedup();
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::TeamSeasonRecord;

    fn team(id: &str, year: i32, league: &str, division: &str) -> TeamSeasonRecord {
        TeamSeasonRecord {
            team_id: id.into(),
            year,
            league: league.into(),
            division: Some(division.into()),
            name: None,
            wins: 81,
            games: 162,
            runs: 700,
            runs_allowed: 700,
        }
    }

    fn sample() -> Vec<TeamSeasonRecord> {
        vec![
            team("NYA", 2014, "AL", "E"),
            team("CHN", 2011, "NL", "C"),
            team("CHN", 2012, "NL", "C"),
            team("LAN", 2012, "NL", "W"),
            team("SEA", 2023, "AL", "W"),
            team("BOS", 2012, "AL", "E"),
        ]
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let out = filter(&sample(), &SeasonFilter::years(2012, 2014));
        let ids: Vec<_> = out.iter().map(|t| (t.team_id.as_str(), t.year)).collect();
        assert_eq!(
            ids,
            vec![("NYA", 2014), ("CHN", 2012), ("LAN", 2012), ("BOS", 2012)]
        );
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(filter(&sample(), &SeasonFilter::years(2020, 2010)).is_empty());
    }

    #[test]
    fn optional_filters_combine() {
        let criteria = SeasonFilter::years(2000, 2030)
            .with_league("NL")
            .with_division("W");
        let out = filter(&sample(), &criteria);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].team_id, "LAN");
    }

    #[test]
    fn filter_does_not_touch_input() {
        let input = sample();
        let before = input.clone();
        let _ = filter(&input, &SeasonFilter::years(2012, 2012).with_team("CHN"));
        assert_eq!(input, before);
    }

    #[test]
    fn player_filter_never_matches_team_rows() {
        let out = filter(&sample(), &SeasonFilter::years(2000, 2030).with_player("x"));
        assert!(out.is_empty());
    }

    #[test]
    fn sort_is_stable_for_equal_years() {
        let sorted = sort_by_year(sample());
        let ids: Vec<_> = sorted.iter().map(|t| t.team_id.as_str()).collect();
        assert_eq!(ids, vec!["CHN", "CHN", "LAN", "BOS", "NYA", "SEA"]);
        assert_eq!(sort_by_year(sorted.clone()), sorted);
    }

    #[test]
    fn select_entity_unknown_is_empty() {
        assert!(select_entity(&sample(), "ZZZ", KeyField::Team, 2000, 2030).is_empty());
        let cubs = select_entity(&sample(), "CHN", KeyField::Team, 2012, 2022);
        assert_eq!(cubs.len(), 1);
        assert_eq!(cubs[0].year, 2012);
    }

    #[test]
    fn distinct_years_sorted() {
        assert_eq!(distinct_years(&sample()), vec![2011, 2012, 2014, 2023]);
    }
}
