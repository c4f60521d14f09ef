use std::collections::BTreeMap;

use super::model::{SeasonRecord, StatField};

/// How values inside one year group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Sum,
    Mean,
}

/// The combined value for one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YearAggregate {
    Value(f64),
    /// Every record of the year had an undefined value for the field.
    NoData,
}

impl YearAggregate {
    pub fn value(self) -> Option<f64> {
        match self {
            YearAggregate::Value(v) => Some(v),
            YearAggregate::NoData => None,
        }
    }
}

/// Year → aggregate, iterated in ascending year order.
pub type YearlySeries = BTreeMap<i32, YearAggregate>;

/// Group `records` by year and combine `field` with `op`.
///
/// Undefined values are left out of both the sum and the mean count. A
/// year with no defined values is kept and marked [`YearAggregate::NoData`].
pub fn aggregate_by_year<R: SeasonRecord>(
    records: &[R],
    field: StatField,
    op: AggregateOp,
) -> YearlySeries {
    aggregate_by_year_with(records, |r| r.stat(field), op)
}

/// Same as [`aggregate_by_year`] but with an arbitrary per-record value.
pub fn aggregate_by_year_with<R, F>(records: &[R], value: F, op: AggregateOp) -> YearlySeries
where
    R: SeasonRecord,
    F: Fn(&R) -> Option<f64>,
{
    // year -> (sum, defined count)
    let mut groups: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for record in records {
        let slot = groups.entry(record.year()).or_insert((0.0, 0));
        if let Some(v) = value(record).filter(|v| v.is_finite()) {
            slot.0 += v;
            slot.1 += 1;
        }
    }

    groups
        .into_iter()
        .map(|(year, (sum, count))| {
            let agg = match (op, count) {
                (_, 0) => YearAggregate::NoData,
                (AggregateOp::Sum, _) => YearAggregate::Value(sum),
                (AggregateOp::Mean, n) => YearAggregate::Value(sum / n as f64),
            };
            (year, agg)
        })
        .collect()
}

/// The defined points of a series, in year order, for charting or fitting.
pub fn series_points(series: &YearlySeries) -> Vec<(i32, f64)> {
    series
        .iter()
        .filter_map(|(year, agg)| agg.value().map(|v| (*year, v)))
        .collect()
}
