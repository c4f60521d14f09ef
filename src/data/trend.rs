use super::error::StatsError;

/// Longest projection the dashboard will draw.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Ordinary least-squares line through (year, value) points, plus the
/// values it projects for the years following the last observation.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    pub predictions: Vec<(i32, f64)>,
}

impl TrendFit {
    pub fn predict(&self, year: i32) -> f64 {
        self.intercept + self.slope * year as f64
    }
}

/// Fit `value = intercept + slope * year` by least squares.
///
/// Points may repeat a year; at least two distinct years are required.
pub fn fit_linear(series: &[(i32, f64)]) -> Result<(f64, f64), StatsError> {
    let mut years: Vec<i32> = series.iter().map(|(y, _)| *y).collect();
    years.sort_unstable();
    years.dedup();
    if years.len() < 2 {
        return Err(StatsError::InsufficientData {
            distinct_years: years.len(),
        });
    }

    let n = series.len() as f64;
    let x_mean = series.iter().map(|(x, _)| *x as f64).sum::<f64>() / n;
    let y_mean = series.iter().map(|(_, y)| *y).sum::<f64>() / n;

    let numerator: f64 = series
        .iter()
        .map(|(x, y)| (*x as f64 - x_mean) * (y - y_mean))
        .sum();
    let denominator: f64 = series
        .iter()
        .map(|(x, _)| (*x as f64 - x_mean).powi(2))
        .sum();

    let slope = numerator / denominator;
    let intercept = y_mean - slope * x_mean;
    Ok((slope, intercept))
}

/// Fit a line and project it over the `horizon_years` years after the
/// latest year in `series`. The horizon must lie in
/// `1..=MAX_HORIZON_YEARS` and must not run past `i32::MAX`.
pub fn fit_and_extrapolate(
    series: &[(i32, f64)],
    horizon_years: u32,
) -> Result<TrendFit, StatsError> {
    if horizon_years == 0 || horizon_years > MAX_HORIZON_YEARS {
        return Err(StatsError::InvalidHorizon);
    }
    let horizon = i32::try_from(horizon_years)
        .map_err(|_| StatsError::InvalidHorizon)?;
    let (slope, intercept) = fit_linear(series)?;
    let last_year = series
        .iter()
        .map(|(y, _)| *y)
        .max()
        .ok_or(StatsError::InsufficientData { distinct_years: 0 })?;
    let final_year = last_year
        .checked_add(horizon)
        .ok_or(StatsError::InvalidHorizon)?;

    let mut fit = TrendFit {
        slope,
        intercept,
        predictions: Vec::new(),
    };
    fit.predictions = (last_year + 1..=final_year)
        .map(|year| (year, fit.predict(year)))
        .collect();
    Ok(fit)
}
